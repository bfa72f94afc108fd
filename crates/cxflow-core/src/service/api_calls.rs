//! Per-method accounting of remote calls.

use std::collections::BTreeMap;

use dashmap::DashMap;

/// Counts remote calls by method name.
///
/// Methods registered up front are reported with a zero count before their
/// first call.
#[derive(Debug, Default)]
pub struct ApiCallCounter {
    calls: DashMap<&'static str, u64>,
}

impl ApiCallCounter {
    pub fn new(methods: &[&'static str]) -> Self {
        let calls = DashMap::new();
        for method in methods {
            calls.insert(*method, 0);
        }
        Self { calls }
    }

    pub fn record(&self, method: &'static str) {
        *self.calls.entry(method).or_insert(0) += 1;
    }

    /// Calls per method, ordered by method name.
    pub fn api_calls_details(&self) -> BTreeMap<String, u64> {
        self.calls
            .iter()
            .map(|entry| (entry.key().to_string(), *entry.value()))
            .collect()
    }

    pub fn api_calls_count(&self) -> u64 {
        self.calls.iter().map(|entry| *entry.value()).sum()
    }
}
