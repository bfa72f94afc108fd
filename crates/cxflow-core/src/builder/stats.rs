use std::fmt;

use cxflow_types::page::Page;
use serde::Serialize;

/// Structural counts over a single page.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PageStats {
    pub has_entry_fulfillment: bool,

    pub parameters_count: usize,
    pub parameters_with_event_handler_count: usize,
    pub parameters_with_webhook_fulfillment_count: usize,
    /// Share of parameters with reprompt handlers; 0 for a page without
    /// parameters.
    pub parameters_ratio: f64,

    pub transition_routes_count: usize,
    pub routes_with_fulfillment_count: usize,
    pub routes_with_webhook_fulfillment_count: usize,
    pub intent_routes_count: usize,
    pub condition_routes_count: usize,
    pub intent_and_condition_routes_count: usize,

    pub event_handlers_count: usize,
    pub events_with_fulfillment_count: usize,
    pub events_with_webhook_fulfillment_count: usize,

    pub transition_route_groups_count: usize,
}

impl PageStats {
    pub fn from_page(page: &Page) -> Self {
        let mut stats = PageStats {
            has_entry_fulfillment: !page.entry_fulfillment.is_empty(),
            parameters_count: page.form.parameters.len(),
            transition_routes_count: page.transition_routes.len(),
            event_handlers_count: page.event_handlers.len(),
            transition_route_groups_count: page.transition_route_groups.len(),
            ..Default::default()
        };

        for param in &page.form.parameters {
            if param.fill_behavior.initial_prompt_fulfillment.has_webhook() {
                stats.parameters_with_webhook_fulfillment_count += 1;
            }
            if !param.fill_behavior.reprompt_event_handlers.is_empty() {
                stats.parameters_with_event_handler_count += 1;
            }
        }
        if stats.parameters_count != 0 {
            stats.parameters_ratio =
                stats.parameters_with_event_handler_count as f64 / stats.parameters_count as f64;
        }

        for route in &page.transition_routes {
            // A webhook only counts when the route has a fulfillment at all.
            if !route.trigger_fulfillment.is_empty() {
                stats.routes_with_fulfillment_count += 1;
                if route.trigger_fulfillment.has_webhook() {
                    stats.routes_with_webhook_fulfillment_count += 1;
                }
            }
            match (route.intent.is_some(), route.condition.is_some()) {
                (true, true) => stats.intent_and_condition_routes_count += 1,
                (true, false) => stats.intent_routes_count += 1,
                (false, true) => stats.condition_routes_count += 1,
                (false, false) => {}
            }
        }

        for handler in &page.event_handlers {
            if handler.trigger_fulfillment.has_webhook() {
                stats.events_with_webhook_fulfillment_count += 1;
            }
            if !handler.trigger_fulfillment.is_empty() {
                stats.events_with_fulfillment_count += 1;
            }
        }

        stats
    }
}

impl fmt::Display for PageStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Has entry fulfillment: {}", self.has_entry_fulfillment)?;

        writeln!(f, "# of Parameters: {}", self.parameters_count)?;
        writeln!(
            f,
            "\t# of Parameters with Event Handlers: {} (Ratio: {})",
            self.parameters_with_event_handler_count, self.parameters_ratio
        )?;
        writeln!(
            f,
            "\t# of Parameters uses webhook for fulfillment: {}",
            self.parameters_with_webhook_fulfillment_count
        )?;

        writeln!(f, "# of Transition Routes: {}", self.transition_routes_count)?;
        writeln!(f, "\t# of intent routes: {}", self.intent_routes_count)?;
        writeln!(f, "\t# of condition routes: {}", self.condition_routes_count)?;
        writeln!(
            f,
            "\t# of intent and condition routes: {}",
            self.intent_and_condition_routes_count
        )?;
        writeln!(
            f,
            "\t# of routes with fulfillment: {}",
            self.routes_with_fulfillment_count
        )?;
        writeln!(
            f,
            "\t# of routes uses webhook for fulfillment: {}",
            self.routes_with_webhook_fulfillment_count
        )?;

        writeln!(f, "# of Event Handlers: {}", self.event_handlers_count)?;
        writeln!(
            f,
            "\t# of Event Handlers with fulfillment: {}",
            self.events_with_fulfillment_count
        )?;
        writeln!(
            f,
            "\t# of Event Handlers uses webhook for fulfillment: {}",
            self.events_with_webhook_fulfillment_count
        )?;

        write!(
            f,
            "# of Transition Route Groups: {}",
            self.transition_route_groups_count
        )
    }
}
