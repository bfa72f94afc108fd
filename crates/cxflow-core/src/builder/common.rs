//! State and validation shared by every builder.
//!
//! Each builder wraps a [`ProtoSlot`]: at most one resource object, which is
//! either installed by a `create_*` call or seeded from an existing object.

use cxflow_types::error::BuilderError;
use cxflow_types::fulfillment::Fulfillment;
use cxflow_types::page::Page;
use cxflow_types::route::{EventHandler, TransitionRoute};
use cxflow_types::route_group::TransitionRouteGroup;

/// A resource message that a builder can hold.
pub trait ProtoResource: Clone {
    /// Human-readable type name used in error messages.
    const TYPE_NAME: &'static str;
}

impl ProtoResource for Fulfillment {
    const TYPE_NAME: &'static str = "Fulfillment";
}

impl ProtoResource for TransitionRoute {
    const TYPE_NAME: &'static str = "TransitionRoute";
}

impl ProtoResource for EventHandler {
    const TYPE_NAME: &'static str = "EventHandler";
}

impl ProtoResource for Page {
    const TYPE_NAME: &'static str = "Page";
}

impl ProtoResource for TransitionRouteGroup {
    const TYPE_NAME: &'static str = "TransitionRouteGroup";
}

/// The single "current object" of a builder.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtoSlot<T> {
    obj: Option<T>,
}

impl<T> Default for ProtoSlot<T> {
    fn default() -> Self {
        Self { obj: None }
    }
}

impl<T: ProtoResource> ProtoSlot<T> {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn seeded(obj: T) -> Self {
        Self { obj: Some(obj) }
    }

    pub fn get(&self) -> Option<&T> {
        self.obj.as_ref()
    }

    pub fn into_inner(self) -> Option<T> {
        self.obj
    }

    /// The held object, or [`BuilderError::MissingObject`].
    pub fn require(&self) -> Result<&T, BuilderError> {
        self.obj
            .as_ref()
            .ok_or(BuilderError::MissingObject(T::TYPE_NAME))
    }

    pub fn require_mut(&mut self) -> Result<&mut T, BuilderError> {
        self.obj
            .as_mut()
            .ok_or(BuilderError::MissingObject(T::TYPE_NAME))
    }

    /// Fail unless the slot is empty or `overwrite` is set.
    ///
    /// Call this before building the replacement so that a refused create
    /// does no work and touches nothing.
    pub fn check_vacant(&self, overwrite: bool) -> Result<(), BuilderError> {
        if self.obj.is_some() && !overwrite {
            return Err(BuilderError::AlreadyExists(T::TYPE_NAME));
        }
        Ok(())
    }

    /// Install `obj`, replacing any held object when `overwrite` is set.
    pub fn install(&mut self, obj: T, overwrite: bool) -> Result<&mut T, BuilderError> {
        self.check_vacant(overwrite)?;
        Ok(self.obj.insert(obj))
    }
}

/// Reject empty strings for a required field.
pub fn require_non_empty(value: &str, field: &str) -> Result<(), BuilderError> {
    if value.trim().is_empty() {
        return Err(BuilderError::InvalidArgument(format!(
            "`{field}` should be a nonempty string"
        )));
    }
    Ok(())
}

/// Treat `Some("")` the way the API does: as an unset field.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Reject an empty list and any blank entry in it.
pub fn require_non_empty_list<S: AsRef<str>>(
    values: &[S],
    field: &str,
) -> Result<(), BuilderError> {
    if values.is_empty() {
        return Err(BuilderError::InvalidArgument(format!(
            "`{field}` should not be empty"
        )));
    }
    for value in values {
        require_non_empty(value.as_ref(), field)?;
    }
    Ok(())
}

/// A section heading followed by a rule, as used in the text renderings.
pub(crate) fn heading(title: &str) -> String {
    format!("{title}:\n{}", "=".repeat(25))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_slot_requires_object() {
        let slot: ProtoSlot<Page> = ProtoSlot::empty();
        assert_eq!(slot.require(), Err(BuilderError::MissingObject("Page")));
    }

    #[test]
    fn test_install_refuses_overwrite_without_flag() {
        let mut slot = ProtoSlot::seeded(Page {
            display_name: "first".to_string(),
            ..Default::default()
        });
        let second = Page {
            display_name: "second".to_string(),
            ..Default::default()
        };

        let err = slot.install(second.clone(), false).unwrap_err();
        assert_eq!(err, BuilderError::AlreadyExists("Page"));
        assert_eq!(slot.require().unwrap().display_name, "first");

        slot.install(second, true).unwrap();
        assert_eq!(slot.require().unwrap().display_name, "second");
    }

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("Collect Email", "display_name").is_ok());
        let err = require_non_empty("  ", "display_name").unwrap_err();
        assert!(err.to_string().contains("display_name"));
    }

    #[test]
    fn test_non_blank_drops_empty_strings() {
        assert_eq!(non_blank(Some(String::new())), None);
        assert_eq!(non_blank(Some("x".to_string())), Some("x".to_string()));
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_require_non_empty_list() {
        assert!(require_non_empty_list(&["a"], "ids").is_ok());
        assert!(require_non_empty_list::<&str>(&[], "ids").is_err());
        assert!(require_non_empty_list(&["a", ""], "ids").is_err());
    }
}
