//! Column sets of the tabular projection, per resource and mode.
//!
//! Downstream exports depend on these names and their order.

use super::TableMode;

/// Resource kinds that have a tabular projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Fulfillment,
    FormParameter,
    TransitionRoute,
    EventHandler,
    TransitionRouteGroup,
    Page,
    EntityType,
    ExcludedPhrase,
}

const FULFILLMENT_BASIC: &[&str] = &["has_fulfillment", "has_fulfillment_webhook"];

const FULFILLMENT_ADVANCED: &[&str] = &[
    "messages",
    "preset_parameters",
    "conditional_cases",
    "webhook",
    "webhook_tag",
    "return_partial_responses",
];

const FORM_PARAMETER_BASIC: &[&str] = &[
    "parameter_display_name",
    "parameter_entity_type",
    "has_fulfillment",
    "has_fulfillment_webhook",
];

const FORM_PARAMETER_ADVANCED: &[&str] = &[
    "parameter_display_name",
    "parameter_entity_type",
    "parameter_is_required",
    "parameter_is_list",
    "parameter_is_redact",
    "parameter_default_value",
    "messages",
    "preset_parameters",
    "conditional_cases",
    "webhook",
    "webhook_tag",
    "return_partial_responses",
];

const TRANSITION_ROUTE_BASIC: &[&str] = &[
    "intent",
    "condition",
    "next_step",
    "has_fulfillment",
    "has_fulfillment_webhook",
];

const TRANSITION_ROUTE_ADVANCED: &[&str] = &[
    "intent",
    "condition",
    "target_type",
    "target_id",
    "messages",
    "preset_parameters",
    "conditional_cases",
    "webhook",
    "webhook_tag",
    "return_partial_responses",
];

const EVENT_HANDLER_BASIC: &[&str] = &[
    "event",
    "next_step",
    "has_fulfillment",
    "has_fulfillment_webhook",
];

const EVENT_HANDLER_ADVANCED: &[&str] = &[
    "event",
    "target_type",
    "target_id",
    "messages",
    "preset_parameters",
    "conditional_cases",
    "webhook",
    "webhook_tag",
    "return_partial_responses",
];

const TRANSITION_ROUTE_GROUP_BASIC: &[&str] = &[
    "name",
    "display_name",
    "flow",
    "intent",
    "condition",
    "next_step",
    "has_fulfillment",
    "has_fulfillment_webhook",
];

const TRANSITION_ROUTE_GROUP_ADVANCED: &[&str] = &[
    "name",
    "display_name",
    "flow",
    "intent",
    "condition",
    "target_type",
    "target_id",
    "messages",
    "preset_parameters",
    "conditional_cases",
    "webhook",
    "webhook_tag",
    "return_partial_responses",
];

const PAGE_BASIC: &[&str] = &[
    "name",
    "display_name",
    "flow",
    "parameter_display_name",
    "parameter_entity_type",
    "intent",
    "condition",
    "event",
    "next_step",
    "has_fulfillment",
    "has_fulfillment_webhook",
    "route_groups",
];

const PAGE_ADVANCED: &[&str] = &[
    "name",
    "display_name",
    "flow",
    "parameter_display_name",
    "parameter_entity_type",
    "parameter_is_required",
    "parameter_is_list",
    "parameter_is_redact",
    "parameter_default_value",
    "intent",
    "condition",
    "event",
    "target_type",
    "target_id",
    "messages",
    "preset_parameters",
    "conditional_cases",
    "webhook",
    "webhook_tag",
    "return_partial_responses",
    "route_groups",
];

const ENTITY_TYPE_BASIC: &[&str] = &["display_name", "entity_value", "synonyms"];

const ENTITY_TYPE_ADVANCED: &[&str] = &[
    "entity_type_id",
    "display_name",
    "kind",
    "auto_expansion_mode",
    "fuzzy_extraction",
    "redact",
    "entity_value",
    "synonyms",
];

const EXCLUDED_PHRASE: &[&str] = &["entity_type_id", "display_name", "excluded_phrase"];

/// The column set of `resource` in `mode`.
pub fn columns(resource: Resource, mode: TableMode) -> &'static [&'static str] {
    match (resource, mode) {
        (Resource::Fulfillment, TableMode::Basic) => FULFILLMENT_BASIC,
        (Resource::Fulfillment, TableMode::Advanced) => FULFILLMENT_ADVANCED,
        (Resource::FormParameter, TableMode::Basic) => FORM_PARAMETER_BASIC,
        (Resource::FormParameter, TableMode::Advanced) => FORM_PARAMETER_ADVANCED,
        (Resource::TransitionRoute, TableMode::Basic) => TRANSITION_ROUTE_BASIC,
        (Resource::TransitionRoute, TableMode::Advanced) => TRANSITION_ROUTE_ADVANCED,
        (Resource::EventHandler, TableMode::Basic) => EVENT_HANDLER_BASIC,
        (Resource::EventHandler, TableMode::Advanced) => EVENT_HANDLER_ADVANCED,
        (Resource::TransitionRouteGroup, TableMode::Basic) => TRANSITION_ROUTE_GROUP_BASIC,
        (Resource::TransitionRouteGroup, TableMode::Advanced) => TRANSITION_ROUTE_GROUP_ADVANCED,
        (Resource::Page, TableMode::Basic) => PAGE_BASIC,
        (Resource::Page, TableMode::Advanced) => PAGE_ADVANCED,
        (Resource::EntityType, TableMode::Basic) => ENTITY_TYPE_BASIC,
        (Resource::EntityType, TableMode::Advanced) => ENTITY_TYPE_ADVANCED,
        // Excluded phrases have a single layout.
        (Resource::ExcludedPhrase, _) => EXCLUDED_PHRASE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_schemas_cover_route_columns() {
        for mode in [TableMode::Basic, TableMode::Advanced] {
            let page = columns(Resource::Page, mode);
            let group = columns(Resource::TransitionRouteGroup, mode);
            for col in columns(Resource::TransitionRoute, mode) {
                assert!(page.contains(col), "page {mode} lacks {col}");
                assert!(group.contains(col), "group {mode} lacks {col}");
            }
            for col in columns(Resource::EventHandler, mode) {
                assert!(page.contains(col), "page {mode} lacks {col}");
            }
        }
    }

    #[test]
    fn test_form_parameter_schema_ends_with_fulfillment_columns() {
        for mode in [TableMode::Basic, TableMode::Advanced] {
            let params = columns(Resource::FormParameter, mode);
            let ff = columns(Resource::Fulfillment, mode);
            assert_eq!(&params[params.len() - ff.len()..], ff);
        }
    }
}
