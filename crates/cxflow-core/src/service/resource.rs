//! Resource id parsing and console links.
//!
//! Every Dialogflow CX resource id is a slash-separated path rooted at
//! `projects/<project>/locations/<location>`. [`parse_resource_path`] checks
//! an id against the layout of one [`ResourceType`] and returns its named
//! parts; [`resource_link`] turns a parseable id into a console URL.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use cxflow_types::error::ResourcePathError;

const CONSOLE_BASE: &str = "https://dialogflow.cloud.google.com/cx";

const ROOT: &str = r"^projects/(?P<project>.+?)/locations/(?P<location>[-0-9a-z]{1,36})";
const STANDARD_ID: &str = r"[-0-9a-f]{1,36}";
const ENTITY_ID: &str = r"[-@.0-9a-z]{1,36}";
const PAGE_ID: &str = r"[-0-9a-f]{1,36}|START_PAGE|END_SESSION|END_FLOW";
const SESSION_ID: &str = r#"[-0-9a-zA-Z!@#$%^&*()_+={}\[\]:;"'<>,.?]{1,36}"#;
const VERSION_ID: &str = r"[0-9]{1,4}";

/// The resource kinds whose ids can be validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Project,
    Agent,
    EntityType,
    Environment,
    Flow,
    Intent,
    Page,
    SecuritySetting,
    Session,
    SessionEntityType,
    TestCase,
    TransitionRouteGroup,
    Version,
    Webhook,
}

impl ResourceType {
    pub const ALL: [ResourceType; 14] = [
        ResourceType::Project,
        ResourceType::Agent,
        ResourceType::EntityType,
        ResourceType::Environment,
        ResourceType::Flow,
        ResourceType::Intent,
        ResourceType::Page,
        ResourceType::SecuritySetting,
        ResourceType::Session,
        ResourceType::SessionEntityType,
        ResourceType::TestCase,
        ResourceType::TransitionRouteGroup,
        ResourceType::Version,
        ResourceType::Webhook,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Project => "project",
            ResourceType::Agent => "agent",
            ResourceType::EntityType => "entity_type",
            ResourceType::Environment => "environment",
            ResourceType::Flow => "flow",
            ResourceType::Intent => "intent",
            ResourceType::Page => "page",
            ResourceType::SecuritySetting => "security_setting",
            ResourceType::Session => "session",
            ResourceType::SessionEntityType => "session_entity_type",
            ResourceType::TestCase => "test_case",
            ResourceType::TransitionRouteGroup => "transition_route_group",
            ResourceType::Version => "version",
            ResourceType::Webhook => "webhook",
        }
    }

    /// Path segments after the location root, as `(collection, capture name,
    /// id pattern)` triples.
    fn segments(self) -> &'static [(&'static str, &'static str, &'static str)] {
        const AGENT: (&str, &str, &str) = ("agents", "agent", STANDARD_ID);
        const FLOW: (&str, &str, &str) = ("flows", "flow", STANDARD_ID);
        const SESSION: (&str, &str, &str) = ("sessions", "session", SESSION_ID);
        match self {
            ResourceType::Project => &[],
            ResourceType::Agent => &[AGENT],
            ResourceType::EntityType => &[AGENT, ("entityTypes", "entity", ENTITY_ID)],
            ResourceType::Environment => {
                &[AGENT, ("environments", "environment", STANDARD_ID)]
            }
            ResourceType::Flow => &[AGENT, FLOW],
            ResourceType::Intent => &[AGENT, ("intents", "intent", STANDARD_ID)],
            ResourceType::Page => &[AGENT, FLOW, ("pages", "page", PAGE_ID)],
            ResourceType::SecuritySetting => {
                &[("securitySettings", "security_setting", STANDARD_ID)]
            }
            ResourceType::Session => &[AGENT, SESSION],
            ResourceType::SessionEntityType => {
                &[AGENT, SESSION, ("entityTypes", "entity", ENTITY_ID)]
            }
            ResourceType::TestCase => &[AGENT, ("testCases", "test_case", STANDARD_ID)],
            ResourceType::TransitionRouteGroup => &[
                AGENT,
                FLOW,
                ("transitionRouteGroups", "transition_route_group", STANDARD_ID),
            ],
            ResourceType::Version => &[AGENT, FLOW, ("versions", "version", VERSION_ID)],
            ResourceType::Webhook => &[AGENT, ("webhooks", "webhook", STANDARD_ID)],
        }
    }

    /// Human-readable layout shown when an id does not match.
    pub fn format(self) -> &'static str {
        match self {
            ResourceType::Project => "`projects/<Project ID>/locations/<Location ID>`",
            ResourceType::Agent => "`projects/<Project ID>/locations/<Location ID>/agents/<Agent ID>`",
            ResourceType::EntityType => {
                "`projects/<Project ID>/locations/<Location ID>/agents/<Agent ID>/entityTypes/<Entity Type ID>`"
            }
            ResourceType::Environment => {
                "`projects/<Project ID>/locations/<Location ID>/agents/<Agent ID>/environments/<Environment ID>`"
            }
            ResourceType::Flow => {
                "`projects/<Project ID>/locations/<Location ID>/agents/<Agent ID>/flows/<Flow ID>`"
            }
            ResourceType::Intent => {
                "`projects/<Project ID>/locations/<Location ID>/agents/<Agent ID>/intents/<Intent ID>`"
            }
            ResourceType::Page => {
                "`projects/<Project ID>/locations/<Location ID>/agents/<Agent ID>/flows/<Flow ID>/pages/<Page ID>`"
            }
            ResourceType::SecuritySetting => {
                "`projects/<Project ID>/locations/<Location ID>/securitySettings/<Security Setting ID>`"
            }
            ResourceType::Session => {
                "`projects/<Project ID>/locations/<Location ID>/agents/<Agent ID>/sessions/<Session ID>`"
            }
            ResourceType::SessionEntityType => {
                "`projects/<Project ID>/locations/<Location ID>/agents/<Agent ID>/sessions/<Session ID>/entityTypes/<Entity Type ID>`"
            }
            ResourceType::TestCase => {
                "`projects/<Project ID>/locations/<Location ID>/agents/<Agent ID>/testCases/<Test Case ID>`"
            }
            ResourceType::TransitionRouteGroup => {
                "`projects/<Project ID>/locations/<Location ID>/agents/<Agent ID>/flows/<Flow ID>/transitionRouteGroups/<Transition Route Group ID>`"
            }
            ResourceType::Version => {
                "`projects/<Project ID>/locations/<Location ID>/agents/<Agent ID>/flows/<Flow ID>/versions/<Version ID>`"
            }
            ResourceType::Webhook => {
                "`projects/<Project ID>/locations/<Location ID>/agents/<Agent ID>/webhooks/<Webhook ID>`"
            }
        }
    }

    fn regex(self) -> &'static Regex {
        // Indexed by discriminant; `ALL` is in declaration order.
        static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
        let patterns = PATTERNS.get_or_init(|| {
            ResourceType::ALL
                .iter()
                .map(|ty| match Regex::new(&ty.pattern()) {
                    Ok(re) => re,
                    Err(_) => unreachable!("static resource pattern is valid"),
                })
                .collect()
        });
        &patterns[self as usize]
    }

    fn pattern(self) -> String {
        let mut pattern = ROOT.to_string();
        for (collection, name, id) in self.segments() {
            pattern.push_str(&format!("/{collection}/(?P<{name}>{id})"));
        }
        pattern.push('$');
        pattern
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| format!("unknown resource type '{s}'"))
    }
}

/// A validated resource id split into its named parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
    pub resource_type: ResourceType,
    pub project: String,
    pub location: String,
    parts: Vec<(&'static str, String)>,
}

impl ResourcePath {
    /// The id of a named part below the location, e.g. `agent` or `flow`.
    pub fn part(&self, name: &str) -> Option<&str> {
        self.parts
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Console URL of the resource, for the types the console can address.
    pub fn console_link(&self) -> Option<String> {
        let agent = format!(
            "{CONSOLE_BASE}/projects/{}/locations/{}/agents/{}",
            self.project,
            self.location,
            self.part("agent")?
        );
        let part = |name: &str| self.part(name).unwrap_or_default().to_string();
        let link = match self.resource_type {
            ResourceType::Agent => agent,
            ResourceType::EntityType => format!("{agent}/entityTypes?id={}", part("entity")),
            ResourceType::Flow => {
                format!("{agent}/flows/{}/flow_creation?pageId=START_PAGE", part("flow"))
            }
            ResourceType::Intent => format!("{agent}/intents?id={}", part("intent")),
            ResourceType::Page => format!(
                "{agent}/flows/{}/flow_creation?pageId={}",
                part("flow"),
                part("page")
            ),
            ResourceType::TestCase => format!("{agent}/testCases/{}", part("test_case")),
            ResourceType::TransitionRouteGroup => format!(
                "{agent}/transitionRouteGroups?flowId={}&routeGroupId={}",
                part("flow"),
                part("transition_route_group")
            ),
            ResourceType::Webhook => format!("{agent}/webhooks?id={}", part("webhook")),
            _ => return None,
        };
        Some(link)
    }
}

/// Check `resource_id` against the layout of `resource_type`.
pub fn parse_resource_path(
    resource_type: ResourceType,
    resource_id: &str,
) -> Result<ResourcePath, ResourcePathError> {
    let invalid = || ResourcePathError::Invalid {
        resource: resource_type.as_str(),
        format: resource_type.format(),
        id: resource_id.to_string(),
    };
    let captures = resource_type.regex().captures(resource_id).ok_or_else(invalid)?;

    let named = |name: &str| captures.name(name).map(|m| m.as_str().to_string());
    let (Some(project), Some(location)) = (named("project"), named("location")) else {
        return Err(invalid());
    };
    let parts = resource_type
        .segments()
        .iter()
        .filter_map(|&(_, name, _)| named(name).map(|value| (name, value)))
        .collect();

    Ok(ResourcePath {
        resource_type,
        project,
        location,
        parts,
    })
}

/// Console link for any resource id whose type can be recognized.
pub fn resource_link(resource_id: &str) -> Result<String, ResourcePathError> {
    ResourceType::ALL
        .into_iter()
        .filter_map(|ty| parse_resource_path(ty, resource_id).ok())
        .find_map(|path| path.console_link())
        .ok_or_else(|| ResourcePathError::NoLink(resource_id.to_string()))
}
