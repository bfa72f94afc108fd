//! Fulfillment builder.
//!
//! A fulfillment is what the agent does when a page is entered or a route
//! or handler fires: send response messages, call a webhook, preset
//! session parameters. [`FulfillmentBuilder`] edits one at a time; the
//! page, route and handler builders reuse its text and table projections.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use cxflow_types::error::BuilderError;
use cxflow_types::fulfillment::{
    Fulfillment, MessageContent, MetadataMessage, OutputAudioText, PlayAudio, ResponseMessage,
    SetParameterAction, TelephonyTransferCall, TextMessage,
};

use super::common::{ProtoSlot, non_blank, require_non_empty, require_non_empty_list};
use crate::table::schema::{self, Resource};
use crate::table::{Cell, DataFrame, TableMode};

/// Parameter presets: parameter name to value. `None` clears the parameter.
pub type ParameterMap = BTreeMap<String, Option<Value>>;

/// Raw content of a response message, one variant per message kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseMessageInput {
    /// One or more text variants, one of which is picked at random.
    Text(Vec<String>),
    Payload(Map<String, Value>),
    ConversationSuccess(Map<String, Value>),
    /// Text or SSML, depending on the [`AudioTextMode`].
    OutputAudioText(String),
    LiveAgentHandoff(Map<String, Value>),
    /// URI of the audio clip.
    PlayAudio(String),
    /// Phone number in E.164 format.
    TelephonyTransferCall(String),
}

impl ResponseMessageInput {
    /// Shorthand for a text message with one or more variants.
    pub fn text<S: Into<String>>(messages: impl IntoIterator<Item = S>) -> Self {
        ResponseMessageInput::Text(messages.into_iter().map(Into::into).collect())
    }
}

/// How output audio text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioTextMode {
    Text,
    Ssml,
}

impl FromStr for AudioTextMode {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(AudioTextMode::Text),
            "ssml" => Ok(AudioTextMode::Ssml),
            other => Err(BuilderError::InvalidArgument(format!(
                "mode should be one of ['text', 'ssml'], got '{other}'"
            ))),
        }
    }
}

/// Builds and edits a single [`Fulfillment`].
#[derive(Debug, Clone, Default)]
pub struct FulfillmentBuilder {
    slot: ProtoSlot<Fulfillment>,
}

impl FulfillmentBuilder {
    /// An empty builder. Call [`create_new_proto_obj`](Self::create_new_proto_obj)
    /// or start from [`from_proto`](Self::from_proto).
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing fulfillment for editing.
    pub fn from_proto(obj: Fulfillment) -> Self {
        Self {
            slot: ProtoSlot::seeded(obj),
        }
    }

    pub fn proto(&self) -> Option<&Fulfillment> {
        self.slot.get()
    }

    /// Take the built fulfillment out of the builder.
    pub fn into_proto(self) -> Option<Fulfillment> {
        self.slot.into_inner()
    }

    /// Create an empty fulfillment with the given webhook settings.
    ///
    /// A `tag` is required whenever a `webhook` is given.
    pub fn create_new_proto_obj(
        &mut self,
        webhook: Option<String>,
        tag: Option<String>,
        return_partial_responses: bool,
        overwrite: bool,
    ) -> Result<&Fulfillment, BuilderError> {
        self.slot.check_vacant(overwrite)?;

        let webhook = non_blank(webhook);
        let tag = non_blank(tag);
        if webhook.is_some() && tag.is_none() {
            return Err(BuilderError::InvalidArgument(
                "`tag` is required when `webhook` is specified".to_string(),
            ));
        }

        let obj = Fulfillment {
            webhook,
            tag,
            return_partial_responses,
            ..Default::default()
        };
        Ok(&*self.slot.install(obj, overwrite)?)
    }

    /// Append a response message. `mode` is only read for output audio
    /// text, where it is required.
    pub fn add_response_message(
        &mut self,
        message: ResponseMessageInput,
        mode: Option<AudioTextMode>,
    ) -> Result<&Fulfillment, BuilderError> {
        self.slot.require()?;
        let message = build_response_message(message, mode)?;

        let obj = self.slot.require_mut()?;
        obj.messages.push(message);
        Ok(&*obj)
    }

    /// Add or replace presets. Existing presets for the same parameter are
    /// overwritten in place.
    pub fn add_parameter_presets(
        &mut self,
        parameter_map: ParameterMap,
    ) -> Result<&Fulfillment, BuilderError> {
        self.slot.require()?;
        for name in parameter_map.keys() {
            require_non_empty(name, "parameter_map")?;
        }

        let obj = self.slot.require_mut()?;
        for (parameter, value) in parameter_map {
            match obj
                .set_parameter_actions
                .iter()
                .position(|a| a.parameter == parameter)
            {
                Some(idx) => obj.set_parameter_actions[idx].value = value,
                None => obj
                    .set_parameter_actions
                    .push(SetParameterAction { parameter, value }),
            }
        }
        Ok(&*obj)
    }

    /// Drop the presets of the named parameters. Unknown names are ignored.
    pub fn remove_parameter_presets<S: AsRef<str>>(
        &mut self,
        parameters: &[S],
    ) -> Result<&Fulfillment, BuilderError> {
        self.slot.require()?;
        require_non_empty_list(parameters, "parameters")?;

        let obj = self.slot.require_mut()?;
        obj.set_parameter_actions
            .retain(|a| !parameters.iter().any(|p| p.as_ref() == a.parameter));
        Ok(&*obj)
    }

    pub fn has_webhook(&self) -> Result<bool, BuilderError> {
        Ok(self.slot.require()?.has_webhook())
    }

    /// Single-row table of the fulfillment.
    pub fn to_dataframe(&self, mode: TableMode) -> Result<DataFrame, BuilderError> {
        Ok(fulfillment_frame(self.slot.require()?, mode))
    }
}

impl fmt::Display for FulfillmentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot.get() {
            Some(obj) => f.write_str(&describe(obj)),
            None => f.write_str("(no Fulfillment)"),
        }
    }
}

fn build_response_message(
    message: ResponseMessageInput,
    mode: Option<AudioTextMode>,
) -> Result<ResponseMessage, BuilderError> {
    let content = match message {
        ResponseMessageInput::Text(text) => {
            require_non_empty_list(&text, "message")?;
            MessageContent::Text(TextMessage { text })
        }
        ResponseMessageInput::Payload(payload) => MessageContent::Payload(payload),
        ResponseMessageInput::ConversationSuccess(metadata) => {
            MessageContent::ConversationSuccess(MetadataMessage { metadata })
        }
        ResponseMessageInput::OutputAudioText(text) => {
            require_non_empty(&text, "message")?;
            match mode {
                Some(AudioTextMode::Text) => {
                    MessageContent::OutputAudioText(OutputAudioText::Text(text))
                }
                Some(AudioTextMode::Ssml) => {
                    MessageContent::OutputAudioText(OutputAudioText::Ssml(text))
                }
                None => {
                    return Err(BuilderError::InvalidArgument(
                        "`mode` is required for output_audio_text".to_string(),
                    ));
                }
            }
        }
        ResponseMessageInput::LiveAgentHandoff(metadata) => {
            MessageContent::LiveAgentHandoff(MetadataMessage { metadata })
        }
        ResponseMessageInput::PlayAudio(audio_uri) => {
            require_non_empty(&audio_uri, "message")?;
            MessageContent::PlayAudio(PlayAudio { audio_uri })
        }
        ResponseMessageInput::TelephonyTransferCall(phone_number) => {
            require_non_empty(&phone_number, "message")?;
            MessageContent::TelephonyTransferCall(TelephonyTransferCall { phone_number })
        }
    };
    Ok(ResponseMessage::new(content))
}

/// Single-row projection of a fulfillment.
pub(crate) fn fulfillment_frame(obj: &Fulfillment, mode: TableMode) -> DataFrame {
    let mut df = DataFrame::with_columns(schema::columns(Resource::Fulfillment, mode));
    df.push_row(fulfillment_cells(obj, mode));
    df
}

/// The fulfillment columns of one row, for callers that splice them into a
/// wider row.
pub(crate) fn fulfillment_cells(obj: &Fulfillment, mode: TableMode) -> Vec<(&'static str, Cell)> {
    match mode {
        TableMode::Basic => vec![
            ("has_fulfillment", Cell::from(!obj.is_empty())),
            ("has_fulfillment_webhook", Cell::from(obj.has_webhook())),
        ],
        TableMode::Advanced => {
            let presets: Map<String, Value> = obj
                .set_parameter_actions
                .iter()
                .map(|a| (a.parameter.clone(), a.value.clone().unwrap_or(Value::Null)))
                .collect();
            vec![
                ("messages", json_cell(&obj.messages, obj.messages.is_empty())),
                ("preset_parameters", json_cell(&presets, presets.is_empty())),
                (
                    "conditional_cases",
                    json_cell(&obj.conditional_cases, obj.conditional_cases.is_empty()),
                ),
                ("webhook", Cell::from(obj.webhook.clone())),
                ("webhook_tag", Cell::from(obj.tag.clone())),
                (
                    "return_partial_responses",
                    Cell::from(obj.return_partial_responses),
                ),
            ]
        }
    }
}

fn json_cell<T: serde::Serialize>(value: &T, empty: bool) -> Cell {
    if empty {
        return Cell::Null;
    }
    Cell::from(serde_json::to_string(value).ok())
}

fn describe_message(message: &ResponseMessage) -> String {
    let body = match &message.content {
        MessageContent::Text(t) => t.text.join(" | "),
        MessageContent::ConversationSuccess(m) | MessageContent::LiveAgentHandoff(m) => {
            Value::Object(m.metadata.clone()).to_string()
        }
        MessageContent::OutputAudioText(OutputAudioText::Text(t)) => format!("(text) {t}"),
        MessageContent::OutputAudioText(OutputAudioText::Ssml(s)) => format!("(ssml) {s}"),
        MessageContent::PlayAudio(a) => a.audio_uri.clone(),
        MessageContent::TelephonyTransferCall(t) => t.phone_number.clone(),
        MessageContent::Payload(p)
        | MessageContent::EndInteraction(p)
        | MessageContent::MixedAudio(p)
        | MessageContent::KnowledgeInfoCard(p) => Value::Object(p.clone()).to_string(),
    };
    match &message.channel {
        Some(channel) => format!("{} [{channel}]: {body}", message.kind()),
        None => format!("{}: {body}", message.kind()),
    }
}

/// Text rendering of a fulfillment.
pub(crate) fn describe(obj: &Fulfillment) -> String {
    let messages: String = obj
        .messages
        .iter()
        .map(|m| format!("\n\t{}", describe_message(m)))
        .collect();
    let presets: String = obj
        .set_parameter_actions
        .iter()
        .map(|a| {
            let value = a
                .value
                .as_ref()
                .map_or_else(|| "null".to_string(), Value::to_string);
            format!("\n\t{}: {value}", a.parameter)
        })
        .collect();

    format!(
        "webhook: {}\nwebhook_tag: {}\nreturn_partial_responses: {}\nmessages:{messages}\nparameter_presets:{presets}",
        obj.webhook.as_deref().unwrap_or_default(),
        obj.tag.as_deref().unwrap_or_default(),
        obj.return_partial_responses,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn created() -> FulfillmentBuilder {
        let mut fb = FulfillmentBuilder::new();
        fb.create_new_proto_obj(None, None, false, false).unwrap();
        fb
    }

    #[test]
    fn test_webhook_requires_tag() {
        let mut fb = FulfillmentBuilder::new();
        let err = fb
            .create_new_proto_obj(Some("webhooks/w".to_string()), None, false, false)
            .unwrap_err();
        assert!(matches!(err, BuilderError::InvalidArgument(_)));
        assert!(fb.proto().is_none());

        fb.create_new_proto_obj(
            Some("webhooks/w".to_string()),
            Some("lookup".to_string()),
            true,
            false,
        )
        .unwrap();
        assert!(fb.has_webhook().unwrap());
    }

    #[test]
    fn test_create_twice_requires_overwrite() {
        let mut fb = created();
        assert_eq!(
            fb.create_new_proto_obj(None, None, true, false).unwrap_err(),
            BuilderError::AlreadyExists("Fulfillment")
        );
        let ff = fb.create_new_proto_obj(None, None, true, true).unwrap();
        assert!(ff.return_partial_responses);
    }

    #[test]
    fn test_add_response_message_requires_object() {
        let mut fb = FulfillmentBuilder::new();
        let err = fb
            .add_response_message(ResponseMessageInput::text(["hi"]), None)
            .unwrap_err();
        assert_eq!(err, BuilderError::MissingObject("Fulfillment"));
    }

    #[test]
    fn test_add_text_and_audio_messages() {
        let mut fb = created();
        fb.add_response_message(ResponseMessageInput::text(["Hi", "Hello"]), None)
            .unwrap();
        let ff = fb
            .add_response_message(
                ResponseMessageInput::OutputAudioText("<speak>Hi</speak>".to_string()),
                Some(AudioTextMode::Ssml),
            )
            .unwrap();

        assert_eq!(ff.messages.len(), 2);
        assert_eq!(ff.messages[0].kind(), "text");
        assert_eq!(
            ff.messages[1].content,
            MessageContent::OutputAudioText(OutputAudioText::Ssml("<speak>Hi</speak>".to_string()))
        );
        assert!(ff.messages[1].channel.is_none());
    }

    #[test]
    fn test_audio_text_needs_mode() {
        let mut fb = created();
        let err = fb
            .add_response_message(ResponseMessageInput::OutputAudioText("hi".to_string()), None)
            .unwrap_err();
        assert!(err.to_string().contains("mode"));
        assert!("wav".parse::<AudioTextMode>().is_err());
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let mut fb = created();
        assert!(
            fb.add_response_message(ResponseMessageInput::Text(Vec::new()), None)
                .is_err()
        );
        assert!(fb.proto().unwrap().messages.is_empty());
    }

    #[test]
    fn test_parameter_presets_replace_and_remove() {
        let mut fb = created();
        fb.add_parameter_presets(ParameterMap::from([
            ("email".to_string(), Some(json!("a@b.c"))),
            ("retries".to_string(), Some(json!(1))),
        ]))
        .unwrap();
        fb.add_parameter_presets(ParameterMap::from([("email".to_string(), None)]))
            .unwrap();

        let ff = fb.proto().unwrap();
        assert_eq!(ff.set_parameter_actions.len(), 2);
        let email = ff
            .set_parameter_actions
            .iter()
            .find(|a| a.parameter == "email")
            .unwrap();
        assert!(email.value.is_none());

        let ff = fb.remove_parameter_presets(&["email"]).unwrap();
        assert_eq!(ff.set_parameter_actions.len(), 1);
        assert_eq!(ff.set_parameter_actions[0].parameter, "retries");
    }

    #[test]
    fn test_dataframe_basic_and_advanced() {
        let mut fb = created();
        fb.add_response_message(ResponseMessageInput::text(["Hi"]), None)
            .unwrap();

        let basic = fb.to_dataframe(TableMode::Basic).unwrap();
        assert_eq!(basic.columns(), ["has_fulfillment", "has_fulfillment_webhook"]);
        assert_eq!(basic.get(0, "has_fulfillment"), Some(&Cell::Bool(true)));
        assert_eq!(basic.get(0, "has_fulfillment_webhook"), Some(&Cell::Bool(false)));

        let advanced = fb.to_dataframe(TableMode::Advanced).unwrap();
        assert_eq!(advanced.len(), 1);
        assert_eq!(
            advanced.get(0, "messages"),
            Some(&Cell::from(r#"[{"text":{"text":["Hi"]}}]"#))
        );
        assert_eq!(advanced.get(0, "preset_parameters"), Some(&Cell::Null));
        assert_eq!(advanced.get(0, "webhook"), Some(&Cell::Null));
    }

    #[test]
    fn test_empty_fulfillment_has_no_fulfillment() {
        let fb = FulfillmentBuilder::from_proto(Fulfillment::default());
        let df = fb.to_dataframe(TableMode::Basic).unwrap();
        assert_eq!(df.get(0, "has_fulfillment"), Some(&Cell::Bool(false)));
    }

    #[test]
    fn test_display_lists_messages_and_presets() {
        let mut fb = created();
        fb.add_response_message(ResponseMessageInput::text(["Hi"]), None)
            .unwrap();
        fb.add_parameter_presets(ParameterMap::from([("email".to_string(), None)]))
            .unwrap();
        let text = fb.to_string();
        assert!(text.contains("text: Hi"));
        assert!(text.contains("email: null"));
        assert_eq!(FulfillmentBuilder::new().to_string(), "(no Fulfillment)");
    }

    #[test]
    fn test_channel_messages_survive_edit_and_export() {
        let ff: Fulfillment = serde_json::from_value(json!({
            "messages": [{"text": {"text": ["Hi"]}, "channel": "web"}]
        }))
        .unwrap();
        let mut fb = FulfillmentBuilder::from_proto(ff);
        fb.add_response_message(ResponseMessageInput::text(["Bye"]), None)
            .unwrap();

        assert!(fb.to_string().contains("text [web]: Hi"));
        let advanced = fb.to_dataframe(TableMode::Advanced).unwrap();
        assert_eq!(
            advanced.get(0, "messages"),
            Some(&Cell::from(
                r#"[{"text":{"text":["Hi"]},"channel":"web"},{"text":{"text":["Bye"]}}]"#
            ))
        );
    }
}
