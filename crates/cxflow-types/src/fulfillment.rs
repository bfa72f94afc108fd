//! Fulfillment messages: the responses, webhook call and parameter presets
//! executed when a page is entered or a route/handler fires.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A bundle of response messages plus an optional webhook invocation and
/// parameter presets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fulfillment {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<ResponseMessage>,
    /// Webhook resource id, `projects/<P>/locations/<L>/agents/<A>/webhooks/<W>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub return_partial_responses: bool,
    /// Identifies the fulfillment to the webhook. Required with `webhook`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set_parameter_actions: Vec<SetParameterAction>,
    /// Conditional response cases, carried through untouched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditional_cases: Vec<Value>,
}

impl Fulfillment {
    /// True when no field is set (the message would serialize to `{}`).
    pub fn is_empty(&self) -> bool {
        self == &Fulfillment::default()
    }

    pub fn has_webhook(&self) -> bool {
        self.webhook.as_deref().is_some_and(|w| !w.is_empty())
    }
}

/// A single agent response: one kind of content plus the optional channel
/// and language it is restricted to.
///
/// Keys the API adds next to the content (`responseType`, `source`) are
/// ignored on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMessage {
    #[serde(flatten)]
    pub content: MessageContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

impl ResponseMessage {
    pub fn new(content: MessageContent) -> Self {
        Self {
            content,
            channel: None,
            language_code: None,
        }
    }

    /// The API name of the message kind, e.g. `text` or `play_audio`.
    pub fn kind(&self) -> &'static str {
        self.content.kind()
    }
}

impl From<MessageContent> for ResponseMessage {
    fn from(content: MessageContent) -> Self {
        Self::new(content)
    }
}

/// The content of a response message. Exactly one kind is set on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageContent {
    Text(TextMessage),
    Payload(Map<String, Value>),
    ConversationSuccess(MetadataMessage),
    OutputAudioText(OutputAudioText),
    LiveAgentHandoff(MetadataMessage),
    PlayAudio(PlayAudio),
    TelephonyTransferCall(TelephonyTransferCall),
    /// Output only. Carried through untouched.
    EndInteraction(Map<String, Value>),
    /// Output only. Carried through untouched.
    MixedAudio(Map<String, Value>),
    KnowledgeInfoCard(Map<String, Value>),
}

impl MessageContent {
    pub fn kind(&self) -> &'static str {
        match self {
            MessageContent::Text(_) => "text",
            MessageContent::Payload(_) => "payload",
            MessageContent::ConversationSuccess(_) => "conversation_success",
            MessageContent::OutputAudioText(_) => "output_audio_text",
            MessageContent::LiveAgentHandoff(_) => "live_agent_handoff",
            MessageContent::PlayAudio(_) => "play_audio",
            MessageContent::TelephonyTransferCall(_) => "telephony_transfer_call",
            MessageContent::EndInteraction(_) => "end_interaction",
            MessageContent::MixedAudio(_) => "mixed_audio",
            MessageContent::KnowledgeInfoCard(_) => "knowledge_info_card",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextMessage {
    #[serde(default)]
    pub text: Vec<String>,
}

/// Free-form metadata used by conversation success and live agent handoff.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetadataMessage {
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputAudioText {
    Text(String),
    Ssml(String),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayAudio {
    pub audio_uri: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelephonyTransferCall {
    /// E.164 phone number.
    pub phone_number: String,
}

/// Presets a session parameter. A `None` value clears the parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetParameterAction {
    pub parameter: String,
    #[serde(default)]
    pub value: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_fulfillment_is_empty() {
        assert!(Fulfillment::default().is_empty());
        let ff = Fulfillment {
            return_partial_responses: true,
            ..Default::default()
        };
        assert!(!ff.is_empty());
    }

    #[test]
    fn test_has_webhook_ignores_blank_id() {
        let mut ff = Fulfillment {
            webhook: Some(String::new()),
            ..Default::default()
        };
        assert!(!ff.has_webhook());
        ff.webhook = Some("projects/p/locations/global/agents/a/webhooks/w".to_string());
        assert!(ff.has_webhook());
    }

    #[test]
    fn test_response_message_wire_shape() {
        let msg = ResponseMessage::new(MessageContent::Text(TextMessage {
            text: vec!["Hi there".to_string()],
        }));
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"text": {"text": ["Hi there"]}})
        );

        let audio: ResponseMessage =
            serde_json::from_value(json!({"outputAudioText": {"ssml": "<speak/>"}})).unwrap();
        assert_eq!(
            audio.content,
            MessageContent::OutputAudioText(OutputAudioText::Ssml("<speak/>".to_string()))
        );
        assert_eq!(audio.kind(), "output_audio_text");
    }

    #[test]
    fn test_response_message_accepts_channel_and_language() {
        let msg: ResponseMessage =
            serde_json::from_value(json!({"text": {"text": ["Hi"]}, "channel": "web"})).unwrap();
        assert_eq!(msg.kind(), "text");
        assert_eq!(msg.channel.as_deref(), Some("web"));
        assert!(msg.language_code.is_none());

        let msg: ResponseMessage = serde_json::from_value(json!({
            "languageCode": "en",
            "text": {"text": ["Hi"], "allowPlaybackInterruption": false},
            "responseType": "ENTRY_PROMPT"
        }))
        .unwrap();
        assert_eq!(msg.language_code.as_deref(), Some("en"));
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"text": {"text": ["Hi"]}, "languageCode": "en"})
        );
    }

    #[test]
    fn test_response_message_without_content_is_rejected() {
        assert!(serde_json::from_value::<ResponseMessage>(json!({"channel": "web"})).is_err());
    }

    #[test]
    fn test_fulfillment_with_channel_messages() {
        let ff: Fulfillment = serde_json::from_str(
            r#"{"messages":[{"text":{"text":["Hi"]},"channel":"web"},{"payload":{"a":1},"languageCode":"en"}]}"#,
        )
        .unwrap();
        assert_eq!(ff.messages.len(), 2);
        assert_eq!(ff.messages[1].kind(), "payload");
        assert_eq!(ff.messages[1].language_code.as_deref(), Some("en"));
    }

    #[test]
    fn test_fulfillment_deserializes_camel_case() {
        let ff: Fulfillment = serde_json::from_value(json!({
            "webhook": "projects/p/locations/global/agents/a/webhooks/w",
            "tag": "lookup",
            "returnPartialResponses": true,
            "setParameterActions": [{"parameter": "email", "value": null}]
        }))
        .unwrap();
        assert_eq!(ff.tag.as_deref(), Some("lookup"));
        assert!(ff.return_partial_responses);
        assert_eq!(ff.set_parameter_actions[0].parameter, "email");
        assert!(ff.set_parameter_actions[0].value.is_none());
    }
}
