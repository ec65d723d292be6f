//! Wire format of the Gemini `generateContent` endpoint.
//!
//! Only the parts the site uses are modeled. The HTTP call itself lives in
//! the frontend; everything here is plain serde.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{
    AssistantReply, AssistantRequest, FieldTool, FieldUpdateAck, FieldUpdateRequest, Message,
    UPDATE_FORM_FIELD,
};
use crate::error::AssistantError;

pub const MODEL: &str = "gemini-2.5-flash";
pub const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub fn endpoint(model: &str) -> String {
    format!("{}/models/{}:generateContent", API_BASE, model)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub response: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl FunctionDeclaration {
    pub fn update_form_field(tool: &FieldTool) -> Self {
        Self {
            name: UPDATE_FORM_FIELD.to_string(),
            description: "Updates a field in the Letter of Intent form.".to_string(),
            parameters: json!({
                "type": "OBJECT",
                "properties": {
                    "fieldName": {
                        "type": "STRING",
                        "enum": tool.fields,
                        "description": tool.describe_fields(),
                    },
                    "value": {
                        "type": "STRING",
                        "description": tool.describe_values(),
                    },
                },
                "required": ["fieldName", "value"],
            }),
        }
    }
}

fn call_part(request: &FieldUpdateRequest) -> Part {
    Part {
        function_call: Some(FunctionCall {
            id: request.call_id.clone(),
            name: UPDATE_FORM_FIELD.to_string(),
            args: json!({ "fieldName": request.field, "value": request.value }),
        }),
        ..Part::default()
    }
}

fn ack_part(ack: &FieldUpdateAck) -> Part {
    let response = if ack.applied {
        json!({ "result": ack.message })
    } else {
        json!({ "error": ack.message })
    };
    Part {
        function_response: Some(FunctionResponse {
            id: ack.call_id.clone(),
            name: UPDATE_FORM_FIELD.to_string(),
            response,
        }),
        ..Part::default()
    }
}

fn content(role: &str, parts: Vec<Part>) -> Content {
    Content {
        role: Some(role.to_string()),
        parts,
    }
}

impl From<&Message> for Content {
    fn from(message: &Message) -> Self {
        match message {
            Message::UserText(text) => content("user", vec![Part::text(text.clone())]),
            Message::AssistantText(text) => content("model", vec![Part::text(text.clone())]),
            Message::FieldUpdates(requests) => {
                content("model", requests.iter().map(call_part).collect())
            }
            Message::FieldAcks(acks) => content("user", acks.iter().map(ack_part).collect()),
        }
    }
}

impl From<&AssistantRequest> for GenerateContentRequest {
    fn from(request: &AssistantRequest) -> Self {
        Self {
            system_instruction: request.system_instruction.as_ref().map(|instruction| Content {
                role: None,
                parts: vec![Part::text(instruction.clone())],
            }),
            contents: request.messages.iter().map(Content::from).collect(),
            tools: request.tool.as_ref().map(|tool| {
                vec![Tool {
                    function_declarations: vec![FunctionDeclaration::update_form_field(tool)],
                }]
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

fn arg_as_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

impl GenerateContentResponse {
    /// Field updates win over text when the model sends both; the text is only logged.
    pub fn into_reply(self) -> Result<AssistantReply, AssistantError> {
        let parts = self
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts)
            .ok_or(AssistantError::EmptyResponse)?;

        let mut text = String::new();
        let mut updates = Vec::new();
        for part in parts {
            if let Some(call) = part.function_call {
                if call.name != UPDATE_FORM_FIELD {
                    log::warn!("ignoring call to undeclared function '{}'", call.name);
                    continue;
                }
                let field = arg_as_string(call.args.get("fieldName"));
                let value = arg_as_string(call.args.get("value"));
                match (field, value) {
                    (Some(field), Some(value)) => updates.push(FieldUpdateRequest {
                        call_id: call.id,
                        field,
                        value,
                    }),
                    _ => log::warn!("ignoring {} call with args {}", call.name, call.args),
                }
            } else if let Some(part_text) = part.text {
                text.push_str(&part_text);
            }
        }

        if !updates.is_empty() {
            if !text.trim().is_empty() {
                log::debug!(
                    "dropping text sent alongside {} field update(s): {}",
                    updates.len(),
                    text.trim()
                );
            }
            Ok(AssistantReply::FieldUpdates(updates))
        } else if !text.trim().is_empty() {
            Ok(AssistantReply::Text(text))
        } else {
            Err(AssistantError::EmptyResponse)
        }
    }
}

/// Error body the API sends with non-2xx statuses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Maps a non-2xx response to an `AssistantError`, using the error body when it parses.
pub fn api_error(status: u16, body: &str) -> AssistantError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.trim().to_string());
    AssistantError::Api { status, message }
}

/// Parses a 2xx body into a reply.
pub fn parse_reply(body: &str) -> Result<AssistantReply, AssistantError> {
    serde_json::from_str::<GenerateContentResponse>(body)
        .map_err(|e| AssistantError::Decode(e.to_string()))?
        .into_reply()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_history_tool_and_acks() {
        let request = AssistantRequest {
            system_instruction: Some("fill it".into()),
            messages: vec![
                Message::UserText("We are Acme".into()),
                Message::FieldUpdates(vec![FieldUpdateRequest {
                    call_id: Some("c1".into()),
                    field: "companyName".into(),
                    value: "Acme".into(),
                }]),
                Message::FieldAcks(vec![FieldUpdateAck {
                    call_id: Some("c1".into()),
                    field: "companyName".into(),
                    applied: true,
                    message: "Successfully updated companyName to Acme".into(),
                }]),
            ],
            tool: Some(FieldTool::new(vec!["companyName"])),
        };
        let wire = serde_json::to_value(GenerateContentRequest::from(&request)).unwrap();

        assert_eq!(wire["systemInstruction"]["parts"][0]["text"], "fill it");
        assert_eq!(wire["contents"][0]["role"], "user");
        assert_eq!(wire["contents"][1]["role"], "model");
        assert_eq!(wire["contents"][1]["parts"][0]["functionCall"]["args"]["value"], "Acme");
        assert_eq!(
            wire["contents"][2]["parts"][0]["functionResponse"]["response"]["result"],
            "Successfully updated companyName to Acme"
        );
        assert_eq!(wire["contents"][2]["parts"][0]["functionResponse"]["id"], "c1");
        let declaration = &wire["tools"][0]["functionDeclarations"][0];
        assert_eq!(declaration["name"], "updateFormField");
        assert_eq!(declaration["parameters"]["properties"]["fieldName"]["enum"][0], "companyName");
    }

    #[test]
    fn plain_prompt_has_no_tools_or_instruction() {
        let wire = serde_json::to_value(GenerateContentRequest::from(&AssistantRequest::single("hi")))
            .unwrap();
        assert!(wire.get("tools").is_none());
        assert!(wire.get("systemInstruction").is_none());
        assert_eq!(wire["contents"][0]["parts"][0]["text"], "hi");
    }

    #[test]
    fn function_calls_become_field_updates_in_order() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"functionCall": {"name": "updateFormField", "args": {"fieldName": "city", "value": "Jaipur"}}},
                        {"functionCall": {"name": "updateFormField", "args": {"fieldName": "interestLevel", "value": 4}}},
                        {"functionCall": {"name": "somethingElse", "args": {}}}
                    ]
                },
                "finishReason": "STOP"
            }]
        }"#;
        assert_eq!(
            parse_reply(body),
            Ok(AssistantReply::FieldUpdates(vec![
                FieldUpdateRequest::new("city", "Jaipur"),
                FieldUpdateRequest::new("interestLevel", "4"),
            ]))
        );
    }

    #[test]
    fn updates_win_over_text_in_the_same_candidate() {
        let body = r#"{"candidates":[{"content":{"parts":[
            {"text":"Let me fill that in."},
            {"functionCall":{"id":"c7","name":"updateFormField","args":{"fieldName":"businessType","value":"निर्माता"}}}
        ]}}]}"#;
        assert_eq!(
            parse_reply(body),
            Ok(AssistantReply::FieldUpdates(vec![FieldUpdateRequest {
                call_id: Some("c7".into()),
                field: "businessType".into(),
                value: "निर्माता".into(),
            }]))
        );
    }

    #[test]
    fn declaration_lists_accepted_values() {
        let tool = FieldTool::new(vec!["turnover"])
            .with_choices("turnover", vec!["below-1cr".into(), "1cr-5cr".into()]);
        let declaration = FunctionDeclaration::update_form_field(&tool);
        assert_eq!(
            declaration.parameters["properties"]["value"]["description"],
            "The value to set for the form field. For \"turnover\" use one of: \"below-1cr\", \"1cr-5cr\"."
        );
    }

    #[test]
    fn text_parts_are_joined() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Hello "},{"text":"there"}]}}]}"#;
        assert_eq!(parse_reply(body), Ok(AssistantReply::Text("Hello there".into())));
    }

    #[test]
    fn empty_and_garbage_bodies_are_errors() {
        assert_eq!(parse_reply(r#"{"candidates":[]}"#), Err(AssistantError::EmptyResponse));
        assert!(matches!(parse_reply("<html>"), Err(AssistantError::Decode(_))));
    }

    #[test]
    fn api_error_prefers_the_structured_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            api_error(400, body),
            AssistantError::Api {
                status: 400,
                message: "API key not valid".into()
            }
        );
        assert_eq!(
            api_error(502, "Bad Gateway\n"),
            AssistantError::Api {
                status: 502,
                message: "Bad Gateway".into()
            }
        );
    }
}
