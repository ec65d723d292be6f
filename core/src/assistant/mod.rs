//! Conversational assistant: what goes over the wire, what the visitor
//! sees, and the loop that lets the model fill in a form.

pub mod gemini;
mod session;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AssistantError, FieldError};

pub use session::{run_turn, AssistantSession, Step};

/// Name of the single callable the form assistant declares.
pub const UPDATE_FORM_FIELD: &str = "updateFormField";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One line of the visible conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// The model asking for one form field to be set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdateRequest {
    pub call_id: Option<String>,
    pub field: String,
    pub value: String,
}

impl FieldUpdateRequest {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            call_id: None,
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Answer to one `FieldUpdateRequest`, sent back before the model continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdateAck {
    pub call_id: Option<String>,
    pub field: String,
    pub applied: bool,
    pub message: String,
}

impl FieldUpdateAck {
    pub fn for_result(request: &FieldUpdateRequest, result: &Result<(), FieldError>) -> Self {
        let (applied, message) = match result {
            Ok(()) => (
                true,
                format!("Successfully updated {} to {}", request.field, request.value),
            ),
            Err(e) => (false, e.to_string()),
        };
        Self {
            call_id: request.call_id.clone(),
            field: request.field.clone(),
            applied,
            message,
        }
    }
}

/// Wire-level history entry. Tool calls and their answers stay in the
/// history so the model sees what it already filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    UserText(String),
    AssistantText(String),
    FieldUpdates(Vec<FieldUpdateRequest>),
    FieldAcks(Vec<FieldUpdateAck>),
}

/// Declares `updateFormField` and the field names it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTool {
    pub fields: Vec<&'static str>,
    /// Accepted values of closed-choice fields, by field name.
    pub choices: Vec<(&'static str, Vec<String>)>,
}

impl FieldTool {
    pub fn new(fields: Vec<&'static str>) -> Self {
        Self {
            fields,
            choices: Vec::new(),
        }
    }

    pub fn with_choices(mut self, field: &'static str, values: Vec<String>) -> Self {
        self.choices.push((field, values));
        self
    }

    pub fn describe_fields(&self) -> String {
        let quoted: Vec<String> = self.fields.iter().map(|f| format!("\"{}\"", f)).collect();
        format!(
            "The name of the form field to update. Must be one of: {}.",
            quoted.join(", ")
        )
    }

    pub fn describe_values(&self) -> String {
        let mut description = String::from("The value to set for the form field.");
        for (field, values) in &self.choices {
            let quoted: Vec<String> = values.iter().map(|v| format!("\"{}\"", v)).collect();
            description.push_str(&format!(" For \"{}\" use one of: {}.", field, quoted.join(", ")));
        }
        description
    }
}

/// Everything one call to the conversational API needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantRequest {
    pub system_instruction: Option<String>,
    /// Full history, newest last.
    pub messages: Vec<Message>,
    pub tool: Option<FieldTool>,
}

impl AssistantRequest {
    /// A single prompt with no history and no tools.
    pub fn single(prompt: impl Into<String>) -> Self {
        Self {
            system_instruction: None,
            messages: vec![Message::UserText(prompt.into())],
            tool: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantReply {
    Text(String),
    FieldUpdates(Vec<FieldUpdateRequest>),
}

#[async_trait(?Send)]
pub trait ConversationApi {
    async fn send(&self, request: &AssistantRequest) -> Result<AssistantReply, AssistantError>;
}

/// Something the assistant can write into by field name.
pub trait FieldTarget {
    fn apply_update(&mut self, name: &str, value: &str) -> Result<(), FieldError>;
}

/// Target for conversations without a form; every update is unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFields;

impl FieldTarget for NoFields {
    fn apply_update(&mut self, name: &str, _value: &str) -> Result<(), FieldError> {
        Err(FieldError::UnknownField(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ack_messages_describe_the_outcome() {
        let request = FieldUpdateRequest::new("companyName", "Acme Gems");
        let ok = FieldUpdateAck::for_result(&request, &Ok(()));
        assert!(ok.applied);
        assert_eq!(ok.message, "Successfully updated companyName to Acme Gems");

        let unknown = FieldUpdateRequest::new("foo", "bar");
        let err = FieldUpdateAck::for_result(&unknown, &Err(FieldError::UnknownField("foo".into())));
        assert!(!err.applied);
        assert_eq!(err.message, "unknown field 'foo'");
    }

    #[test]
    fn tool_description_lists_fields() {
        let tool = FieldTool::new(vec!["companyName", "city"]);
        assert_eq!(
            tool.describe_fields(),
            "The name of the form field to update. Must be one of: \"companyName\", \"city\"."
        );
        assert_eq!(tool.describe_values(), "The value to set for the form field.");
    }

    #[test]
    fn value_description_lists_choices() {
        let tool = FieldTool::new(vec!["businessType", "city"])
            .with_choices("businessType", vec!["Retail".into(), "खुदरा विक्रेता".into()]);
        assert_eq!(
            tool.describe_values(),
            "The value to set for the form field. \
             For \"businessType\" use one of: \"Retail\", \"खुदरा विक्रेता\"."
        );
    }
}
