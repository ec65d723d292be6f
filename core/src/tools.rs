//! Jewellery description generator on the tools page.

use serde::{Deserialize, Serialize};

use crate::assistant::{AssistantReply, AssistantRequest, ConversationApi};
use crate::error::AssistantError;
use crate::i18n::keys;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Elegant,
    Luxurious,
    Modern,
    Playful,
    Traditional,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Elegant,
        Tone::Luxurious,
        Tone::Modern,
        Tone::Playful,
        Tone::Traditional,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Elegant => "Elegant",
            Tone::Luxurious => "Luxurious",
            Tone::Modern => "Modern",
            Tone::Playful => "Playful",
            Tone::Traditional => "Traditional",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Tone::ALL.into_iter().find(|tone| tone.as_str() == value)
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Tone::Elegant => keys::tools::TONE_ELEGANT,
            Tone::Luxurious => keys::tools::TONE_LUXURIOUS,
            Tone::Modern => keys::tools::TONE_MODERN,
            Tone::Playful => keys::tools::TONE_PLAYFUL,
            Tone::Traditional => keys::tools::TONE_TRADITIONAL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DescriptionBrief {
    pub product_type: String,
    pub features: String,
    pub audience: String,
    pub tone: Tone,
}

impl DescriptionBrief {
    pub fn is_complete(&self) -> bool {
        !self.product_type.trim().is_empty() && !self.features.trim().is_empty()
    }

    pub fn prompt(&self) -> String {
        let audience = match self.audience.trim() {
            "" => "General",
            audience => audience,
        };
        format!(
            "Generate a compelling e-commerce product description for a jewelry piece. \
             The description should be around 100-150 words, well-structured with a captivating \
             title, a descriptive paragraph, and a list of key specifications.\n\n\
             **Jewelry Details:**\n\
             - **Product Type:** {}\n\
             - **Key Features:** {}\n\
             - **Target Audience:** {}\n\
             - **Tone of Voice:** {}",
            self.product_type.trim(),
            self.features.trim(),
            audience,
            self.tone.as_str()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// Product type or features missing; nothing was sent.
    Incomplete,
    Assistant(AssistantError),
}

/// One request, no history, no tools.
pub async fn generate_description(
    api: &dyn ConversationApi,
    brief: &DescriptionBrief,
) -> Result<String, GenerateError> {
    if !brief.is_complete() {
        return Err(GenerateError::Incomplete);
    }
    let request = AssistantRequest::single(brief.prompt());
    match api.send(&request).await {
        Ok(AssistantReply::Text(text)) => Ok(text),
        Ok(AssistantReply::FieldUpdates(_)) => {
            Err(GenerateError::Assistant(AssistantError::EmptyResponse))
        }
        Err(e) => {
            log::error!("description generation failed: {}", e);
            Err(GenerateError::Assistant(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use async_trait::async_trait;

    use super::*;

    struct Echo {
        seen: RefCell<Vec<AssistantRequest>>,
    }

    #[async_trait(?Send)]
    impl ConversationApi for Echo {
        async fn send(&self, request: &AssistantRequest) -> Result<AssistantReply, AssistantError> {
            self.seen.borrow_mut().push(request.clone());
            Ok(AssistantReply::Text("A radiant ring.".into()))
        }
    }

    #[test]
    fn prompt_defaults_audience_to_general() {
        let brief = DescriptionBrief {
            product_type: "Diamond ring".into(),
            features: "18k gold".into(),
            audience: "  ".into(),
            tone: Tone::Modern,
        };
        let prompt = brief.prompt();
        assert!(prompt.contains("- **Target Audience:** General"));
        assert!(prompt.contains("- **Tone of Voice:** Modern"));
        assert!(prompt.contains("- **Product Type:** Diamond ring"));
    }

    #[tokio::test]
    async fn incomplete_brief_is_not_sent() {
        let api = Echo {
            seen: RefCell::new(Vec::new()),
        };
        let brief = DescriptionBrief {
            product_type: "Necklace".into(),
            ..DescriptionBrief::default()
        };
        assert_eq!(generate_description(&api, &brief).await, Err(GenerateError::Incomplete));
        assert!(api.seen.borrow().is_empty());
    }

    #[tokio::test]
    async fn complete_brief_sends_one_plain_request() {
        let api = Echo {
            seen: RefCell::new(Vec::new()),
        };
        let brief = DescriptionBrief {
            product_type: "Necklace".into(),
            features: "Kundan work".into(),
            ..DescriptionBrief::default()
        };
        assert_eq!(
            generate_description(&api, &brief).await,
            Ok("A radiant ring.".to_string())
        );
        let seen = api.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].tool.is_none());
        assert!(seen[0].system_instruction.is_none());
    }
}
