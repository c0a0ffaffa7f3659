//! Outbound schema: the legacy Office 365 connector `MessageCard`.
//!
//! Reference: <https://learn.microsoft.com/en-us/microsoftteams/platform/webhooks-and-connectors/how-to/connectors-using#example-of-connector-message>

use serde::{Deserialize, Serialize};

pub const CARD_TYPE: &str = "MessageCard";
pub const CARD_CONTEXT: &str = "http://schema.org/extensions";
pub const THEME_COLOR: &str = "0076D7";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCard {
    #[serde(rename = "@type")]
    pub card_type: String,
    #[serde(rename = "@context")]
    pub context: String,
    pub theme_color: String,
    pub summary: String,
    pub sections: Vec<MessageSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSection {
    pub activity_title: String,
    pub activity_subtitle: String,
    pub activity_text: String,
    pub activity_image: String,
    pub markdown: bool,
    pub facts: Vec<MessageFact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageFact {
    pub name: String,
    pub value: String,
}

impl MessageCard {
    /// Build a card with the fixed type, context and theme colour.
    pub fn new(summary: impl Into<String>, sections: Vec<MessageSection>) -> Self {
        Self {
            card_type: CARD_TYPE.to_string(),
            context: CARD_CONTEXT.to_string(),
            theme_color: THEME_COLOR.to_string(),
            summary: summary.into(),
            sections,
        }
    }
}

impl MessageFact {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> MessageCard {
        MessageCard::new(
            "disk-full",
            vec![MessageSection {
                activity_title: "disk-full".into(),
                activity_subtitle: "Disk usage above 95%".into(),
                activity_text: "Alert <em>disk-full</em> has been fired".into(),
                activity_image: "https://example.com/icon.png".into(),
                markdown: true,
                facts: vec![MessageFact::new("Threshold", "95")],
            }],
        )
    }

    #[test]
    fn serializes_with_connector_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "@type": "MessageCard",
                "@context": "http://schema.org/extensions",
                "themeColor": "0076D7",
                "summary": "disk-full",
                "sections": [{
                    "activityTitle": "disk-full",
                    "activitySubtitle": "Disk usage above 95%",
                    "activityText": "Alert <em>disk-full</em> has been fired",
                    "activityImage": "https://example.com/icon.png",
                    "markdown": true,
                    "facts": [{ "name": "Threshold", "value": "95" }]
                }]
            })
        );
    }

    #[test]
    fn wire_format_decodes_back_to_equal_card() {
        let card = sample();
        let wire = serde_json::to_string(&card).unwrap();
        let back: MessageCard = serde_json::from_str(&wire).unwrap();
        assert_eq!(back, card);
    }

    #[test]
    fn new_fills_fixed_constants() {
        let card = MessageCard::new("x", Vec::new());
        assert_eq!(card.card_type, CARD_TYPE);
        assert_eq!(card.context, CARD_CONTEXT);
        assert_eq!(card.theme_color, THEME_COLOR);
        assert!(card.sections.is_empty());
    }
}
