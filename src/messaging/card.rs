//! Adaptive card payloads

use serde::Serialize;

const CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";
const CARD_SCHEMA: &str = "http://adaptivecards.io/schemas/adaptive-card.json";

/// Card wrapped for a message attachment
#[derive(Debug, Clone, Serialize)]
pub struct Attachment {
    #[serde(rename = "contentType")]
    pub content_type: &'static str,
    pub content: AdaptiveCard,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdaptiveCard {
    #[serde(rename = "$schema")]
    pub schema: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub version: &'static str,
    pub body: Vec<CardElement>,
    pub actions: Vec<CardAction>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum CardElement {
    TextBlock {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        weight: Option<&'static str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        size: Option<&'static str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        wrap: Option<bool>,
    },
    FactSet {
        facts: Vec<Fact>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fact {
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum CardAction {
    #[serde(rename = "Action.openURL")]
    OpenUrl { title: String, url: String },
}

/// Builder for the title / intro / facts / link card layout
#[derive(Debug, Clone)]
pub struct CardBuilder {
    body: Vec<CardElement>,
    facts: Vec<Fact>,
    actions: Vec<CardAction>,
}

impl CardBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            body: vec![CardElement::TextBlock {
                text: title.into(),
                weight: Some("bolder"),
                size: Some("large"),
                wrap: None,
            }],
            facts: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.body.push(CardElement::TextBlock {
            text: text.into(),
            weight: None,
            size: None,
            wrap: Some(true),
        });
        self
    }

    pub fn fact(mut self, title: impl Into<String>, value: impl ToString) -> Self {
        self.facts.push(Fact {
            title: title.into(),
            value: value.to_string(),
        });
        self
    }

    pub fn open_url(mut self, title: impl Into<String>, url: impl Into<String>) -> Self {
        self.actions.push(CardAction::OpenUrl {
            title: title.into(),
            url: url.into(),
        });
        self
    }

    pub fn build(mut self) -> Attachment {
        if !self.facts.is_empty() {
            self.body.push(CardElement::FactSet { facts: self.facts });
        }

        Attachment {
            content_type: CARD_CONTENT_TYPE,
            content: AdaptiveCard {
                schema: CARD_SCHEMA,
                kind: "AdaptiveCard",
                version: "1.0",
                body: self.body,
                actions: self.actions,
            },
        }
    }
}
