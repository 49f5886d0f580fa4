//! Status response definitions
//!
//! The JSON document a server returns to a status request.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Decoded status document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Message of the day
    pub description: Description,

    /// `data:image/png;base64,...` icon, when the server has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,

    pub players: Players,

    pub version: Version,
}

impl StatusResponse {
    /// Parse a status JSON document
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Player counts plus the sample list some servers attach
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Players {
    pub online: i64,
    pub max: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<Vec<PlayerSample>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSample {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub name: String,
    pub protocol: i64,
}

/// Server description, flattened to its text
///
/// Servers send either a bare string or a chat component
/// (`{"text": ..., "extra": [...]}`); both collapse to the same text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDescription")]
pub struct Description {
    pub text: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDescription {
    Plain(String),
    Component(Component),
}

#[derive(Deserialize)]
struct Component {
    #[serde(default)]
    text: String,
    #[serde(default)]
    extra: Vec<RawDescription>,
}

impl RawDescription {
    fn push_text(self, out: &mut String) {
        match self {
            RawDescription::Plain(text) => out.push_str(&text),
            RawDescription::Component(component) => {
                out.push_str(&component.text);
                for child in component.extra {
                    child.push_text(out);
                }
            }
        }
    }
}

impl From<RawDescription> for Description {
    fn from(raw: RawDescription) -> Self {
        let mut text = String::new();
        raw.push_text(&mut text);
        Description { text }
    }
}
