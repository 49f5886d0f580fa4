//! Query response definitions
//!
//! Key/value server metadata and the player list returned by a full stat
//! request, plus the fields derived from them.

use std::collections::BTreeMap;

use crate::error::{McStatusError, Result};

/// Brand reported when the `plugins` field is missing or empty
pub const VANILLA_BRAND: &str = "vanilla";

/// Full stat response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse {
    /// Key/value section exactly as the server sent it
    pub raw: BTreeMap<String, String>,

    /// Message of the day (`hostname`)
    pub motd: String,

    /// World name (`map`)
    pub map: String,

    pub players: QueryPlayers,

    pub software: Software,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlayers {
    pub online: u32,
    pub max: u32,
    /// Names in the order the server listed them
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Software {
    pub version: String,
    pub brand: String,
    pub plugins: Vec<String>,
}

impl QueryResponse {
    /// Derive a response from the decoded key/value section and player list
    pub fn from_raw(raw: BTreeMap<String, String>, names: Vec<String>) -> Result<Self> {
        let online = numeric_field(&raw, "numplayers")?;
        let max = numeric_field(&raw, "maxplayers")?;

        let field = |key: &str| raw.get(key).cloned().unwrap_or_default();
        let software = Software::parse(field("version"), raw.get("plugins").map(String::as_str));

        Ok(Self {
            motd: field("hostname"),
            map: field("map"),
            players: QueryPlayers { online, max, names },
            software,
            raw,
        })
    }
}

fn numeric_field(raw: &BTreeMap<String, String>, key: &str) -> Result<u32> {
    let value = raw
        .get(key)
        .ok_or_else(|| McStatusError::MalformedQueryResponse(format!("missing '{}'", key)))?;

    value.trim().parse().map_err(|_| {
        McStatusError::MalformedQueryResponse(format!("non-numeric '{}': {:?}", key, value))
    })
}

impl Software {
    /// Split a `"<brand>: <plugin1>; <plugin2>; ..."` field
    ///
    /// A field without a `:` names only the brand.
    pub fn parse(version: String, plugins: Option<&str>) -> Self {
        let (brand, plugins) = match plugins.map(str::trim) {
            None | Some("") => (VANILLA_BRAND.to_string(), Vec::new()),
            Some(field) => match field.split_once(':') {
                Some((brand, list)) => (
                    brand.trim().to_string(),
                    list.split(';')
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(str::to_string)
                        .collect(),
                ),
                None => (field.to_string(), Vec::new()),
            },
        };

        let brand = if brand.is_empty() {
            VANILLA_BRAND.to_string()
        } else {
            brand
        };

        Self {
            version,
            brand,
            plugins,
        }
    }
}
