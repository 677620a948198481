//! Loosely-typed request scalars.
//!
//! Clients send the same field as `"3"`, `3` or `true` depending on where the value came
//! from (form inputs, number pickers, toggles). These types accept all of them and leave
//! the interpretation to the caller.

use serde::{Deserialize, Deserializer, Serialize};

/// A single JSON scalar: string, number or boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Loose {
    Flag(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Loose {
    /// Trimmed textual form, `None` when blank.
    pub fn text(&self) -> Option<String> {
        let s = match self {
            Loose::Text(s) => s.trim().to_string(),
            Loose::Number(n) => n.to_string(),
            Loose::Flag(b) => b.to_string(),
        };
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    }

    /// Interpret as a boolean. Blank text is treated as absent.
    pub fn flag(&self) -> Result<Option<bool>, String> {
        match self {
            Loose::Flag(b) => Ok(Some(*b)),
            Loose::Text(s) => parse_flag(s),
            Loose::Number(n) => Err(format!("expected true or false, got {n}")),
        }
    }
}

impl From<&str> for Loose {
    fn from(s: &str) -> Self {
        Loose::Text(s.to_string())
    }
}

/// Parse the textual booleans accepted from forms and JSON bodies.
pub fn parse_flag(raw: &str) -> Result<Option<bool>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(Some(true))
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(Some(false))
    } else {
        Err(format!("expected true or false, got '{trimmed}'"))
    }
}

/// Deserialize a scalar that may arrive as string, number or boolean into trimmed text.
///
/// Missing, null and blank values become an empty string so `validator` length rules
/// report them as missing.
pub fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Loose>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.text()).unwrap_or_default())
}

/// A value that may be sent either bare or as a list.
///
/// A bare value is treated as a one-element list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    Many(Vec<Loose>),
    One(Loose),
}

impl OneOrMany {
    /// Trimmed, non-blank values in request order, duplicates removed.
    pub fn values(&self) -> Vec<String> {
        let items: Vec<&Loose> = match self {
            OneOrMany::Many(items) => items.iter().collect(),
            OneOrMany::One(item) => vec![item],
        };
        let mut out: Vec<String> = Vec::with_capacity(items.len());
        for item in items {
            if let Some(text) = item.text() {
                if !out.contains(&text) {
                    out.push(text);
                }
            }
        }
        out
    }
}
