//! Parsing and validation of the acceptable-label allow-list.
//!
//! The allow-list is a YAML document holding a flat sequence of label
//! names, hosted in the repository under review:
//!
//! ```yaml
//! - ready-for-review
//! - approved
//! ```

use serde_yaml::Value;

use crate::errors::LabelGateError;

#[cfg(test)]
#[path = "allowlist_tests.rs"]
mod tests;

/// The set of label names that satisfy the gate.
///
/// Entries keep the order they have in the source document. An empty
/// document (or an absent file) yields an empty allow-list, which never
/// matches anything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllowList {
    entries: Vec<String>,
}

impl AllowList {
    /// Parses a YAML document into an allow-list.
    ///
    /// The document must be a sequence of strings. Anything else (a
    /// mapping, a bare scalar, or a sequence with non-string entries)
    /// is rejected with an error naming the offending shape or entry,
    /// rather than being passed through to silently never match.
    ///
    /// # Arguments
    ///
    /// * `text` - The decoded text of the configuration file
    ///
    /// # Returns
    ///
    /// A `Result` containing the validated allow-list
    pub fn parse(text: &str) -> Result<Self, LabelGateError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: Value = serde_yaml::from_str(text).map_err(|e| {
            LabelGateError::ConfigError(format!("Failed to parse the allow-list: {}", e))
        })?;

        match value {
            Value::Null => Ok(Self::default()),
            Value::Sequence(items) => {
                let mut entries = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    match item {
                        Value::String(name) => entries.push(name),
                        other => {
                            return Err(LabelGateError::InvalidAllowList(format!(
                                "entry {} is {}, expected a string",
                                index,
                                value_kind(&other)
                            )));
                        }
                    }
                }

                Ok(Self { entries })
            }
            other => Err(LabelGateError::InvalidAllowList(format!(
                "the document is {}, expected a sequence of label names",
                value_kind(&other)
            ))),
        }
    }

    /// Returns true when the given label name appears in the allow-list.
    /// Comparison is exact string equality.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry == name)
    }

    /// The label names in document order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl From<Vec<String>> for AllowList {
    fn from(entries: Vec<String>) -> Self {
        Self { entries }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
