use crate::config::{Configuration, FIELD_NAMES};
use core::fmt;

/// Distinct values seen for every configuration field, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coverage {
    fields: Vec<(&'static str, Vec<String>)>,
}

impl Coverage {
    pub fn new() -> Self {
        Self {
            fields: FIELD_NAMES.iter().map(|&name| (name, Vec::new())).collect(),
        }
    }

    /// Adds every field value of `config` not seen before.
    pub fn record(&mut self, config: &Configuration) {
        for ((_, seen), (_, value)) in self.fields.iter_mut().zip(config.named_values()) {
            if !seen.contains(&value) {
                seen.push(value);
            }
        }
    }

    /// Distinct values seen for `field`.
    pub fn values(&self, field: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, values)| values.as_slice())
    }

    /// `(field, values)` pairs in canonical field order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        self.fields
            .iter()
            .map(|(name, values)| (*name, values.as_slice()))
    }
}

impl Default for Coverage {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, values) in self.iter() {
            writeln!(f, "{name}: {}", values.join(", "))?;
        }
        Ok(())
    }
}
