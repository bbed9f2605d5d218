//! Ordered attribute schemas.
//!
//! A schema is parsed from a comma-separated list of attribute names. All
//! whitespace is removed before splitting, so `"full_name, reg_age"` and
//! `"full_name,reg_age"` describe the same schema. The position of a name is
//! the only link between the attribute and a field of a delimited instance.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::ids::AttributeName;

/// Delimiter between attribute names and between instance fields.
pub const FIELD_DELIMITER: char = ',';

/// An ordered sequence of attribute names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    attributes: Vec<AttributeName>,
}

impl Schema {
    pub fn new(attributes: Vec<AttributeName>) -> Self {
        Self { attributes }
    }

    /// Parse a schema string leniently.
    ///
    /// Blank segments (for example from `"a,,b"` or a trailing comma) are kept
    /// as blank attribute names and reported as warnings.
    pub fn extract(text: &str) -> Self {
        let schema = Self::from_segments(text);
        for (position, attribute) in schema.attributes.iter().enumerate() {
            if attribute.is_blank() {
                tracing::warn!(position, schema = %text, "blank attribute name in schema");
            }
        }
        schema
    }

    /// Parse a schema string, rejecting blank attribute names.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MalformedSchema`] for the first blank segment.
    pub fn extract_strict(text: &str) -> Result<Self> {
        let schema = Self::from_segments(text);
        if let Some(position) = schema.attributes.iter().position(AttributeName::is_blank) {
            return Err(ModelError::MalformedSchema {
                position,
                schema: text.to_string(),
            });
        }
        Ok(schema)
    }

    fn from_segments(text: &str) -> Self {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let attributes = compact
            .split(FIELD_DELIMITER)
            .map(AttributeName::new)
            .collect();
        Self { attributes }
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AttributeName> {
        self.attributes.get(index)
    }

    /// Index of the first attribute with the given name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AttributeName> {
        self.attributes.iter()
    }

    pub fn attributes(&self) -> &[AttributeName] {
        &self.attributes
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a AttributeName;
    type IntoIter = std::slice::Iter<'a, AttributeName>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, attribute) in self.attributes.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(attribute.as_str())?;
        }
        Ok(())
    }
}

/// Parse a comma-separated schema string into its ordered attributes.
pub fn extract_schema(text: &str) -> Schema {
    Schema::extract(text)
}
