//! Frequency profiling of strings and delimited instances.

use kashmir_model::{AttributeName, FIELD_DELIMITER, FrequencyHistogram, Schema};

/// Histogram of the non-whitespace characters of `text`.
pub fn frequency_histogram(text: &str) -> FrequencyHistogram {
    FrequencyHistogram::from_text(text)
}

/// Split an instance on commas and trim each field.
///
/// No quoting or escaping is recognised.
pub fn split_instance(raw: &str) -> Vec<&str> {
    raw.split(FIELD_DELIMITER).map(str::trim).collect()
}

/// Per-attribute histograms of one instance, in schema order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InstanceProfile {
    entries: Vec<(AttributeName, FrequencyHistogram)>,
    field_count: usize,
}

impl InstanceProfile {
    pub fn get(&self, attribute: &str) -> Option<&FrequencyHistogram> {
        self.entries
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, histogram)| histogram)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AttributeName, &FrequencyHistogram)> {
        self.entries.iter().map(|(name, histogram)| (name, histogram))
    }

    /// Histograms in schema order.
    pub fn histograms(&self) -> impl Iterator<Item = &FrequencyHistogram> {
        self.entries.iter().map(|(_, histogram)| histogram)
    }

    /// Number of attributes (always the schema length).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of fields found in the raw instance.
    pub fn field_count(&self) -> usize {
        self.field_count
    }
}

/// Profile `raw` against the schema whose order matches its fields.
///
/// Attributes without a field get an empty histogram and fields beyond the
/// schema are ignored.
pub fn profile_instance(raw: &str, schema: &Schema) -> InstanceProfile {
    let fields = split_instance(raw);
    if fields.len() != schema.len() {
        tracing::debug!(
            fields = fields.len(),
            attributes = schema.len(),
            "instance field count differs from schema"
        );
    }

    let entries = schema
        .iter()
        .enumerate()
        .map(|(index, attribute)| {
            let histogram = FrequencyHistogram::from_optional(fields.get(index).copied());
            (attribute.clone(), histogram)
        })
        .collect();

    InstanceProfile {
        entries,
        field_count: fields.len(),
    }
}
