//! Ordered tag/value result mapping.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::ExifError;
use crate::format::tiff::{ExifTag, UNKNOWN_TAG_NAME};

/// A decoded (tag name, rendered value) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedField {
    pub name: &'static str,
    pub value: String,
}

/// Insertion-ordered mapping of tag name to rendered value.
///
/// Names are unique: recording a name twice overwrites the value in place,
/// keeping the position of the first occurrence. Serializes as a flat JSON
/// object with every value quoted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExifFields {
    fields: Vec<DecodedField>,
}

impl ExifFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a decoded value.
    ///
    /// Unknown tags and the structural ExifOffset pointer are skipped.
    /// Returns whether the value was recorded.
    pub fn record(&mut self, name: &'static str, value: String) -> bool {
        if name == UNKNOWN_TAG_NAME || name == ExifTag::ExifOffset.name() {
            return false;
        }

        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(existing) => existing.value = value,
            None => self.fields.push(DecodedField { name, value }),
        }
        true
    }

    /// Value recorded for a tag name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = &DecodedField> {
        self.fields.iter()
    }

    /// Serialize to `{"Tag":"value",...}`, failing if the result exceeds
    /// `capacity` bytes.
    pub fn finalize(&self, capacity: usize) -> Result<String, ExifError> {
        let json = serde_json::to_string(self)
            .map_err(|e| ExifError::Serialization(e.to_string()))?;

        if json.len() > capacity {
            return Err(ExifError::OutputTooSmall {
                required: json.len(),
                capacity,
            });
        }
        Ok(json)
    }

    /// Pretty-printed JSON, for display.
    pub fn to_json_pretty(&self) -> Result<String, ExifError> {
        serde_json::to_string_pretty(self).map_err(|e| ExifError::Serialization(e.to_string()))
    }
}

impl Serialize for ExifFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(field.name, &field.value)?;
        }
        map.end()
    }
}

// =============================================================================
// Tests
// =============================================================================
