//! Decoder for Rails-style validation error documents.
//!
//! # Design
//! Rails backends report validation failures as nested JSON:
//!
//! ```json
//! {"errors": {"article.title": ["can't be blank", "too short"]}}
//! ```
//!
//! Downstream code wants to match on a closed set of known fields, not raw
//! strings, so the caller registers a tag per dotted field path and the
//! decoder flattens the document into an ordered `(tag, message)` list.
//! Order is the document's: object keys outward (serde_json is built with
//! `preserve_order`), message arrays inward. An unregistered path fails the
//! whole decode — partial results would hide which field the backend
//! actually complained about.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::FieldDecodeError;

/// Immutable mapping from dotted field paths to caller-defined tags.
///
/// Lookup is linear over the registered pairs; these mappings are small
/// (one entry per form field). Never mutated by the library.
#[derive(Debug, Clone)]
pub struct FieldMapping<T> {
    entries: Vec<(String, T)>,
}

impl<T> FieldMapping<T> {
    pub fn new<P: Into<String>>(entries: impl IntoIterator<Item = (P, T)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(path, tag)| (path.into(), tag))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn get(&self, path: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(registered, _)| registered == path)
            .map(|(_, tag)| tag)
    }
}

#[derive(Deserialize)]
struct ErrorDocument {
    errors: Map<String, Value>,
}

/// Flatten a validation error document into `(tag, message)` pairs.
///
/// An empty `"errors"` object yields an empty list. A missing `"errors"`
/// key, a non-object `"errors"` value, non-array messages, or non-string
/// messages are all [`FieldDecodeError::Malformed`]; a path with no
/// registered tag is [`FieldDecodeError::UnrecognizedField`] and aborts the
/// decode with no partial result.
pub fn decode_field_errors<T: Clone>(
    mapping: &FieldMapping<T>,
    body: &str,
) -> Result<Vec<(T, String)>, FieldDecodeError> {
    let document: ErrorDocument =
        serde_json::from_str(body).map_err(|e| FieldDecodeError::Malformed(e.to_string()))?;

    let mut flattened = Vec::new();
    for (path, messages) in &document.errors {
        let tag = mapping
            .get(path)
            .ok_or_else(|| FieldDecodeError::UnrecognizedField(path.clone()))?;

        let messages = messages.as_array().ok_or_else(|| {
            FieldDecodeError::Malformed(format!("expected an array of messages for \"{path}\""))
        })?;

        for message in messages {
            let message = message.as_str().ok_or_else(|| {
                FieldDecodeError::Malformed(format!("expected string messages for \"{path}\""))
            })?;
            flattened.push((tag.clone(), message.to_string()));
        }
    }

    Ok(flattened)
}

/// Adapt a mapping into the decoder shape [`crate::classify::classify_json`]
/// expects in its error slot.
pub fn field_errors_decoder<T: Clone>(
    mapping: FieldMapping<T>,
) -> impl Fn(&str) -> Result<Vec<(T, String)>, String> {
    move |body| decode_field_errors(&mapping, body).map_err(|e| e.to_string())
}
