//! # Key-Value Attribute Codec
//!
//! Converts between an ordered list of [`AttributePair`]s and the single delimited
//! string consumed by key-value text editors:
//!
//! ```text
//! key1;label1,key2;label2
//!     ^      ^
//!     |      +-- pair delimiter (COMMON_DELIMITER)
//!     +--------- field delimiter (COMMON_KV_DELIMITER)
//! ```
//!
//! The codec is stateless. [`PairKind`] is always supplied by the caller and decides
//! which shape decoded pairs take; it is never guessed from the string.
//!
//! ## Delimiters inside fields
//!
//! By default nothing is escaped, so a `;` or `,` inside a key or label corrupts the
//! round trip. [`KeyValueCodec::with_escape`] enables a backslash escape scheme that
//! makes the round trip total. The plain format is what editors exchange today and
//! stays the default.
//!
//! ## Malformed input
//!
//! Decoding never fails:
//! - `""` decodes to an empty list
//! - a pair without a field delimiter decodes with no label (`label: None`)
//! - fields after the second one are dropped (`"a;b;c"` is `a` / `b`)
//! - an absent label encodes as an empty one (`"a;"`)

use crate::error::{Result, WidgetKvError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Joins pairs.
pub const COMMON_DELIMITER: char = ',';

/// Joins the key and label inside one pair.
pub const COMMON_KV_DELIMITER: char = ';';

const ESCAPE: char = '\\';

/// Which key field a pair list uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PairKind {
    /// `{ "id": ..., "label": ... }`, used by radio groups and multi-selects
    #[serde(rename = "id")]
    IdLabelPair,

    /// `{ "value": ..., "label": ... }`, used by selects and dropdowns
    #[default]
    #[serde(rename = "value")]
    ValueLabelPair,
}

impl PairKind {
    /// Name of the key field, also used as the editor's key placeholder.
    pub fn key_field(&self) -> &'static str {
        match self {
            PairKind::IdLabelPair => "id",
            PairKind::ValueLabelPair => "value",
        }
    }
}

impl fmt::Display for PairKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key_field())
    }
}

impl FromStr for PairKind {
    type Err = WidgetKvError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" | "id-label" | "idlabelpair" => Ok(PairKind::IdLabelPair),
            "value" | "value-label" | "valuelabelpair" => Ok(PairKind::ValueLabelPair),
            other => Err(WidgetKvError::InvalidKind(other.to_string())),
        }
    }
}

/// One key/label entry of a widget attribute list.
///
/// The label is optional because decoding a pair without a field delimiter
/// yields a key with nothing after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributePair {
    IdLabel {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    ValueLabel {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

impl AttributePair {
    pub fn new(kind: PairKind, key: impl Into<String>, label: Option<String>) -> Self {
        match kind {
            PairKind::IdLabelPair => AttributePair::IdLabel {
                id: key.into(),
                label,
            },
            PairKind::ValueLabelPair => AttributePair::ValueLabel {
                value: key.into(),
                label,
            },
        }
    }

    pub fn id_label(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(PairKind::IdLabelPair, id, Some(label.into()))
    }

    pub fn value_label(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(PairKind::ValueLabelPair, value, Some(label.into()))
    }

    pub fn kind(&self) -> PairKind {
        match self {
            AttributePair::IdLabel { .. } => PairKind::IdLabelPair,
            AttributePair::ValueLabel { .. } => PairKind::ValueLabelPair,
        }
    }

    /// The `id` or `value`, whichever this pair carries.
    pub fn key(&self) -> &str {
        match self {
            AttributePair::IdLabel { id, .. } => id,
            AttributePair::ValueLabel { value, .. } => value,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            AttributePair::IdLabel { label, .. } | AttributePair::ValueLabel { label, .. } => {
                label.as_deref()
            }
        }
    }
}

/// Encodes `pairs` with the default (unescaped) format.
pub fn encode(pairs: &[AttributePair], kind: PairKind) -> String {
    KeyValueCodec::new(kind).encode(pairs)
}

/// Decodes `encoded` into pairs of `kind` with the default (unescaped) format.
pub fn decode(encoded: &str, kind: PairKind) -> Vec<AttributePair> {
    KeyValueCodec::new(kind).decode(encoded)
}

/// Codec bound to a pair kind and escape mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyValueCodec {
    kind: PairKind,
    escape: bool,
}

impl KeyValueCodec {
    pub fn new(kind: PairKind) -> Self {
        Self {
            kind,
            escape: false,
        }
    }

    /// Backslash-escape delimiters (and the backslash itself) inside fields.
    pub fn with_escape(mut self, escape: bool) -> Self {
        self.escape = escape;
        self
    }

    pub fn kind(&self) -> PairKind {
        self.kind
    }

    pub fn escapes(&self) -> bool {
        self.escape
    }

    /// Pairs whose variant differs from the codec kind are still encoded by their
    /// own key.
    pub fn encode(&self, pairs: &[AttributePair]) -> String {
        let mut out = String::new();
        for (i, pair) in pairs.iter().enumerate() {
            if pair.kind() != self.kind {
                tracing::debug!(
                    key = pair.key(),
                    pair_kind = %pair.kind(),
                    codec_kind = %self.kind,
                    "encoding pair of a different kind"
                );
            }
            if i > 0 {
                out.push(COMMON_DELIMITER);
            }
            self.push_field(&mut out, pair.key());
            out.push(COMMON_KV_DELIMITER);
            self.push_field(&mut out, pair.label().unwrap_or_default());
        }
        out
    }

    pub fn decode(&self, encoded: &str) -> Vec<AttributePair> {
        if encoded.is_empty() {
            return Vec::new();
        }

        let rows: Vec<Vec<String>> = if self.escape {
            split_escaped(encoded)
        } else {
            encoded
                .split(COMMON_DELIMITER)
                .map(|pair| pair.split(COMMON_KV_DELIMITER).map(str::to_string).collect())
                .collect()
        };

        rows.into_iter()
            .map(|fields| {
                let mut fields = fields.into_iter();
                let key = fields.next().unwrap_or_default();
                let label = fields.next();
                AttributePair::new(self.kind, key, label)
            })
            .collect()
    }

    fn push_field(&self, out: &mut String, field: &str) {
        if !self.escape {
            out.push_str(field);
            return;
        }
        for c in field.chars() {
            if matches!(c, ESCAPE | COMMON_DELIMITER | COMMON_KV_DELIMITER) {
                out.push(ESCAPE);
            }
            out.push(c);
        }
    }
}

/// Splits on unescaped delimiters into rows of unescaped fields.
/// A trailing lone backslash is kept as-is.
fn split_escaped(encoded: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = encoded.chars();

    while let Some(c) = chars.next() {
        match c {
            ESCAPE => current.push(chars.next().unwrap_or(ESCAPE)),
            COMMON_KV_DELIMITER => fields.push(std::mem::take(&mut current)),
            COMMON_DELIMITER => {
                fields.push(std::mem::take(&mut current));
                rows.push(std::mem::take(&mut fields));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    rows.push(fields);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_pairs(items: &[(&str, &str)]) -> Vec<AttributePair> {
        items
            .iter()
            .map(|(k, l)| AttributePair::value_label(*k, *l))
            .collect()
    }

    fn id_pairs(items: &[(&str, &str)]) -> Vec<AttributePair> {
        items
            .iter()
            .map(|(k, l)| AttributePair::id_label(*k, *l))
            .collect()
    }

    #[test]
    fn encodes_value_label_pairs() {
        let pairs = value_pairs(&[("a", "b"), ("c", "d")]);
        assert_eq!(encode(&pairs, PairKind::ValueLabelPair), "a;b,c;d");
    }

    #[test]
    fn decodes_id_label_pairs() {
        let decoded = decode("x;y,z;w", PairKind::IdLabelPair);
        assert_eq!(decoded, id_pairs(&[("x", "y"), ("z", "w")]));
    }

    #[test]
    fn single_pair_round_trip() {
        let pairs = value_pairs(&[("k", "v")]);
        let encoded = encode(&pairs, PairKind::ValueLabelPair);
        assert_eq!(encoded, "k;v");
        assert_eq!(decode(&encoded, PairKind::ValueLabelPair), pairs);
    }

    #[test]
    fn empty_list_and_empty_string() {
        for kind in [PairKind::IdLabelPair, PairKind::ValueLabelPair] {
            assert_eq!(encode(&[], kind), "");
            assert!(decode("", kind).is_empty());
        }
    }

    #[test]
    fn round_trips_delimiter_free_lists_for_both_kinds() {
        let samples: &[&[(&str, &str)]] = &[
            &[("csv", "CSV")],
            &[("csv", "CSV"), ("tsv", "Tab separated"), ("json", "JSON")],
            &[("", "empty key"), ("no-label", "")],
            &[("ünïcode", "ラベル"), ("spaces ok", "  padded  ")],
        ];
        for items in samples {
            let by_value = value_pairs(items);
            let encoded = encode(&by_value, PairKind::ValueLabelPair);
            assert_eq!(decode(&encoded, PairKind::ValueLabelPair), by_value);

            let by_id = id_pairs(items);
            let encoded = encode(&by_id, PairKind::IdLabelPair);
            assert_eq!(decode(&encoded, PairKind::IdLabelPair), by_id);
        }
    }

    #[test]
    fn missing_field_delimiter_yields_absent_label() {
        let decoded = decode("onlykey,anotherkey;val", PairKind::ValueLabelPair);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0], AttributePair::new(PairKind::ValueLabelPair, "onlykey", None));
        assert_eq!(decoded[0].label(), None);
        assert_eq!(decoded[1], AttributePair::value_label("anotherkey", "val"));
    }

    #[test]
    fn extra_fields_are_dropped() {
        let decoded = decode("a;b;c", PairKind::IdLabelPair);
        assert_eq!(decoded, id_pairs(&[("a", "b")]));
    }

    #[test]
    fn trailing_field_delimiter_is_empty_label() {
        let decoded = decode("a;", PairKind::IdLabelPair);
        assert_eq!(decoded[0].label(), Some(""));
    }

    #[test]
    fn lone_pair_delimiter_yields_two_empty_pairs() {
        let decoded = decode(",", PairKind::ValueLabelPair);
        assert_eq!(decoded.len(), 2);
        assert!(decoded.iter().all(|p| p.key().is_empty() && p.label().is_none()));
    }

    #[test]
    fn absent_label_encodes_as_empty() {
        let pairs = vec![AttributePair::new(PairKind::IdLabelPair, "a", None)];
        assert_eq!(encode(&pairs, PairKind::IdLabelPair), "a;");
    }

    #[test]
    fn decode_shape_follows_requested_kind() {
        let decoded = decode("k;v", PairKind::IdLabelPair);
        assert_eq!(decoded[0].kind(), PairKind::IdLabelPair);
        let decoded = decode("k;v", PairKind::ValueLabelPair);
        assert_eq!(decoded[0].kind(), PairKind::ValueLabelPair);
    }

    #[test]
    fn encode_uses_own_key_for_mismatched_pairs() {
        let pairs = vec![
            AttributePair::id_label("a", "A"),
            AttributePair::value_label("b", "B"),
        ];
        assert_eq!(encode(&pairs, PairKind::ValueLabelPair), "a;A,b;B");
    }

    #[test]
    fn unescaped_delimiters_corrupt_round_trip() {
        let pairs = value_pairs(&[("a,b", "c")]);
        let decoded = decode(&encode(&pairs, PairKind::ValueLabelPair), PairKind::ValueLabelPair);
        assert_ne!(decoded, pairs);
    }

    #[test]
    fn escaped_codec_round_trips_delimiters() {
        let codec = KeyValueCodec::new(PairKind::IdLabelPair).with_escape(true);
        let pairs = id_pairs(&[("a,b", "c;d"), ("back\\slash", "plain"), (";", ",")]);
        let encoded = codec.encode(&pairs);
        assert_eq!(encoded, "a\\,b;c\\;d,back\\\\slash;plain,\\;;\\,");
        assert_eq!(codec.decode(&encoded), pairs);
    }

    #[test]
    fn escaped_codec_matches_plain_format_without_special_chars() {
        let codec = KeyValueCodec::new(PairKind::ValueLabelPair).with_escape(true);
        let pairs = value_pairs(&[("a", "b"), ("c", "d")]);
        assert_eq!(codec.encode(&pairs), "a;b,c;d");
        assert_eq!(codec.decode("onlykey,k;v")[0].label(), None);
    }

    #[test]
    fn escaped_codec_keeps_trailing_backslash() {
        let codec = KeyValueCodec::new(PairKind::ValueLabelPair).with_escape(true);
        let decoded = codec.decode("k;v\\");
        assert_eq!(decoded, value_pairs(&[("k", "v\\")]));
    }

    #[test]
    fn pair_kind_parses_aliases() {
        assert_eq!("id".parse::<PairKind>().unwrap(), PairKind::IdLabelPair);
        assert_eq!("VALUE".parse::<PairKind>().unwrap(), PairKind::ValueLabelPair);
        assert_eq!(
            "value-label".parse::<PairKind>().unwrap(),
            PairKind::ValueLabelPair
        );
        assert!(matches!(
            "label".parse::<PairKind>(),
            Err(WidgetKvError::InvalidKind(_))
        ));
    }

    #[test]
    fn pairs_serialize_to_plugin_json_shape() {
        let json = serde_json::to_string(&AttributePair::id_label("a", "A")).unwrap();
        assert_eq!(json, r#"{"id":"a","label":"A"}"#);

        let json = serde_json::to_string(&AttributePair::new(
            PairKind::ValueLabelPair,
            "b",
            None,
        ))
        .unwrap();
        assert_eq!(json, r#"{"value":"b"}"#);

        let parsed: AttributePair = serde_json::from_str(r#"{"value":"c","label":"C"}"#).unwrap();
        assert_eq!(parsed, AttributePair::value_label("c", "C"));
    }
}
