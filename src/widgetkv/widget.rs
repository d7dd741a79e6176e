//! Props for a generic key-value text editor bound to one attribute list.
//!
//! The editor only ever sees the encoded string plus its delimiters and
//! placeholders. Whenever the pair kind or the attribute map changes the caller
//! builds a fresh [`KeyValueInput`]; nothing is cached between calls.

use crate::codec::{KeyValueCodec, COMMON_DELIMITER, COMMON_KV_DELIMITER};
use crate::model::AttributeMap;
use serde::Serialize;

const VALUE_PLACEHOLDER: &str = "label";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyValueInput {
    /// Encoded pairs, e.g. `csv;CSV,json;JSON`
    pub value: String,
    /// The attribute field being edited
    pub label: String,
    pub delimiter: char,
    pub kv_delimiter: char,
    pub key_placeholder: &'static str,
    pub value_placeholder: &'static str,
}

impl KeyValueInput {
    /// Builds the input for `widget`/`field`.
    ///
    /// Returns `None` when nothing is stored there or the stored list is empty:
    /// the input is not shown at all in that case.
    pub fn for_field(
        map: &AttributeMap,
        widget: &str,
        field: &str,
        codec: &KeyValueCodec,
    ) -> Option<Self> {
        let pairs = map.get(widget, field).filter(|pairs| !pairs.is_empty())?;
        Some(Self {
            value: codec.encode(pairs),
            label: field.to_string(),
            delimiter: COMMON_DELIMITER,
            kv_delimiter: COMMON_KV_DELIMITER,
            key_placeholder: codec.kind().key_field(),
            value_placeholder: VALUE_PLACEHOLDER,
        })
    }
}

/// Decodes an edited string and stores the result for `widget`/`field`.
///
/// Returns the number of pairs written.
pub fn apply_change(
    map: &mut AttributeMap,
    widget: &str,
    field: &str,
    codec: &KeyValueCodec,
    encoded: &str,
) -> usize {
    let pairs = codec.decode(encoded);
    let count = pairs.len();
    map.set_in(widget, field, pairs);
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{AttributePair, PairKind};

    fn map_with_options() -> AttributeMap {
        let mut map = AttributeMap::new();
        map.set_in(
            "format",
            "options",
            vec![
                AttributePair::value_label("csv", "CSV"),
                AttributePair::value_label("json", "JSON"),
            ],
        );
        map
    }

    #[test]
    fn input_carries_encoded_value_and_placeholders() {
        let codec = KeyValueCodec::new(PairKind::ValueLabelPair);
        let input = KeyValueInput::for_field(&map_with_options(), "format", "options", &codec)
            .expect("input should render");

        assert_eq!(input.value, "csv;CSV,json;JSON");
        assert_eq!(input.label, "options");
        assert_eq!(input.delimiter, ',');
        assert_eq!(input.kv_delimiter, ';');
        assert_eq!(input.key_placeholder, "value");
        assert_eq!(input.value_placeholder, "label");
    }

    #[test]
    fn key_placeholder_follows_kind() {
        let codec = KeyValueCodec::new(PairKind::IdLabelPair);
        let input = KeyValueInput::for_field(&map_with_options(), "format", "options", &codec)
            .unwrap();
        assert_eq!(input.key_placeholder, "id");
    }

    #[test]
    fn absent_or_empty_lists_are_not_rendered() {
        let codec = KeyValueCodec::default();
        let mut map = map_with_options();

        assert!(KeyValueInput::for_field(&map, "format", "values", &codec).is_none());
        assert!(KeyValueInput::for_field(&map, "delimiter", "options", &codec).is_none());

        map.set_in("format", "options", Vec::new());
        assert!(KeyValueInput::for_field(&map, "format", "options", &codec).is_none());
    }

    #[test]
    fn apply_change_writes_decoded_pairs() {
        let codec = KeyValueCodec::new(PairKind::IdLabelPair);
        let mut map = map_with_options();

        let count = apply_change(&mut map, "mode", "options", &codec, "a;A,b;B,c");
        assert_eq!(count, 3);

        let stored = map.get("mode", "options").unwrap();
        assert_eq!(stored[0], AttributePair::id_label("a", "A"));
        assert_eq!(stored[2].label(), None);

        // The recomputed input reflects the new state
        let input = KeyValueInput::for_field(&map, "mode", "options", &codec).unwrap();
        assert_eq!(input.value, "a;A,b;B,c;");
    }

    #[test]
    fn clearing_the_string_hides_the_input() {
        let codec = KeyValueCodec::default();
        let mut map = map_with_options();

        assert_eq!(apply_change(&mut map, "format", "options", &codec, ""), 0);
        assert!(KeyValueInput::for_field(&map, "format", "options", &codec).is_none());
    }
}
