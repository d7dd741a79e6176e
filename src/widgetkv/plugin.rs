//! # Plugin JSON
//!
//! Moves key-value attribute lists between plugin JSON documents and an
//! [`AttributeMap`]. Only the parts this crate owns are touched:
//!
//! ```text
//! {
//!   "configuration-groups": [
//!     { "label": "...",
//!       "properties": [
//!         { "widget-type": "select",
//!           "name": "format",                    <- widget
//!           "widget-attributes": {
//!             "options": [                        <- field
//!               { "value": "csv", "label": "CSV" },
//!               ...
//! ```
//!
//! A widget attribute counts as a pair list when it is a non-empty array of
//! objects that all carry a string `id` (or all a string `value`) and an
//! optional string `label`. Arrays holding at least one object that do not fit
//! are reported as skipped; plain value arrays are ignored. Recognising the shape here is unavoidable since
//! the document does not record it; inside the crate the kind travels with
//! each [`AttributePair`].

use crate::codec::{AttributePair, PairKind};
use crate::error::{Result, WidgetKvError};
use crate::model::AttributeMap;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

const GROUPS: &str = "configuration-groups";
const PROPERTIES: &str = "properties";
const NAME: &str = "name";
const WIDGET_ATTRIBUTES: &str = "widget-attributes";

#[derive(Debug, Default)]
pub struct ImportReport {
    pub map: AttributeMap,
    /// `widget.field` arrays of objects that were not pair lists
    pub skipped: Vec<String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Number of widget attributes written
    pub updated: usize,
    /// Widgets in the map without a matching property
    pub missing: Vec<String>,
}

pub fn read_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| WidgetKvError::Plugin(format!("{}: {}", path.display(), e)))
}

pub fn write_document(path: &Path, doc: &Value) -> Result<()> {
    let mut content = serde_json::to_string_pretty(doc)?;
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}

fn groups(doc: &Value) -> Result<&Vec<Value>> {
    doc.get(GROUPS)
        .and_then(Value::as_array)
        .ok_or_else(|| WidgetKvError::Plugin(format!("document has no '{}' array", GROUPS)))
}

/// Collects every key-value pair list in a plugin JSON document.
pub fn extract_attributes(doc: &Value) -> Result<ImportReport> {
    let mut report = ImportReport::default();

    let properties = groups(doc)?
        .iter()
        .filter_map(|group| group.get(PROPERTIES).and_then(Value::as_array))
        .flatten();

    for property in properties {
        let Some(widget) = property.get(NAME).and_then(Value::as_str) else {
            continue;
        };
        let Some(attributes) = property.get(WIDGET_ATTRIBUTES).and_then(Value::as_object) else {
            continue;
        };

        for (field, value) in attributes {
            let Some(items) = value.as_array() else {
                continue;
            };
            // Plain scalar arrays ("values": ["a", "b"]) are not candidates
            if !items.iter().any(Value::is_object) {
                continue;
            }
            match pairs_from_array(items) {
                Some(pairs) => {
                    tracing::debug!(widget, field = %field, pairs = pairs.len(), "found pair list");
                    report.map.set_in(widget, field, pairs);
                }
                None => {
                    tracing::warn!(widget, field = %field, "array of objects is not a pair list");
                    report.skipped.push(format!("{}.{}", widget, field));
                }
            }
        }
    }

    Ok(report)
}

fn pairs_from_array(items: &[Value]) -> Option<Vec<AttributePair>> {
    let first = items.first()?.as_object()?;
    let kind = if first.get("id").is_some_and(Value::is_string) {
        PairKind::IdLabelPair
    } else if first.get("value").is_some_and(Value::is_string) {
        PairKind::ValueLabelPair
    } else {
        return None;
    };

    items
        .iter()
        .map(|item| {
            let object = item.as_object()?;
            let key = object.get(kind.key_field())?.as_str()?;
            let label = match object.get("label") {
                None | Some(Value::Null) => None,
                Some(Value::String(label)) => Some(label.clone()),
                Some(_) => return None,
            };
            Some(AttributePair::new(kind, key, label))
        })
        .collect()
}

/// Writes the map's lists into the matching properties of `doc`.
///
/// Everything else in the document is left as it was.
pub fn apply_attributes(doc: &mut Value, map: &AttributeMap) -> Result<ExportReport> {
    groups(doc)?;
    let mut report = ExportReport::default();
    let mut seen = BTreeSet::new();

    let groups = doc
        .get_mut(GROUPS)
        .and_then(Value::as_array_mut)
        .into_iter()
        .flatten();

    for group in groups {
        let Some(properties) = group.get_mut(PROPERTIES).and_then(Value::as_array_mut) else {
            continue;
        };
        for property in properties.iter_mut() {
            let Some(object) = property.as_object_mut() else {
                continue;
            };
            let Some(widget) = object.get(NAME).and_then(Value::as_str).map(str::to_string) else {
                continue;
            };
            if map.fields(&widget).next().is_none() {
                continue;
            }

            let attributes = object
                .entry(WIDGET_ATTRIBUTES)
                .or_insert_with(|| Value::Object(Map::new()));
            let Some(attributes) = attributes.as_object_mut() else {
                return Err(WidgetKvError::Plugin(format!(
                    "'{}' of '{}' is not an object",
                    WIDGET_ATTRIBUTES, widget
                )));
            };

            for field in map.fields(&widget) {
                if let Some(pairs) = map.get(&widget, field) {
                    attributes.insert(field.to_string(), serde_json::to_value(pairs)?);
                    report.updated += 1;
                }
            }
            seen.insert(widget);
        }
    }

    report.missing = map
        .widgets()
        .filter(|widget| !seen.contains(*widget))
        .map(str::to_string)
        .collect();
    Ok(report)
}
