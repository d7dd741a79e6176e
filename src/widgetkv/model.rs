use crate::codec::AttributePair;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    Project,
    Global,
}

/// Key-value attribute lists per widget and attribute field.
///
/// Widgets are keyed by their property name in the plugin JSON (e.g. `format`),
/// fields by the widget attribute holding the list (e.g. `options`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMap {
    widgets: BTreeMap<String, BTreeMap<String, Vec<AttributePair>>>,
}

/// One stored list, as returned by [`AttributeMap::entries`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeEntry<'a> {
    pub widget: &'a str,
    pub field: &'a str,
    pub pairs: &'a [AttributePair],
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, widget: &str, field: &str) -> Option<&[AttributePair]> {
        self.widgets
            .get(widget)
            .and_then(|fields| fields.get(field))
            .map(Vec::as_slice)
    }

    /// Replaces the list stored for `widget`/`field`, returning the previous one.
    pub fn set_in(
        &mut self,
        widget: &str,
        field: &str,
        pairs: Vec<AttributePair>,
    ) -> Option<Vec<AttributePair>> {
        self.widgets
            .entry(widget.to_string())
            .or_default()
            .insert(field.to_string(), pairs)
    }

    /// Removes one list; a widget left without fields is dropped too.
    pub fn remove(&mut self, widget: &str, field: &str) -> Option<Vec<AttributePair>> {
        let fields = self.widgets.get_mut(widget)?;
        let removed = fields.remove(field);
        if fields.is_empty() {
            self.widgets.remove(widget);
        }
        removed
    }

    pub fn widgets(&self) -> impl Iterator<Item = &str> {
        self.widgets.keys().map(String::as_str)
    }

    pub fn fields(&self, widget: &str) -> impl Iterator<Item = &str> {
        self.widgets
            .get(widget)
            .into_iter()
            .flat_map(|fields| fields.keys().map(String::as_str))
    }

    pub fn entries(&self) -> impl Iterator<Item = AttributeEntry<'_>> {
        self.widgets.iter().flat_map(|(widget, fields)| {
            fields.iter().map(move |(field, pairs)| AttributeEntry {
                widget,
                field,
                pairs,
            })
        })
    }

    /// Number of stored lists.
    pub fn len(&self) -> usize {
        self.widgets.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Copies every list from `other`, replacing lists stored under the same keys.
    pub fn merge(&mut self, other: AttributeMap) -> usize {
        let mut count = 0;
        for (widget, fields) in other.widgets {
            for (field, pairs) in fields {
                self.set_in(&widget, &field, pairs);
                count += 1;
            }
        }
        count
    }
}
