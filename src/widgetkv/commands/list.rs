use crate::commands::{CmdMessage, CmdResult, ListedField};
use crate::error::Result;
use crate::model::Scope;
use crate::store::AttributeStore;

pub fn run<S: AttributeStore>(store: &S, scope: Scope) -> Result<CmdResult> {
    let map = store.load(scope)?;
    let fields: Vec<ListedField> = map
        .entries()
        .map(|entry| ListedField {
            widget: entry.widget.to_string(),
            field: entry.field.to_string(),
            pairs: entry.pairs.len(),
        })
        .collect();

    let mut result = CmdResult::default();
    if fields.is_empty() {
        result.add_message(CmdMessage::info("No attribute lists stored."));
    }
    Ok(result.with_listed_fields(fields))
}
