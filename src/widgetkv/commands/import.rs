use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Scope;
use crate::plugin::{extract_attributes, read_document};
use crate::store::AttributeStore;
use std::path::Path;

/// Pulls every key-value list out of a plugin JSON file into the scope's map.
/// Lists already stored under the same widget and field are replaced.
pub fn run<S: AttributeStore>(store: &mut S, scope: Scope, path: &Path) -> Result<CmdResult> {
    let doc = read_document(path)?;
    let report = extract_attributes(&doc)?;

    let mut result = CmdResult::default();
    for skipped in &report.skipped {
        result.add_message(CmdMessage::warning(format!(
            "Skipped {}: not a list of id/value and label pairs",
            skipped
        )));
    }

    if report.map.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No key-value attributes found in {}",
            path.display()
        )));
        return Ok(result);
    }

    let mut map = store.load(scope)?;
    let count = map.merge(report.map);
    store.save(scope, &map)?;
    tracing::info!(path = %path.display(), count, "imported attribute lists");

    result.add_message(CmdMessage::success(format!(
        "Imported {} attribute {} from {}",
        count,
        if count == 1 { "list" } else { "lists" },
        path.display()
    )));
    Ok(result)
}
