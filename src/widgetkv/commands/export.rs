use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Scope;
use crate::plugin::{apply_attributes, read_document, write_document};
use crate::store::AttributeStore;
use std::path::Path;

/// Writes the scope's lists into a plugin JSON file.
///
/// The result goes to `output` when given, otherwise the plugin file is
/// rewritten in place.
pub fn run<S: AttributeStore>(
    store: &S,
    scope: Scope,
    plugin: &Path,
    output: Option<&Path>,
) -> Result<CmdResult> {
    let map = store.load(scope)?;
    let mut doc = read_document(plugin)?;
    let report = apply_attributes(&mut doc, &map)?;

    let target = output.unwrap_or(plugin);
    write_document(target, &doc)?;
    tracing::info!(path = %target.display(), updated = report.updated, "exported attribute lists");

    let mut result = CmdResult::default();
    for widget in &report.missing {
        result.add_message(CmdMessage::warning(format!(
            "No property named '{}' in {}",
            widget,
            plugin.display()
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Wrote {} attribute {} to {}",
        report.updated,
        if report.updated == 1 { "list" } else { "lists" },
        target.display()
    )));
    Ok(result)
}
