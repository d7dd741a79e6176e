use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, WidgetKvError};
use crate::model::Scope;
use crate::store::AttributeStore;

pub fn run<S: AttributeStore>(
    store: &mut S,
    scope: Scope,
    widget: &str,
    field: &str,
) -> Result<CmdResult> {
    let mut map = store.load(scope)?;
    let removed = map.remove(widget, field).ok_or_else(|| {
        WidgetKvError::Api(format!("No attribute list at {}.{}", widget, field))
    })?;
    store.save(scope, &map)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Removed {}.{} ({} pairs)",
        widget,
        field,
        removed.len()
    )));
    Ok(result.with_pairs(removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::KeyValueCodec;
    use crate::commands::set;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn removes_stored_list() {
        let mut store = InMemoryStore::new();
        set::run(
            &mut store,
            Scope::Project,
            &KeyValueCodec::default(),
            "format",
            "options",
            "a;A,b;B",
        )
        .unwrap();

        let result = run(&mut store, Scope::Project, "format", "options").unwrap();
        assert_eq!(result.pairs.len(), 2);
        assert!(store.load(Scope::Project).unwrap().is_empty());
    }

    #[test]
    fn missing_list_is_an_error() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            run(&mut store, Scope::Project, "format", "options"),
            Err(WidgetKvError::Api(_))
        ));
    }
}
