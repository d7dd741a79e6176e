use crate::codec::KeyValueCodec;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Scope;
use crate::store::AttributeStore;
use crate::widget::apply_change;

pub fn run<S: AttributeStore>(
    store: &mut S,
    scope: Scope,
    codec: &KeyValueCodec,
    widget: &str,
    field: &str,
    encoded: &str,
) -> Result<CmdResult> {
    let mut map = store.load(scope)?;
    let count = apply_change(&mut map, widget, field, codec, encoded);
    store.save(scope, &map)?;
    tracing::debug!(widget, field, count, kind = %codec.kind(), "stored pair list");

    let pairs = map.get(widget, field).map(<[_]>::to_vec).unwrap_or_default();
    let mut result = CmdResult::default();
    if count == 0 {
        result.add_message(CmdMessage::warning(format!(
            "{}.{} is now empty and will not be shown",
            widget, field
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Set {}.{} ({} {})",
            widget,
            field,
            count,
            if count == 1 { "pair" } else { "pairs" }
        )));
    }
    let unlabeled = pairs.iter().filter(|pair| pair.label().is_none()).count();
    if unlabeled > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} of {} pairs have no label",
            unlabeled, count
        )));
    }
    Ok(result.with_pairs(pairs))
}
