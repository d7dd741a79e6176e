use crate::codec::KeyValueCodec;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Scope;
use crate::store::AttributeStore;
use crate::widget::KeyValueInput;

pub fn run<S: AttributeStore>(
    store: &S,
    scope: Scope,
    codec: &KeyValueCodec,
    widget: &str,
    field: &str,
) -> Result<CmdResult> {
    let map = store.load(scope)?;
    match KeyValueInput::for_field(&map, widget, field, codec) {
        Some(input) => Ok(CmdResult::default()
            .with_encoded(input.value.clone())
            .with_input(input)),
        None => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::info(format!(
                "No pairs stored for {}.{}",
                widget, field
            )));
            Ok(result)
        }
    }
}
