use crate::codec::KeyValueCodec;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;

pub fn run(codec: &KeyValueCodec, encoded: &str) -> Result<CmdResult> {
    let pairs = codec.decode(encoded);
    let mut result = CmdResult::default();

    let unlabeled = pairs.iter().filter(|pair| pair.label().is_none()).count();
    if unlabeled > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} of {} pairs have no label",
            unlabeled,
            pairs.len()
        )));
    }

    Ok(result.with_pairs(pairs))
}
