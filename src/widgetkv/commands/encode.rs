use crate::codec::{AttributePair, KeyValueCodec, COMMON_DELIMITER, COMMON_KV_DELIMITER};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;

/// Encodes a JSON array of `{id|value, label}` objects.
pub fn run(codec: &KeyValueCodec, json: &str) -> Result<CmdResult> {
    let pairs: Vec<AttributePair> = serde_json::from_str(json)?;
    Ok(encode_pairs(codec, pairs))
}

pub fn encode_pairs(codec: &KeyValueCodec, pairs: Vec<AttributePair>) -> CmdResult {
    let mut result = CmdResult::default().with_encoded(codec.encode(&pairs));

    if !codec.escapes() {
        for pair in pairs.iter().filter(|pair| contains_delimiter(pair)) {
            result.add_message(CmdMessage::warning(format!(
                "'{}' contains a delimiter and will not decode back unchanged (use --escape)",
                pair.key()
            )));
        }
    }

    result.with_pairs(pairs)
}

fn contains_delimiter(pair: &AttributePair) -> bool {
    let has = |s: &str| s.contains([COMMON_DELIMITER, COMMON_KV_DELIMITER]);
    has(pair.key()) || pair.label().is_some_and(has)
}
