use crate::codec::{PairKind, COMMON_DELIMITER, COMMON_KV_DELIMITER};
use crate::error::{Result, WidgetKvError};
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Prefix of the header lines written into a buffer. Pair lines may start
/// with `#` (colour keys such as `#fff`), so only this exact prefix is ignored.
const HEADER: &str = "# widgetkv: ";

/// An encoded attribute list laid out for editing in a text editor.
///
/// Format: header lines starting with `# widgetkv: `, then one `key;label`
/// pair per line. Reading the buffer back drops header and blank lines and
/// joins the rest, unchanged, with the pair delimiter, so the result is a
/// regular encoded string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorBuffer {
    pub widget: String,
    pub field: String,
    pub kind: PairKind,
    pub encoded: String,
}

impl EditorBuffer {
    pub fn new(widget: &str, field: &str, kind: PairKind, encoded: String) -> Self {
        Self {
            widget: widget.to_string(),
            field: field.to_string(),
            kind,
            encoded,
        }
    }

    pub fn to_buffer(&self) -> String {
        let mut out = format!(
            "{h}{}.{}\n{h}One pair per line: {}{}label\n{h}Lines starting with '{}' are ignored.\n",
            self.widget,
            self.field,
            self.kind.key_field(),
            COMMON_KV_DELIMITER,
            HEADER.trim_end(),
            h = HEADER,
        );
        // Splitting on the raw delimiter would break escaped delimiters, so only
        // unescaped ones start a new line.
        let mut escaped = false;
        for c in self.encoded.chars() {
            if c == COMMON_DELIMITER && !escaped {
                out.push('\n');
            } else {
                out.push(c);
            }
            escaped = c == '\\' && !escaped;
        }
        if !self.encoded.is_empty() {
            out.push('\n');
        }
        out
    }

    /// Returns the encoded string held in an edited buffer.
    pub fn encoded_from_buffer(buffer: &str) -> String {
        buffer
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.trim().is_empty() && !line.starts_with(HEADER))
            .collect::<Vec<_>>()
            .join(COMMON_DELIMITER.to_string().as_str())
    }
}

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(WidgetKvError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    // $EDITOR may carry arguments ("code --wait")
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| WidgetKvError::Api("Empty editor command".to_string()))?;

    tracing::debug!(editor = %editor, path = %path.display(), "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| WidgetKvError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(WidgetKvError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    Ok(fs::read_to_string(path)?)
}

/// Opens an editor on `initial` and returns the edited encoded string.
pub fn edit_buffer(initial: &EditorBuffer) -> Result<String> {
    let temp_file = env::temp_dir().join(format!(
        "widgetkv_edit_{}_{}.txt",
        std::process::id(),
        sanitize(&format!("{}_{}", initial.widget, initial.field))
    ));

    fs::write(&temp_file, initial.to_buffer())?;
    let result = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    Ok(EditorBuffer::encoded_from_buffer(&result?))
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_buffer_one_pair_per_line() {
        let buffer = EditorBuffer::new(
            "format",
            "options",
            PairKind::ValueLabelPair,
            "csv;CSV,json;JSON".to_string(),
        );
        let text = buffer.to_buffer();
        assert!(text.starts_with(
            "# widgetkv: format.options\n# widgetkv: One pair per line: value;label\n"
        ));
        assert!(text.ends_with("csv;CSV\njson;JSON\n"));
    }

    #[test]
    fn test_to_buffer_keeps_escaped_delimiters_inline() {
        let buffer = EditorBuffer::new(
            "w",
            "f",
            PairKind::IdLabelPair,
            "a\\,b;x,c\\\\;y".to_string(),
        );
        let text = buffer.to_buffer();
        assert!(text.ends_with("a\\,b;x\nc\\\\;y\n"));
    }

    #[test]
    fn test_roundtrip() {
        let original = EditorBuffer::new(
            "mode",
            "options",
            PairKind::IdLabelPair,
            "a;Alpha,b;Beta,c".to_string(),
        );
        let encoded = EditorBuffer::encoded_from_buffer(&original.to_buffer());
        assert_eq!(encoded, original.encoded);
    }

    #[test]
    fn test_empty_list_roundtrip() {
        let original = EditorBuffer::new("w", "f", PairKind::IdLabelPair, String::new());
        assert_eq!(EditorBuffer::encoded_from_buffer(&original.to_buffer()), "");
    }

    #[test]
    fn test_from_buffer_skips_header_and_blank_lines() {
        let buffer = "# widgetkv: header\n\ncsv;CSV\r\n   \n\njson;JSON\n";
        assert_eq!(EditorBuffer::encoded_from_buffer(buffer), "csv;CSV,json;JSON");
    }

    #[test]
    fn test_roundtrip_keeps_hash_prefixed_keys() {
        let original = EditorBuffer::new(
            "color",
            "options",
            PairKind::ValueLabelPair,
            "#fff;White,#000;Black".to_string(),
        );
        let encoded = EditorBuffer::encoded_from_buffer(&original.to_buffer());
        assert_eq!(encoded, original.encoded);
    }

    #[test]
    fn test_roundtrip_keeps_trailing_whitespace_in_labels() {
        let original = EditorBuffer::new(
            "w",
            "f",
            PairKind::IdLabelPair,
            "a;padded  ,b;B".to_string(),
        );
        let encoded = EditorBuffer::encoded_from_buffer(&original.to_buffer());
        assert_eq!(encoded, original.encoded);
    }

    #[test]
    fn test_sanitize_temp_name() {
        assert_eq!(sanitize("format_options"), "format_options");
        assert_eq!(sanitize("a/b c"), "a_b_c");
    }
}
