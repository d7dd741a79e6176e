use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "widgetkv", bin_name = "widgetkv", version)]
#[command(
    about = "Edit key-value widget attributes of plugin JSON definitions",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Operate on the global store
    #[arg(short, long, global = true)]
    pub global: bool,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Codec options shared by commands that encode or decode.
#[derive(Args, Debug, Clone, Default)]
pub struct CodecArgs {
    /// Key field of the pairs: id or value (defaults to the configured kind)
    #[arg(short, long)]
    pub kind: Option<String>,

    /// Backslash-escape delimiters inside keys and labels
    #[arg(long, conflicts_with = "no_escape")]
    pub escape: bool,

    /// Do not escape delimiters, even if configured
    #[arg(long)]
    pub no_escape: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode a JSON array of pairs into a key-value string
    #[command(alias = "enc")]
    Encode {
        #[command(flatten)]
        codec: CodecArgs,

        /// JSON array, e.g. '[{"value":"a","label":"A"}]' (reads stdin if omitted)
        json: Option<String>,
    },

    /// Decode a key-value string into a JSON array of pairs
    #[command(alias = "dec")]
    Decode {
        #[command(flatten)]
        codec: CodecArgs,

        /// Encoded string, e.g. 'a;A,b;B' (reads stdin if omitted)
        encoded: Option<String>,
    },

    /// Print the encoded pairs stored for a widget attribute
    Get {
        #[command(flatten)]
        codec: CodecArgs,

        /// Widget (property) name
        widget: String,

        /// Attribute field, e.g. options
        field: String,

        /// Print the editor input as JSON instead of the bare string
        #[arg(long)]
        json: bool,
    },

    /// Store pairs for a widget attribute from a key-value string
    Set {
        #[command(flatten)]
        codec: CodecArgs,

        /// Widget (property) name
        widget: String,

        /// Attribute field, e.g. options
        field: String,

        /// Encoded string, e.g. 'a;A,b;B'
        encoded: String,
    },

    /// Edit the pairs of a widget attribute in $EDITOR
    #[command(alias = "e")]
    Edit {
        #[command(flatten)]
        codec: CodecArgs,

        /// Widget (property) name
        widget: String,

        /// Attribute field, e.g. options
        field: String,
    },

    /// List stored attribute lists
    #[command(alias = "ls")]
    List,

    /// Remove a stored attribute list
    #[command(alias = "rm")]
    Remove {
        /// Widget (property) name
        widget: String,

        /// Attribute field, e.g. options
        field: String,
    },

    /// Import key-value attributes from a plugin JSON file
    Import {
        /// Plugin JSON file
        file: PathBuf,
    },

    /// Write stored attributes into a plugin JSON file
    Export {
        /// Plugin JSON file to update
        file: PathBuf,

        /// Write the result here instead of updating the file in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the path of the attribute document
    Path,

    /// Get or set configuration
    Config {
        /// Configuration key (default-kind, escape, document)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Initialize the store
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_set_with_codec_flags() {
        let cli = Cli::try_parse_from([
            "widgetkv", "set", "--kind", "id", "--escape", "mode", "options", "a;A",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Set {
                codec,
                widget,
                field,
                encoded,
            }) => {
                assert_eq!(codec.kind.as_deref(), Some("id"));
                assert!(codec.escape);
                assert_eq!(widget, "mode");
                assert_eq!(field, "options");
                assert_eq!(encoded, "a;A");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["widgetkv", "ls", "-g", "-v"]).unwrap();
        assert!(cli.global);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn escape_flags_conflict() {
        assert!(Cli::try_parse_from(["widgetkv", "decode", "--escape", "--no-escape", "a"]).is_err());
    }

    #[test]
    fn decode_input_is_optional() {
        let cli = Cli::try_parse_from(["widgetkv", "dec", "-k", "value"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Decode { encoded: None, .. })
        ));
    }
}
