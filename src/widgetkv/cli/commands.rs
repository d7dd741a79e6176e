//! # CLI Layer
//!
//! This module is **one possible UI client** for widgetkv. It is the only place
//! that knows about stdin/stdout/stderr, process exit codes and logging setup.
//!
//! Each handler parses its arguments, calls `WidgetKvApi`, and prints the
//! returned `CmdResult`. Plain output (encoded strings, JSON) goes to stdout so
//! it can be piped; messages at warning level and above go to stderr.

use super::print::{print_config, print_listed_fields, print_messages};
use super::setup::{Cli, CodecArgs, Commands};
use clap::Parser;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use widgetkv::api::{CmdResult, CodecOverrides, ConfigAction};
use widgetkv::codec::PairKind;
use widgetkv::editor::{edit_buffer, EditorBuffer};
use widgetkv::error::{Result, WidgetKvError};
use widgetkv::init::{initialize, WidgetKvContext};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut ctx = initialize(&cwd, cli.global)?;

    match cli.command {
        Some(Commands::Encode { codec, json }) => handle_encode(&ctx, &codec, json),
        Some(Commands::Decode { codec, encoded }) => handle_decode(&ctx, &codec, encoded),
        Some(Commands::Get {
            codec,
            widget,
            field,
            json,
        }) => handle_get(&ctx, &codec, &widget, &field, json),
        Some(Commands::Set {
            codec,
            widget,
            field,
            encoded,
        }) => handle_set(&mut ctx, &codec, &widget, &field, &encoded),
        Some(Commands::Edit {
            codec,
            widget,
            field,
        }) => handle_edit(&mut ctx, &codec, &widget, &field),
        Some(Commands::Remove { widget, field }) => handle_remove(&mut ctx, &widget, &field),
        Some(Commands::Import { file }) => handle_import(&mut ctx, file),
        Some(Commands::Export { file, output }) => handle_export(&ctx, file, output),
        Some(Commands::Path) => handle_path(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Init) => handle_init(&ctx),
        Some(Commands::List) | None => handle_list(&ctx),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("widgetkv=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn overrides(args: &CodecArgs) -> Result<CodecOverrides> {
    let kind = args
        .kind
        .as_deref()
        .map(str::parse::<PairKind>)
        .transpose()?;
    let escape = match (args.escape, args.no_escape) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };
    Ok(CodecOverrides { kind, escape })
}

/// Uses the argument if given, otherwise reads piped stdin.
fn arg_or_stdin(arg: Option<String>, what: &str) -> Result<String> {
    if let Some(value) = arg {
        return Ok(value);
    }
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(WidgetKvError::Api(format!(
            "No {} given (pass it as an argument or pipe it in)",
            what
        )));
    }
    let mut buffer = String::new();
    stdin.read_to_string(&mut buffer)?;
    Ok(buffer.trim_end_matches(['\n', '\r']).to_string())
}

fn print_encoded(result: &CmdResult) {
    if let Some(encoded) = &result.encoded {
        println!("{}", encoded);
    }
}

fn handle_encode(ctx: &WidgetKvContext, codec: &CodecArgs, json: Option<String>) -> Result<()> {
    let json = arg_or_stdin(json, "JSON array")?;
    let result = ctx.api.encode(overrides(codec)?, &json)?;
    print_encoded(&result);
    print_messages(&result.messages);
    Ok(())
}

fn handle_decode(
    ctx: &WidgetKvContext,
    codec: &CodecArgs,
    encoded: Option<String>,
) -> Result<()> {
    let encoded = arg_or_stdin(encoded, "encoded string")?;
    let result = ctx.api.decode(overrides(codec)?, &encoded)?;
    println!("{}", serde_json::to_string_pretty(&result.pairs)?);
    print_messages(&result.messages);
    Ok(())
}

fn handle_get(
    ctx: &WidgetKvContext,
    codec: &CodecArgs,
    widget: &str,
    field: &str,
    json: bool,
) -> Result<()> {
    let result = ctx
        .api
        .get_field(ctx.scope, overrides(codec)?, widget, field)?;
    match (&result.input, json) {
        (Some(input), true) => println!("{}", serde_json::to_string_pretty(input)?),
        _ => print_encoded(&result),
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_set(
    ctx: &mut WidgetKvContext,
    codec: &CodecArgs,
    widget: &str,
    field: &str,
    encoded: &str,
) -> Result<()> {
    let result = ctx
        .api
        .set_field(ctx.scope, overrides(codec)?, widget, field, encoded)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(
    ctx: &mut WidgetKvContext,
    codec: &CodecArgs,
    widget: &str,
    field: &str,
) -> Result<()> {
    let overrides = overrides(codec)?;
    let kind = ctx.api.codec(overrides).kind();
    let current = ctx.api.get_field(ctx.scope, overrides, widget, field)?;

    let initial = EditorBuffer::new(widget, field, kind, current.encoded.unwrap_or_default());
    let edited = edit_buffer(&initial)?;

    if edited == initial.encoded {
        println!("No changes.");
        return Ok(());
    }

    let result = ctx
        .api
        .set_field(ctx.scope, overrides, widget, field, &edited)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &WidgetKvContext) -> Result<()> {
    let result = ctx.api.list_fields(ctx.scope)?;
    print_listed_fields(&result.listed_fields);
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove(ctx: &mut WidgetKvContext, widget: &str, field: &str) -> Result<()> {
    let result = ctx.api.remove_field(ctx.scope, widget, field)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(ctx: &mut WidgetKvContext, file: PathBuf) -> Result<()> {
    let result = ctx.api.import_plugin(ctx.scope, &file)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &WidgetKvContext, file: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let result = ctx
        .api
        .export_plugin(ctx.scope, &file, output.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_path(ctx: &WidgetKvContext) -> Result<()> {
    println!("{}", ctx.api.document_path(ctx.scope)?.display());
    Ok(())
}

fn handle_config(ctx: &WidgetKvContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(ctx.scope, action)?;
    if let (Some(config), true) = (&result.config, result.messages.is_empty()) {
        print_config(config);
    }
    print_messages(&result.messages);
    if result.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

fn handle_init(ctx: &WidgetKvContext) -> Result<()> {
    let result = ctx.api.init(ctx.scope)?;
    print_messages(&result.messages);
    Ok(())
}
