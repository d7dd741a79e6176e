//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for UI clients (the CLI today).
//!
//! It dispatches to the right command and resolves the codec for a call from the
//! scope configuration plus any per-call overrides. It does no I/O of its own and
//! returns data, not strings.
//!
//! `WidgetKvApi<S: AttributeStore>` is generic over the storage backend:
//! - Production: `WidgetKvApi<FileStore>`
//! - Testing: `WidgetKvApi<InMemoryStore>`

use crate::codec::{KeyValueCodec, PairKind};
use crate::commands;
use crate::config::WidgetKvConfig;
use crate::error::Result;
use crate::model::Scope;
use crate::store::AttributeStore;
use std::path::{Path, PathBuf};

/// Per-call overrides of the configured codec settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodecOverrides {
    pub kind: Option<PairKind>,
    pub escape: Option<bool>,
}

/// The main API facade for widgetkv operations.
pub struct WidgetKvApi<S: AttributeStore> {
    store: S,
    paths: commands::WidgetKvPaths,
    config: WidgetKvConfig,
}

impl<S: AttributeStore> WidgetKvApi<S> {
    pub fn new(store: S, paths: commands::WidgetKvPaths, config: WidgetKvConfig) -> Self {
        Self {
            store,
            paths,
            config,
        }
    }

    pub fn codec(&self, overrides: CodecOverrides) -> KeyValueCodec {
        self.config.codec(overrides.kind, overrides.escape)
    }

    pub fn encode(&self, overrides: CodecOverrides, json: &str) -> Result<commands::CmdResult> {
        commands::encode::run(&self.codec(overrides), json)
    }

    pub fn decode(&self, overrides: CodecOverrides, encoded: &str) -> Result<commands::CmdResult> {
        commands::decode::run(&self.codec(overrides), encoded)
    }

    pub fn get_field(
        &self,
        scope: Scope,
        overrides: CodecOverrides,
        widget: &str,
        field: &str,
    ) -> Result<commands::CmdResult> {
        commands::get::run(&self.store, scope, &self.codec(overrides), widget, field)
    }

    pub fn set_field(
        &mut self,
        scope: Scope,
        overrides: CodecOverrides,
        widget: &str,
        field: &str,
        encoded: &str,
    ) -> Result<commands::CmdResult> {
        let codec = self.codec(overrides);
        commands::set::run(&mut self.store, scope, &codec, widget, field, encoded)
    }

    pub fn list_fields(&self, scope: Scope) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, scope)
    }

    pub fn remove_field(
        &mut self,
        scope: Scope,
        widget: &str,
        field: &str,
    ) -> Result<commands::CmdResult> {
        commands::remove::run(&mut self.store, scope, widget, field)
    }

    pub fn import_plugin(&mut self, scope: Scope, path: &Path) -> Result<commands::CmdResult> {
        commands::import::run(&mut self.store, scope, path)
    }

    pub fn export_plugin(
        &self,
        scope: Scope,
        plugin: &Path,
        output: Option<&Path>,
    ) -> Result<commands::CmdResult> {
        commands::export::run(&self.store, scope, plugin, output)
    }

    pub fn document_path(&self, scope: Scope) -> Result<PathBuf> {
        self.store.document_path(scope)
    }

    pub fn config(&self, scope: Scope, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, scope, action)
    }

    pub fn init(&self, scope: Scope) -> Result<commands::CmdResult> {
        commands::init::run(&self.paths, scope)
    }

    pub fn paths(&self) -> &commands::WidgetKvPaths {
        &self.paths
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, ListedField, MessageLevel, WidgetKvPaths};
