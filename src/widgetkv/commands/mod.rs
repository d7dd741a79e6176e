use crate::codec::AttributePair;
use crate::config::WidgetKvConfig;
use crate::error::{Result, WidgetKvError};
use crate::model::Scope;
use crate::widget::KeyValueInput;
use std::path::PathBuf;

pub mod config;
pub mod decode;
pub mod encode;
pub mod export;
pub mod get;
pub mod import;
pub mod init;
pub mod list;
pub mod remove;
pub mod set;

#[derive(Debug, Clone)]
pub struct WidgetKvPaths {
    pub project: Option<PathBuf>,
    pub global: PathBuf,
}

impl WidgetKvPaths {
    pub fn scope_dir(&self, scope: Scope) -> Result<PathBuf> {
        match scope {
            Scope::Project => self
                .project
                .clone()
                .ok_or_else(|| WidgetKvError::Store("Project scope is not available".to_string())),
            Scope::Global => Ok(self.global.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Summary of one stored list, for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedField {
    pub widget: String,
    pub field: String,
    pub pairs: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Encoded string produced by the command (encode, get)
    pub encoded: Option<String>,
    /// Pairs produced or affected by the command (decode, set)
    pub pairs: Vec<AttributePair>,
    /// Editor props for a single field (get)
    pub input: Option<KeyValueInput>,
    pub listed_fields: Vec<ListedField>,
    pub config: Option<WidgetKvConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_encoded(mut self, encoded: String) -> Self {
        self.encoded = Some(encoded);
        self
    }

    pub fn with_pairs(mut self, pairs: Vec<AttributePair>) -> Self {
        self.pairs = pairs;
        self
    }

    pub fn with_input(mut self, input: KeyValueInput) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_listed_fields(mut self, fields: Vec<ListedField>) -> Self {
        self.listed_fields = fields;
        self
    }

    pub fn with_config(mut self, config: WidgetKvConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|message| message.level == MessageLevel::Error)
    }
}
