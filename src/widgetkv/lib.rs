//! # widgetkv Architecture
//!
//! widgetkv edits the key-value widget attributes of plugin JSON definitions: the
//! `options` lists of `{id|value, label}` objects behind radio groups, selects and
//! dropdowns. Editors show such a list as a single string, `key1;label1,key2;label2`,
//! and the [`codec`] converts between the two forms.
//!
//! Like most of the crate, the CLI is a client of the library, not the other way
//! around.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints results, sets up logging        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Resolves the codec from config + per-call overrides      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - encode, decode, get, set, list, remove, import, export   │
//! │  - Returns CmdResult with data and messages                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core: codec.rs, model.rs, widget.rs, plugin.rs             │
//! │  Storage: store/ (FileStore, InMemoryStore)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`codec`]: Pair types and the delimited string format
//! - [`model`]: The widget → field → pairs map and scopes
//! - [`widget`]: Props for a key-value text input, and writing edits back
//! - [`plugin`]: Reading and writing pair lists in plugin JSON documents
//! - [`api`]: The API facade
//! - [`commands`]: Logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`config`]: Configuration management
//! - [`editor`]: External editor integration
//! - [`init`]: Locating the project store and building the API
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod init;
pub mod model;
pub mod plugin;
pub mod store;
pub mod widget;
