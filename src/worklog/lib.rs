//! # Worklog Architecture
//!
//! Worklog is a small time tracker: log what you worked on and for how long,
//! then list it by day, week, project or tag. Entries live in one
//! newline-delimited JSON file in the user's data directory.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Parses arguments, prints results, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Parses entry numbers, supplies time and retention        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - One module per command, returns a structured CmdResult   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Lifecycle / Backup / Health                                │
//! │  - Soft delete, restore, purge; snapshot ring; diagnostics  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store (store/) + Codec (codec.rs)                          │
//! │  - EntryStore trait: FileStore, InMemoryStore               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward nothing writes to stdout/stderr or exits the process;
//! every operation returns a `Result`.
//!
//! ## Fault Tolerance
//!
//! - A line that fails to decode is skipped and reported, never fatal.
//! - A missing store file is an empty log, never an error.
//! - Every rewrite goes through a temp file and a rename.
//! - Every destructive rewrite is preceded by a snapshot in a three-slot ring.
//!
//! Entries are identified by position only. There is no locking: two processes
//! rewriting the same file at once means the last one wins.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade used by the binary
//! - [`commands`]: Per-command logic
//! - [`lifecycle`]: Soft delete, restore, purge
//! - [`backup`]: Backup ring
//! - [`health`]: Store diagnostics
//! - [`store`]: Storage trait and implementations
//! - [`codec`]: Entry ↔ line encoding
//! - [`model`]: `Entry`, `ParseWarning`
//! - [`index`]: 1-based entry numbers
//! - [`duration`]: Duration parsing and formatting
//! - [`config`], [`paths`], [`clock`], [`init`]: wiring

pub mod api;
pub mod backup;
pub mod clock;
pub mod codec;
pub mod commands;
pub mod config;
pub mod duration;
pub mod error;
pub mod health;
pub mod index;
pub mod init;
pub mod lifecycle;
pub mod model;
pub mod paths;
pub mod store;
