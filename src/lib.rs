//! # ziplens
//!
//! An in-memory ZIP archive model with a multi-tab editing session.
//!
//! This crate unpacks an uploaded `.zip` into a directory tree plus a flat
//! path index, classifies every entry as text, image, or binary, tracks
//! open tabs and unsaved edits, and re-encodes the edited archive with
//! untouched entries preserved byte-for-byte.
//!
//! ## Quick Start
//!
//! ### Browsing an Archive
//!
//! ```rust,no_run
//! use ziplens::{ArchiveModel, EntryKind, Result, Upload};
//!
//! fn main() -> Result<()> {
//!     let bytes = std::fs::read("site.zip")?;
//!     let upload = Upload::new("site.zip", bytes)?;
//!     let model = futures::executor::block_on(ArchiveModel::from_upload(upload))?;
//!
//!     for entry in model.walk() {
//!         match entry.kind() {
//!             EntryKind::Directory => println!("{}", entry.path()),
//!             kind => println!("{} ({}, {} bytes)", entry.path(), kind, entry.size()),
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Editing and Exporting
//!
//! ```rust,no_run
//! use ziplens::{ExportOptions, Result, SessionStore, Upload};
//!
//! fn main() -> Result<()> {
//!     let mut session = SessionStore::new();
//!     let upload = Upload::new("site.zip", std::fs::read("site.zip")?)?;
//!     futures::executor::block_on(session.open_upload(upload))?;
//!
//!     session.open_tab("index.html");
//!     let outcome = session.apply_edit("index.html", "<h1>Hello</h1>".to_string());
//!     println!("edit: {}", outcome);
//!
//!     let exported = session.export(&ExportOptions::default())?;
//!     std::fs::write(&exported.file_name, &exported.bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `wasm` | No | WebAssembly/browser bindings |
//! | `cli` | No | Command-line interface tool |
//!
//! ## Error Handling
//!
//! Fallible operations return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`. Problems with a single entry never fail
//! a build: unreadable names are skipped and undecodable text becomes a
//! sentinel message. Session operations on unknown tabs or paths are no-ops
//! that report `false`.
//!
//! ```rust,no_run
//! use ziplens::{ArchiveModel, Error, Upload};
//!
//! fn open(name: &str, bytes: Vec<u8>) -> ziplens::Result<ArchiveModel> {
//!     let upload = match Upload::new(name, bytes) {
//!         Ok(upload) => upload,
//!         Err(e @ Error::UnsupportedUpload { .. }) => {
//!             eprintln!("{}", e);
//!             return Err(e);
//!         }
//!         Err(e) => return Err(e),
//!     };
//!     futures::executor::block_on(ArchiveModel::from_upload(upload))
//! }
//! # fn main() {}
//! ```
//!
//! ## Minimum Supported Rust Version (MSRV)
//!
//! This crate requires **Rust 1.85** or later.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod archive_path;
pub mod classify;
pub mod edit;
pub mod error;
pub mod export;
pub mod model;
pub mod options;
pub mod session;
pub mod source;

pub use archive_path::EntryPath;
pub use classify::EntryKind;
pub use edit::EditOutcome;
pub use error::{Error, Result};
pub use export::{ExportedArchive, export_archive, serialize};
pub use model::{ArchiveModel, Entry, EntryContent, ImageBlob, ModelBuilder, TreeRow, format_size};
pub use options::{BuildOptions, ExportMethod, ExportOptions};
pub use session::{LoadTicket, SessionStore, Tab};
pub use source::{ArchiveSource, SourceEntry, Upload, ZipSource};

// WASM/Browser support
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
#[cfg_attr(docsrs, doc(cfg(feature = "wasm")))]
pub mod wasm;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use wasm::WasmSession;
