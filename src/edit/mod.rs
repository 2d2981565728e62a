//! Text editing of loaded archives.
//!
//! Content changes go through [`SessionStore::apply_edit`], the only
//! operation that mutates an entry after the model is built. It keeps the
//! entry's size and the owning tab's dirty flag in step with the content.
//!
//! # Example
//!
//! ```rust,no_run
//! use ziplens::{EditOutcome, SessionStore, Upload};
//!
//! # async fn run() -> ziplens::Result<()> {
//! let mut session = SessionStore::new();
//! session.open_upload(Upload::new("notes.zip", std::fs::read("notes.zip")?)?).await?;
//! session.open_tab("todo.md");
//!
//! match session.apply_edit("todo.md", "- [x] ship it\n".to_string()) {
//!     EditOutcome::Applied { size, .. } => println!("now {} bytes", size),
//!     EditOutcome::Unchanged => println!("nothing to do"),
//!     other => println!("rejected: {}", other),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`SessionStore::apply_edit`]: crate::SessionStore::apply_edit

mod applier;

pub use applier::EditOutcome;
