//! The editing session: loaded archive, tabs, selection and tree state.
//!
//! A [`SessionStore`] is an explicit state container owned by whatever
//! drives the UI (the browser binding, the CLI, or a test). All mutation
//! goes through named operations, and operations on unknown tabs or paths
//! are silent no-ops that report `false`.
//!
//! # Example
//!
//! ```rust,no_run
//! use ziplens::{SessionStore, Upload};
//!
//! # async fn run() -> ziplens::Result<()> {
//! let mut session = SessionStore::new();
//! let bytes = std::fs::read("site.zip")?;
//! session.open_upload(Upload::new("site.zip", bytes)?).await?;
//!
//! session.open_tab("index.html");
//! session.apply_edit("index.html", "<h1>Hi</h1>".to_string());
//! assert!(session.active_tab().unwrap().is_dirty());
//!
//! let exported = session.export(&Default::default())?;
//! std::fs::write(&exported.file_name, &exported.bytes)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Loading
//!
//! Building a model is asynchronous. [`SessionStore::begin_load`] hands out
//! a [`LoadTicket`] and [`SessionStore::finish_load`] publishes the result.
//! When a second upload starts before the first finishes, the newer ticket
//! wins: the older result is discarded with [`Error::StaleLoad`] when it
//! arrives, and the session only ever shows the most recent upload.
//!
//! [`Error::StaleLoad`]: crate::Error::StaleLoad

mod store;
mod tab;

pub use store::{LoadTicket, SessionStore};
pub use tab::Tab;
