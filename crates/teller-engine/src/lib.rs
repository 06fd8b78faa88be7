//! Story traversal for Teller.
//!
//! The [`Engine`] owns a shared, immutable [`Catalog`](teller_core::Catalog)
//! and a [`SessionStore`] holding one cursor per user. Each incoming message
//! is turned into a [`DisplayResult`] for the presentation adapter:
//!
//! - with no story active, the message must name a story, which starts it
//!   at its `start` page;
//! - inside a story, the message must exactly match one of the current
//!   page's options, which moves the cursor along that option;
//! - landing on an ending page reports the ending and clears the cursor;
//! - the reset keyword clears the cursor from any state.
//!
//! Rejected input never changes a session.

/// Engine configuration and reply texts.
pub mod config;
/// Results handed to the presentation adapter.
pub mod display;
/// The traversal engine.
pub mod engine;
/// Error types for the engine.
pub mod error;
/// Session snapshots on disk.
pub mod persist;
/// Per-user session state.
pub mod session;
/// Concurrent per-user session storage.
pub mod store;
/// The pure transition function behind the engine.
pub mod transition;

pub use config::EngineConfig;
pub use display::{DisplayResult, ErrorCode};
pub use engine::Engine;
pub use error::{EngineError, EngineResult, PersistError, TurnError};
pub use persist::{SessionRecord, SessionSnapshot};
pub use session::{Cursor, Session, SessionState, UserId};
pub use store::SessionStore;
pub use transition::{Step, transition};
