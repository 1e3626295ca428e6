//! Keygate Client Library
//!
//! Session-side counterpart to the Keygate server: an HTTP client for the
//! three authentication operations, a persisted-token store, and the
//! session state machine an application embeds to gate its views.

pub mod api;
pub mod error;
pub mod session;
pub mod storage;

pub use api::ApiClient;
pub use error::ClientError;
pub use session::{Session, SessionState};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};
