//! Dropbox-backed storage for diary files.
//!
//! Files are downloaded through the Dropbox content API with an OAuth2
//! session that refreshes itself, and kept in a local cache that is trusted
//! for a configurable number of seconds.
//!
//! The session is persisted at the configured `token_path` (TOML, owner-only).

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod session;
pub mod store;

pub use api::{DropboxRemote, RemoteFiles, http_client};
pub use cache::{CachedFile, FileCache};
pub use config::DropboxConfig;
pub use session::{Session, SessionData};
pub use store::{DiaryStore, ReadOptions};
