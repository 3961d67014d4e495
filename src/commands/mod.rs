pub mod auth;
pub mod config;
pub mod show;

/// Weeks shown when no range is given
pub const DEFAULT_NUM_WEEKS: u32 = 3;
