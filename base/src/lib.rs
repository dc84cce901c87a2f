pub mod database;
pub mod setting;

pub const CLI_NAME: &str = "setlist";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// logging constants
pub const SETLIST_LOGLEVEL: &str = "SETLIST_LOGLEVEL";
