// Library root for the fieldglass app: configuration, data sources, the player
// session, text views and CSV export. main.rs is a thin CLI over these.

pub mod config;
pub mod export;
pub mod session;
pub mod source;
pub mod view;
