// Adapters layer: concrete implementations for external systems (model hub, terminal input).
// Local filesystem storage lives under src/config/cli.rs.

pub mod hub;
pub mod prompt;

pub use hub::HfHubClient;
pub use prompt::StdinPrompter;
