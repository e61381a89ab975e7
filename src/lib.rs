pub mod server;

// Re-export the pieces the binary and tests wire together.
pub use server::config::{configure_app, AppState};
pub use server::configuration::{get_configuration, Settings};
