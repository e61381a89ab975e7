pub mod bot_client;
pub mod clementine;
pub mod identity;
pub mod registry;

pub use bot_client::BotClient;
pub use clementine::ClementineClient;
pub use identity::{IdentityService, Scope};
pub use registry::BotRegistry;
