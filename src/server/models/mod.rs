pub mod bot;
pub mod integration;
pub mod principal;

pub use bot::{Bot, BotKind, Phrase};
pub use integration::{IntegrationKey, IntegrationWrite};
pub use principal::Principal;
