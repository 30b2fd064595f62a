//! Discord integration.
//!
//! The relay only talks to Discord through an incoming webhook, so no
//! gateway connection or bot token is needed on this side.

pub mod webhook;

pub use webhook::WebhookClient;
