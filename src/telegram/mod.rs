//! Telegram Bot API integration.
//!
//! This module provides the inbound side of the relay: long polling for
//! updates and turning them into `InboundEvent`s.

pub mod poller;
pub mod types;

pub use poller::TelegramPoller;
