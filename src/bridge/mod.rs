//! Telegram -> Discord relay core.
//!
//! ## Module Structure
//!
//! - `filter`: block rules (`MessageFilter`)
//! - `relay`: scoping and forwarding (`RelayDispatcher`, `ScopeConfig`, `Sink`)

pub mod filter;
pub mod relay;

pub use filter::MessageFilter;
pub use relay::{RelayDispatcher, ScopeConfig, Sink};
