//! Client library for the RADIUS/NAS provisioning API.
//!
//! [`Console`] wraps an authenticated [`gateway::Gateway`] and hands out one
//! typed client per resource. All HTTP traffic, including token refresh,
//! goes through the gateway.
//!
//! ARCHITECTURE
//! ============
//! - [`services`]: resource clients and their wire models.
//! - [`paging`]: the `{count, next, previous, results}` page envelope.
//! - [`tree`]: flattening and parent lookups for group hierarchies.

pub mod console;
pub mod error;
pub mod paging;
pub mod services;
pub mod tree;

pub use console::Console;
pub use error::ConsoleError;
pub use paging::{Page, PageParams};
