//! Screen state machines, independent of HTTP.
//!
//! Each view owns its state and talks to the outside world only through a
//! [`CatalogClient`](crate::client::CatalogClient) handed in by the caller.

pub use dashboard::*;
pub use login::*;
pub use public::*;
pub use root::*;

mod dashboard;
mod login;
mod public;
mod root;
