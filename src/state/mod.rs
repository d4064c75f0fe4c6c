//! State - Feed Controllers
//!
//! Stateful controllers the presentation layer drives: one generic
//! pagination controller per feed, the filtered feed that swaps controllers
//! on filter change, and the search controller.

mod controller;
mod filtered;
mod pagination;
mod search_state;
mod sources;

pub use controller::*;
pub use filtered::*;
pub use pagination::*;
pub use search_state::*;
pub use sources::*;
