//! Domain - Pure Data Structures and Upstream Schemas
//!
//! These types don't touch the network and represent the catalog domain.

pub mod detail;
pub mod favorite;
pub mod filter;
pub mod game;
pub mod item;
pub mod preferences;
pub mod reference;
pub mod resources;

pub use detail::ItemDetail;
pub use favorite::{Favorite, FavoritesStore};
pub use filter::{FilterKind, FilterSpec};
pub use game::{GameEntry, GameWindow};
pub use item::{Item, ItemPage};
pub use preferences::{JsonFileStore, KeyValueStore, MemoryStore, Preferences};
pub use reference::{ItemReference, ListPage};
