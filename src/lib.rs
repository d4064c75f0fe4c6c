//! Pokedex Catalog Core Library
//!
//! Client-side data layer for a catalog browser over PokeAPI: batched range
//! fetching, a shared result cache, relevance search, derived-list
//! resolution and infinite-scroll pagination controllers.

pub mod constants;
pub mod domain;
pub mod error;
pub mod helpers;
pub mod i18n;
pub mod services;
pub mod state;
pub mod utils;

pub use error::{Error, Result};
