//! Catalog persistence
//!
//! Games and categories live in two relational tables. Services talk to them
//! through the [`CatalogStore`] trait so the upload and listing code can run
//! against an in-memory store in tests.

mod models;
mod postgres;
mod store;

pub use models::{Category, Game, NewGame};
pub use postgres::PgCatalogStore;
pub use store::CatalogStore;
