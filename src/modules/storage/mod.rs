//! Local filesystem storage for uploaded assets
//!
//! Owns the upload directory tree and the extraction of game bundles.

mod archive;
mod layout;

pub use archive::ArchiveExtractor;
pub use layout::{original_extension, AssetKind, StorageLayout};
