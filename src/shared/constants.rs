/// Content types accepted as zipped game bundles
pub const ZIP_CONTENT_TYPES: &[&str] = &["application/zip", "application/x-zip-compressed"];

/// Prefix shared by every accepted thumbnail content type
pub const IMAGE_CONTENT_TYPE_PREFIX: &str = "image/";

/// Name stored when the upload form carries no `gameName`
pub const DEFAULT_GAME_NAME: &str = "Unknown Game";

/// Description stored when the upload form carries no `description`
pub const DEFAULT_GAME_DESCRIPTION: &str = "No description provided";
