use std::collections::BTreeMap;

use axum::body::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::modules::storage::AssetKind;
use crate::shared::constants::{IMAGE_CONTENT_TYPE_PREFIX, ZIP_CONTENT_TYPES};
use crate::shared::types::FieldError;
use crate::shared::validation::INTEGER_REGEX;

/// Upload game request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct UploadGameDto {
    /// Display name, defaults to "Unknown Game"
    #[schema(example = "Space Runner")]
    pub game_name: Option<String>,
    /// Free text, defaults to "No description provided"
    pub description: Option<String>,
    /// Id of an existing category
    #[schema(example = "3")]
    pub category_id: Option<String>,
    /// Thumbnail image (any `image/*` type)
    #[schema(format = Binary, content_media_type = "image/png")]
    pub thumbnail: Option<String>,
    /// Zipped WebGL build
    #[schema(format = Binary, content_media_type = "application/zip")]
    pub webgl_folder: Option<String>,
}

/// File fields the upload form knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadField {
    Thumbnail,
    WebglFolder,
}

impl UploadField {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "thumbnail" => Some(Self::Thumbnail),
            "webglFolder" => Some(Self::WebglFolder),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Thumbnail => "thumbnail",
            Self::WebglFolder => "webglFolder",
        }
    }

    /// Asset kind a part under this field must classify as
    pub fn expected_kind(self) -> AssetKind {
        match self {
            Self::Thumbnail => AssetKind::Image,
            Self::WebglFolder => AssetKind::GameArchive,
        }
    }
}

/// A file part read from the request, not yet written anywhere
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub field: UploadField,
    pub original_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Everything the upload form carried, before validation
#[derive(Debug, Default)]
pub struct UploadGameForm {
    pub game_name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub thumbnail: Option<IncomingFile>,
    pub webgl_folder: Option<IncomingFile>,
    /// Problems found while reading parts, e.g. a file sent where text was expected
    pub rejected_fields: Vec<FieldError>,
}

/// Validated text fields of the upload form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
}

impl UploadGameForm {
    pub const GAME_NAME_MESSAGE: &'static str = "Game name should be a non-empty string";
    pub const DESCRIPTION_MESSAGE: &'static str = "Description should be a string";
    pub const CATEGORY_ID_MESSAGE: &'static str = "Category ID must be a number";

    /// Message reported when a text field arrives as a file part
    pub fn text_field_message(name: &str) -> Option<&'static str> {
        match name {
            "gameName" => Some(Self::GAME_NAME_MESSAGE),
            "description" => Some(Self::DESCRIPTION_MESSAGE),
            "categoryId" => Some(Self::CATEGORY_ID_MESSAGE),
            _ => None,
        }
    }

    pub fn has_files(&self) -> bool {
        self.thumbnail.is_some() || self.webgl_folder.is_some()
    }

    /// Attached files in a fixed order (thumbnail first)
    pub fn files(&self) -> impl Iterator<Item = &IncomingFile> {
        self.thumbnail.iter().chain(self.webgl_folder.iter())
    }

    /// Check the text fields.
    ///
    /// Every field is optional. An empty `description` or `categoryId` counts as absent.
    pub fn validate_fields(&self) -> Result<GameFields, Vec<FieldError>> {
        let mut errors = self.rejected_fields.clone();

        if let Some(name) = &self.game_name {
            if name.is_empty() {
                errors.push(FieldError::new("gameName", Self::GAME_NAME_MESSAGE));
            }
        }

        let category_id = match self.category_id.as_deref() {
            None | Some("") => None,
            Some(raw) => {
                let parsed = INTEGER_REGEX
                    .is_match(raw)
                    .then(|| raw.parse::<i64>().ok())
                    .flatten();
                if parsed.is_none() {
                    errors.push(FieldError::new("categoryId", Self::CATEGORY_ID_MESSAGE));
                }
                parsed
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(GameFields {
            name: self.game_name.clone(),
            description: self.description.clone().filter(|d| !d.is_empty()),
            category_id,
        })
    }
}

/// Map a declared content type to its storage destination.
///
/// Only the client-declared type is consulted; file bytes are not sniffed.
pub fn classify_content_type(content_type: &str) -> Option<AssetKind> {
    if content_type.starts_with(IMAGE_CONTENT_TYPE_PREFIX) {
        Some(AssetKind::Image)
    } else if ZIP_CONTENT_TYPES.contains(&content_type) {
        Some(AssetKind::GameArchive)
    } else {
        None
    }
}

/// Description of a stored upload, keyed like the original form field
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoredFileDto {
    pub fieldname: String,
    pub originalname: String,
    pub mimetype: String,
    /// Generated name on disk
    pub filename: String,
    /// Path on disk at the time the file was written
    pub path: String,
    pub size: u64,
}

/// Response DTO for a successful upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadGameResponseDto {
    pub message: String,
    /// Stored files grouped by form field
    pub files: BTreeMap<String, Vec<StoredFileDto>>,
    pub game_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> UploadGameForm {
        UploadGameForm::default()
    }

    #[test]
    fn test_classify_images() {
        assert_eq!(classify_content_type("image/png"), Some(AssetKind::Image));
        assert_eq!(classify_content_type("image/jpeg"), Some(AssetKind::Image));
        assert_eq!(classify_content_type("image/svg+xml"), Some(AssetKind::Image));
    }

    #[test]
    fn test_classify_archives() {
        assert_eq!(
            classify_content_type("application/zip"),
            Some(AssetKind::GameArchive)
        );
        assert_eq!(
            classify_content_type("application/x-zip-compressed"),
            Some(AssetKind::GameArchive)
        );
    }

    #[test]
    fn test_classify_rejects_everything_else() {
        for content_type in [
            "text/plain",
            "application/octet-stream",
            "application/x-tar",
            "application/zip; charset=binary",
            "IMAGE/PNG",
            "",
        ] {
            assert_eq!(classify_content_type(content_type), None, "{}", content_type);
        }
    }

    #[test]
    fn test_all_fields_absent_is_valid() {
        let fields = form().validate_fields().unwrap();
        assert_eq!(
            fields,
            GameFields {
                name: None,
                description: None,
                category_id: None
            }
        );
    }

    #[test]
    fn test_valid_fields() {
        let form = UploadGameForm {
            game_name: Some("Space Runner".to_string()),
            description: Some(String::new()),
            category_id: Some("3".to_string()),
            ..form()
        };

        let fields = form.validate_fields().unwrap();
        assert_eq!(fields.name.as_deref(), Some("Space Runner"));
        assert_eq!(fields.description, None);
        assert_eq!(fields.category_id, Some(3));
    }

    #[test]
    fn test_empty_category_id_is_absent() {
        let form = UploadGameForm {
            category_id: Some(String::new()),
            ..form()
        };
        assert_eq!(form.validate_fields().unwrap().category_id, None);
    }

    #[test]
    fn test_invalid_fields_are_all_reported() {
        let form = UploadGameForm {
            game_name: Some(String::new()),
            category_id: Some("three".to_string()),
            rejected_fields: vec![FieldError::new(
                "description",
                UploadGameForm::DESCRIPTION_MESSAGE,
            )],
            ..form()
        };

        let errors = form.validate_fields().unwrap_err();
        assert_eq!(
            errors,
            vec![
                FieldError::new("description", "Description should be a string"),
                FieldError::new("gameName", "Game name should be a non-empty string"),
                FieldError::new("categoryId", "Category ID must be a number"),
            ]
        );
    }

    #[test]
    fn test_category_id_sign_and_leading_zeros() {
        let signed = UploadGameForm {
            category_id: Some("+3".to_string()),
            ..form()
        };
        assert_eq!(signed.validate_fields().unwrap().category_id, Some(3));

        let padded = UploadGameForm {
            category_id: Some("007".to_string()),
            ..form()
        };
        assert_eq!(
            padded.validate_fields().unwrap_err(),
            vec![FieldError::new("categoryId", "Category ID must be a number")]
        );
    }

    #[test]
    fn test_out_of_range_category_id_is_rejected() {
        let form = UploadGameForm {
            category_id: Some("99999999999999999999".to_string()),
            ..form()
        };
        assert_eq!(form.validate_fields().unwrap_err().len(), 1);
    }

    #[test]
    fn test_upload_field_names() {
        assert_eq!(UploadField::from_name("thumbnail"), Some(UploadField::Thumbnail));
        assert_eq!(
            UploadField::from_name("webglFolder"),
            Some(UploadField::WebglFolder)
        );
        assert_eq!(UploadField::from_name("gameName"), None);
        assert_eq!(UploadField::WebglFolder.as_str(), "webglFolder");
    }
}
