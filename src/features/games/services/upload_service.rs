use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::core::error::{AppError, Result};
use crate::features::games::dtos::{
    classify_content_type, IncomingFile, StoredFileDto, UploadGameForm, UploadGameResponseDto,
};
use crate::modules::catalog::{CatalogStore, NewGame};
use crate::modules::storage::{original_extension, ArchiveExtractor, AssetKind, StorageLayout};
use crate::shared::constants::{DEFAULT_GAME_DESCRIPTION, DEFAULT_GAME_NAME};

/// A file written to its final location
#[derive(Debug)]
struct StoredFile {
    kind: AssetKind,
    path: PathBuf,
    file_name: String,
    dto: StoredFileDto,
}

/// Service for the game upload pipeline
///
/// Validates the form, writes the accepted files, extracts the bundle and
/// records the game row. There is no rollback: when the insert fails, the
/// files written before it stay on disk.
pub struct UploadService {
    store: Arc<dyn CatalogStore>,
    layout: Arc<StorageLayout>,
    extractor: ArchiveExtractor,
}

impl UploadService {
    pub fn new(store: Arc<dyn CatalogStore>, layout: Arc<StorageLayout>) -> Self {
        let extractor = ArchiveExtractor::new(Arc::clone(&layout));
        Self {
            store,
            layout,
            extractor,
        }
    }

    /// Run the whole upload pipeline for one request
    pub async fn upload(&self, form: UploadGameForm) -> Result<UploadGameResponseDto> {
        // Every rejection happens before the first write
        for file in form.files() {
            Self::classify(file)?;
        }
        let fields = form.validate_fields().map_err(AppError::FieldValidation)?;
        if !form.has_files() {
            return Err(AppError::NoFilesProvided);
        }

        let mut files: BTreeMap<String, Vec<StoredFileDto>> = BTreeMap::new();

        let thumbnail_url = match &form.thumbnail {
            Some(file) => {
                let stored = self.store_file(file).await?;
                let url = self.layout.public_url(stored.kind, &stored.file_name);
                files.insert(file.field.as_str().to_string(), vec![stored.dto]);
                url
            }
            None => String::new(),
        };

        let game_url = match &form.webgl_folder {
            Some(file) => {
                let stored = self.store_file(file).await?;
                files.insert(file.field.as_str().to_string(), vec![stored.dto]);

                let bundle_root = self.extractor.extract(&stored.path).await?;
                let bundle_name = bundle_root
                    .file_name()
                    .and_then(|name| name.to_str())
                    .ok_or_else(|| {
                        AppError::Internal(format!(
                            "Bundle directory has no usable name: {}",
                            bundle_root.display()
                        ))
                    })?;
                self.layout.public_url(AssetKind::GameArchive, bundle_name)
            }
            None => String::new(),
        };

        let game = NewGame {
            name: fields
                .name
                .unwrap_or_else(|| DEFAULT_GAME_NAME.to_string()),
            description: fields
                .description
                .unwrap_or_else(|| DEFAULT_GAME_DESCRIPTION.to_string()),
            thumbnail_url,
            game_url,
            category_id: fields.category_id,
        };
        let game_name = game.name.clone();

        let game_id = self.store.insert_game(game).await.map_err(|e| {
            warn!(
                "Game '{}' files were stored but the catalog insert failed; they remain on disk",
                game_name
            );
            e
        })?;

        info!("Game uploaded: id={}, name={}", game_id, game_name);

        Ok(UploadGameResponseDto {
            message: "Game uploaded, extracted, and saved successfully!".to_string(),
            files,
            game_id,
        })
    }

    /// Destination of a part, checked against the field it was sent under
    fn classify(file: &IncomingFile) -> Result<AssetKind> {
        let kind = classify_content_type(&file.content_type)
            .filter(|kind| *kind == file.field.expected_kind())
            .ok_or_else(|| {
                AppError::UnsupportedFileType(format!(
                    "{} (field {})",
                    file.content_type,
                    file.field.as_str()
                ))
            })?;
        Ok(kind)
    }

    async fn store_file(&self, file: &IncomingFile) -> Result<StoredFile> {
        let kind = Self::classify(file)?;

        let mut extension = original_extension(&file.original_name);
        if kind == AssetKind::GameArchive && extension.is_empty() {
            // The bundle directory takes the archive's stem, so the archive needs an extension
            extension = ".zip".to_string();
        }

        let mut reserved = self.layout.create_unique_file(kind, &extension).await?;
        reserved.file.write_all(&file.data).await?;
        reserved.file.flush().await?;

        debug!(
            "Stored {} ({} bytes) as {}",
            file.original_name,
            file.data.len(),
            reserved.path.display()
        );

        Ok(StoredFile {
            kind,
            path: reserved.path.clone(),
            file_name: reserved.file_name.clone(),
            dto: StoredFileDto {
                fieldname: file.field.as_str().to_string(),
                originalname: file.original_name.clone(),
                mimetype: file.content_type.clone(),
                filename: reserved.file_name,
                path: reserved.path.to_string_lossy().into_owned(),
                size: file.data.len() as u64,
            },
        })
    }
}
