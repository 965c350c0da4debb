//! Zip bundle extraction
//!
//! An uploaded `games/<name>.zip` is unpacked into `games/<name>/`, which must end up
//! holding `index.html` at its top level. A build zipped together with its folder
//! (`MyGame/index.html`) is lifted one level up. The archive is removed only after
//! every entry has been written; on failure it stays in place so the upload can be
//! recovered by hand.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};
use zip::ZipArchive;

use crate::core::error::{AppError, Result};
use crate::modules::storage::StorageLayout;

/// Page the front end opens inside a bundle
const BUNDLE_ENTRY_FILE: &str = "index.html";

/// Resource-fork folder added by macOS archivers
const MACOS_METADATA_DIR: &str = "__MACOSX";

/// Unpacks game archives into bundle directories
#[derive(Debug, Clone)]
pub struct ArchiveExtractor {
    layout: Arc<StorageLayout>,
}

impl ArchiveExtractor {
    pub fn new(layout: Arc<StorageLayout>) -> Self {
        Self { layout }
    }

    /// Extract `zip_path` next to itself and return the bundle root.
    ///
    /// Existing files inside the bundle root are overwritten. The archive is
    /// deleted only when extraction fully succeeded. An archive without an entry
    /// page fails with `ExtractionFailed` and its unpacked files are discarded.
    pub async fn extract(&self, zip_path: &Path) -> Result<PathBuf> {
        let bundle_root = bundle_root_for(zip_path)?;
        self.layout.ensure_directory(&bundle_root).await?;

        let archive = zip_path.to_path_buf();
        let target = bundle_root.clone();
        let entries = tokio::task::spawn_blocking(move || -> Result<usize> {
            let entries = unpack(&archive, &target)?;
            if let Err(e) = settle_entry_file(&target) {
                if let Err(cleanup) = fs::remove_dir_all(&target) {
                    warn!("Failed to discard {}: {}", target.display(), cleanup);
                }
                return Err(e);
            }
            Ok(entries)
        })
        .await
        .map_err(|e| AppError::Internal(format!("Extraction task failed: {}", e)))??;

        tokio::fs::remove_file(zip_path).await?;

        info!(
            "Extracted {} entries from {} into {}",
            entries,
            zip_path.display(),
            bundle_root.display()
        );

        Ok(bundle_root)
    }
}

/// `<dir>/<name>.zip` -> `<dir>/<name>`
pub fn bundle_root_for(zip_path: &Path) -> Result<PathBuf> {
    let stem = zip_path
        .file_stem()
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| {
            AppError::ExtractionFailed(format!("No archive name in {}", zip_path.display()))
        })?;

    Ok(match zip_path.parent() {
        Some(parent) => parent.join(stem),
        None => PathBuf::from(stem),
    })
}

/// Write every archive entry under `target`, returning the number of entries.
fn unpack(zip_path: &Path, target: &Path) -> Result<usize> {
    let file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(file).map_err(|e| {
        AppError::ExtractionFailed(format!("Unreadable archive {}: {}", zip_path.display(), e))
    })?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| {
            AppError::ExtractionFailed(format!("Corrupt entry #{}: {}", index, e))
        })?;

        let relative = entry.enclosed_name().ok_or_else(|| {
            AppError::ExtractionFailed(format!("Entry escapes the bundle: {}", entry.name()))
        })?;
        let out_path = target.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut out = File::create(&out_path)?;
        io::copy(&mut entry, &mut out).map_err(|e| {
            // Decompression and CRC failures surface as io errors from the entry reader
            AppError::ExtractionFailed(format!("Failed to inflate {}: {}", entry.name(), e))
        })?;
        debug!("Extracted {}", out_path.display());
    }

    Ok(archive.len())
}

/// Make sure `root` holds the entry page directly.
///
/// When it does not, a single top-level folder holding the page replaces `root`.
fn settle_entry_file(root: &Path) -> Result<()> {
    if root.join(BUNDLE_ENTRY_FILE).is_file() {
        return Ok(());
    }

    let mut top_level = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_name() != MACOS_METADATA_DIR {
            top_level.push(entry.path());
        }
    }

    let nested = match top_level.as_slice() {
        [only] if only.is_dir() && only.join(BUNDLE_ENTRY_FILE).is_file() => only.clone(),
        _ => {
            return Err(AppError::ExtractionFailed(format!(
                "No {} at the top of {}",
                BUNDLE_ENTRY_FILE,
                root.display()
            )))
        }
    };

    // The archive still exists while root is swapped, so its name stays reserved
    let staging = root.with_extension("lift");
    fs::rename(&nested, &staging)?;
    fs::remove_dir_all(root)?;
    fs::rename(&staging, root)?;
    debug!("Lifted {} to {}", nested.display(), root.display());

    Ok(())
}
