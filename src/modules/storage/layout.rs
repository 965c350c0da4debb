//! On-disk layout of uploaded assets
//!
//! ```text
//! <root>/images/<millis>.<ext>      thumbnails
//! <root>/games/<millis>.zip         archives, removed after extraction
//! <root>/games/<millis>/...         extracted bundles
//! ```
//!
//! The same tree is mounted read-only at `public_prefix` by the static file
//! route, so every stored path has a matching site-relative URL.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs::{self, File, OpenOptions};
use tracing::{debug, warn};

use crate::core::config::StorageConfig;
use crate::core::error::Result;

/// Upper bound on name clashes skipped before giving up
const MAX_NAME_ATTEMPTS: i64 = 1000;

/// Destination of an accepted upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Thumbnail images
    Image,
    /// Zipped game bundles and their extracted directories
    GameArchive,
}

impl AssetKind {
    /// Directory name under the upload root
    pub fn dir_name(self) -> &'static str {
        match self {
            AssetKind::Image => "images",
            AssetKind::GameArchive => "games",
        }
    }
}

/// A freshly created, empty file reserved for an upload
#[derive(Debug)]
pub struct ReservedFile {
    pub file: File,
    pub path: PathBuf,
    pub file_name: String,
}

/// Owner of the upload directory tree
#[derive(Debug, Clone)]
pub struct StorageLayout {
    root: PathBuf,
    public_prefix: String,
}

impl StorageLayout {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        let public_prefix = public_prefix.into();
        Self {
            root: root.into(),
            public_prefix: format!("/{}", public_prefix.trim_matches('/')),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.root.clone(), config.public_prefix.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// Directory holding assets of the given kind
    pub fn directory_for(&self, kind: AssetKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    /// Create every kind directory up front
    pub async fn prepare(&self) -> Result<()> {
        for kind in [AssetKind::Image, AssetKind::GameArchive] {
            self.ensure_directory(&self.directory_for(kind)).await?;
        }
        Ok(())
    }

    /// Create `path` and any missing ancestors. Existing directories are left alone,
    /// and a concurrent creation of the same path is not an error.
    pub async fn ensure_directory(&self, path: &Path) -> Result<()> {
        if fs::try_exists(path).await? {
            return Ok(());
        }
        fs::create_dir_all(path).await?;
        debug!("Created directory {}", path.display());
        Ok(())
    }

    /// Reserve a new file named `<unix-millis><extension>` in the kind's directory.
    ///
    /// The file is opened with create-new semantics. If the name is taken (two uploads in
    /// the same millisecond, or a clock that stepped back), the timestamp component is
    /// advanced until a free name is found.
    ///
    /// Game archives also claim their bundle directory `<unix-millis>/` with a
    /// non-recursive `create_dir`, so a name stays taken after the archive is
    /// unpacked and deleted.
    pub async fn create_unique_file(&self, kind: AssetKind, extension: &str) -> Result<ReservedFile> {
        let directory = self.directory_for(kind);
        self.ensure_directory(&directory).await?;

        let base = Utc::now().timestamp_millis();
        for offset in 0..MAX_NAME_ATTEMPTS {
            let millis = base + offset;
            let file_name = stored_file_name(millis, extension);
            let path = directory.join(&file_name);

            let bundle_dir = match kind {
                AssetKind::GameArchive => {
                    let bundle_dir = directory.join(stored_file_name(millis, ""));
                    match fs::create_dir(&bundle_dir).await {
                        Ok(()) => Some(bundle_dir),
                        Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                        Err(e) => return Err(e.into()),
                    }
                }
                AssetKind::Image => None,
            };

            match OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(file) => {
                    if offset > 0 {
                        warn!(
                            "Stored name clash in {}, advanced {} ms to {}",
                            directory.display(),
                            offset,
                            file_name
                        );
                    }
                    return Ok(ReservedFile {
                        file,
                        path,
                        file_name,
                    });
                }
                Err(e) => {
                    if let Some(bundle_dir) = bundle_dir {
                        if let Err(cleanup) = fs::remove_dir(&bundle_dir).await {
                            warn!(
                                "Failed to release bundle directory {}: {}",
                                bundle_dir.display(),
                                cleanup
                            );
                        }
                    }
                    if e.kind() == ErrorKind::AlreadyExists {
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("no free file name in {}", directory.display()),
        )
        .into())
    }

    /// Site-relative URL of an entry (file or bundle directory) of the given kind
    pub fn public_url(&self, kind: AssetKind, name: &str) -> String {
        format!("{}/{}/{}", self.public_prefix, kind.dir_name(), name)
    }
}

/// `<millis><extension>`; `extension` keeps its leading dot, or is empty.
pub fn stored_file_name(millis: i64, extension: &str) -> String {
    format!("{}{}", millis, extension)
}

/// Extension of an uploaded file's original name, including the leading dot.
///
/// Returns an empty string when the name has no extension.
pub fn original_extension(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default()
}
