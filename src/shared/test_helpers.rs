use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::core::error::{AppError, Result};
use crate::modules::catalog::{CatalogStore, Category, Game, NewGame};

/// Write a zip archive with the given `(entry name, contents)` pairs
pub fn write_zip(path: &Path, files: &[(&str, &str)]) {
    std::fs::write(path, zip_bytes(files)).unwrap();
}

/// Build a zip archive in memory
pub fn zip_bytes(files: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, data) in files {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Count regular files below `dir` (recursively). Missing directories count as empty.
pub fn count_files(dir: &Path) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .filter_map(|e| e.ok())
        .map(|e| {
            let path = e.path();
            if path.is_dir() {
                count_files(&path)
            } else {
                1
            }
        })
        .sum()
}

#[derive(Default)]
struct MemoryTables {
    games: Vec<Game>,
    categories: Vec<Category>,
}

/// `CatalogStore` kept in process memory
#[derive(Default)]
pub struct InMemoryCatalogStore {
    tables: Mutex<MemoryTables>,
    fail_writes: bool,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose inserts fail like a lost database connection
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn insert_game(&self, game: NewGame) -> Result<i64> {
        self.check_writable()?;
        let mut tables = self.tables.lock().unwrap();
        let id = tables.games.len() as i64 + 1;
        tables.games.push(Game {
            id,
            name: game.name,
            description: game.description,
            thumbnail_url: game.thumbnail_url,
            game_url: game.game_url,
            category_id: game.category_id,
        });
        Ok(id)
    }

    async fn insert_category(&self, name: &str) -> Result<i64> {
        self.check_writable()?;
        let mut tables = self.tables.lock().unwrap();
        let id = tables.categories.len() as i64 + 1;
        tables.categories.push(Category {
            id,
            name: name.to_string(),
        });
        Ok(id)
    }

    async fn list_games(&self) -> Result<Vec<Game>> {
        Ok(self.tables.lock().unwrap().games.clone())
    }

    async fn list_games_by_category(&self, category_id: i64) -> Result<Vec<Game>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .games
            .iter()
            .filter(|g| g.category_id == Some(category_id))
            .cloned()
            .collect())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.tables.lock().unwrap().categories.clone())
    }
}

pub const TEST_BOUNDARY: &str = "----arcade-catalog-test-boundary";

/// Hand-built `multipart/form-data` body
#[derive(Default)]
pub struct MultipartBody {
    bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        write!(
            self.bytes,
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            TEST_BOUNDARY, name, value
        )
        .unwrap();
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        write!(
            self.bytes,
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            TEST_BOUNDARY, name, file_name, content_type
        )
        .unwrap();
        self.bytes.extend_from_slice(data);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    /// POST request carrying this body
    pub fn into_request(mut self, uri: &str) -> Request<Body> {
        write!(self.bytes, "--{}--\r\n", TEST_BOUNDARY).unwrap();
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", TEST_BOUNDARY),
            )
            .body(Body::from(self.bytes))
            .unwrap()
    }
}

/// Read a response body as JSON
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
