//! WebGL games: upload pipeline and catalog listings.
//!
//! An upload carries a thumbnail image and a zipped WebGL build. The build is
//! unpacked under the served upload tree so the front end can open
//! `<gameUrl>/index.html` directly.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/upload-game` | Upload a thumbnail and bundle, record the game |
//! | GET | `/api/games` | List every game |
//! | GET | `/api/games/category/{categoryId}` | List the games of one category |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::{GameService, UploadService};
