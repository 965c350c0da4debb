//! Game categories: listing and creation.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/categories` | List every category |
//! | POST | `/api/add-category` | Add a category |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::CategoryService;
