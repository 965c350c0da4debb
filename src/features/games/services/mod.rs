mod game_service;
mod upload_service;

pub use game_service::GameService;
pub use upload_service::UploadService;
