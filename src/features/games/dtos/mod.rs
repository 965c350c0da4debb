mod game_dto;
mod upload_dto;

pub use game_dto::*;
pub use upload_dto::*;
