mod game_handler;
mod upload_handler;

pub use game_handler::*;
pub use upload_handler::*;
