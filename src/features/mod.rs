pub mod categories;
pub mod games;
