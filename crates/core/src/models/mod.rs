pub mod directory;
pub mod shift;
