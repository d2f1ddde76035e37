pub mod discover;
pub mod document;
