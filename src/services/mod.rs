pub mod archive;
pub mod collections;
pub mod config;
pub mod importer;
pub mod media;
pub mod payload;
pub mod render;
