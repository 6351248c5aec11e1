//! Catalog Adapter - 种子目录与风格目录文件加载

mod file_catalog;

pub use file_catalog::{CatalogLoadError, FileCatalogLoader};
