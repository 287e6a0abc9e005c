//! Shared types, error model, configuration, and catalog loading for TopicPress.
//!
//! This crate is the foundation depended on by all other TopicPress crates.
//! It provides:
//! - [`TopicPressError`]: the unified error type
//! - Domain types ([`TopicDescriptor`], [`SiteInfo`], [`PageStyle`], [`RenderedDocument`])
//! - Configuration ([`AppConfig`], [`GenerationConfig`], [`ApiKey`], config loading)
//! - The topic [`Catalog`] and its validation rules

pub mod catalog;
pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use catalog::{Catalog, category_index_id, load_catalog};
pub use config::{
    ApiKey, AppConfig, DefaultsConfig, GenerationConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from, resolve_api_key,
};
pub use error::{Result, TopicPressError};
pub use types::{
    CuratedEntry, CuratedSection, Essentials, PageStyle, RenderedDocument, RunId, SiteInfo,
    TopicDescriptor,
};
