//! Configuration for the capture screen.
//!
//! A single optional TOML file chooses the app id, the storage root, the
//! desktop camera source and how permission prompts are answered.

mod loader;
mod path;
mod schema;

pub use loader::{LoadedConfig, default_config_path, load_config, load_file};
pub use path::{PathResolver, home_dir, resolve_path, validate_image_path};
pub use schema::{
    AppConfig, DEFAULT_APP_ID, DEFAULT_THUMBNAIL_SIZE, PermissionPolicy, PermissionsConfig,
};
