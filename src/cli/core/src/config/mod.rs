/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use loader::{CONFIG_FILE_NAME, apply_env_overrides, find_config, load_config};
pub use types::{ApiSection, AppSection, ServerSection, StorefrontConfig};
