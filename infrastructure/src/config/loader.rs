//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_FILES: [&str; 2] = ["concierge.toml", ".concierge.toml"];

/// Prefix for environment overrides; `__` separates nested keys.
pub const ENV_PREFIX: &str = "CONCIERGE_";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("config file not found: {0}")]
    NotFound(PathBuf),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `CONCIERGE_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./concierge.toml` or `./.concierge.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/campus-concierge/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        Self::load_from(Self::global_config_path(), Self::project_config_path(), config_path)
    }

    /// Load from explicit source locations. `load` resolves them from the
    /// environment and working directory.
    pub fn load_from(
        global_path: Option<PathBuf>,
        project_path: Option<PathBuf>,
        config_path: Option<&Path>,
    ) -> Result<FileConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global_path.filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(global_path));
        }

        if let Some(project_path) = project_path.filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(project_path));
        }

        // An explicitly named file must exist; the others are optional.
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/campus-concierge/config.toml if set,
    /// otherwise falls back to ~/.config/campus-concierge/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("campus-concierge").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");

        println!("  [     ] Env:     {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./concierge.toml or ./.concierge.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_domain::DomainTag;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.sessions.capacity, 1024);
        assert_eq!(config.router.default_domain, "general");
    }

    #[test]
    fn test_global_config_path_names_the_app() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.to_string_lossy().contains("campus-concierge"));
        }
    }

    #[test]
    fn test_missing_files_yield_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load_from(
            Some(dir.path().join("nope.toml")),
            Some(dir.path().join("also-nope.toml")),
            None,
        )
        .unwrap();
        assert_eq!(config.router.history_window, 10);
    }

    #[test]
    fn test_later_sources_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("concierge.toml");
        let explicit = dir.path().join("explicit.toml");

        fs::write(
            &global,
            "[router]\nuniversity = \"Global U\"\nhistory_window = 3\n[sessions]\ncapacity = 5\n",
        )
        .unwrap();
        fs::write(&project, "[router]\nuniversity = \"Project U\"\n").unwrap();
        fs::write(&explicit, "[router]\ndefault_domain = \"locations\"\n").unwrap();

        let config = ConfigLoader::load_from(Some(global), Some(project), Some(&explicit)).unwrap();

        assert_eq!(config.router.university, "Project U");
        assert_eq!(config.router.history_window, 3);
        assert_eq!(config.sessions.capacity, 5);
        assert_eq!(
            config.to_router_params().default_domain,
            DomainTag::Locations
        );
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let result = ConfigLoader::load_from(None, None, Some(&missing));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_malformed_toml_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "[sessions]\ncapacity = \"lots\"\n").unwrap();
        let result = ConfigLoader::load_from(None, None, Some(&bad));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
