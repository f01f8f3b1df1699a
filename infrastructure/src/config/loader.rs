//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `QUIZSMITH_*` environment variables (`__` separates sections,
    ///    e.g. `QUIZSMITH_MODEL__NAME`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./quizsmith.toml` or `./.quizsmith.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/quizsmith/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        for filename in &["quizsmith.toml", ".quizsmith.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                break;
            }
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("QUIZSMITH_").split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("quizsmith").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        for filename in &["quizsmith.toml", ".quizsmith.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                return Some(path);
            }
        }
        None
    }

    /// Read the API key from the environment.
    ///
    /// Deliberately not part of the config file: credentials stay out of
    /// files that get committed.
    pub fn api_key_from_env() -> Option<String> {
        std::env::var("OPENAI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.model.name, "gpt-4o-mini");
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.database.path, "quiz.db");
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if the file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("quizsmith"));
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let figment = Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::string(
                r#"
                [model]
                name = "gpt-4o"

                [retry]
                max_attempts = 5
                "#,
            ));
        let config: FileConfig = figment.extract().unwrap();
        assert_eq!(config.model.name, "gpt-4o");
        assert_eq!(config.retry.max_attempts, 5);
        // Untouched sections keep their defaults
        assert_eq!(config.database.path, "quiz.db");
    }
}
