//! Configuration file loader with multi-source merging

use super::ConfigError;
use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

const PROJECT_CONFIG_FILES: &[&str] = &["riddle.toml", ".riddle.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `TARGET_MODEL`, `OPENAI_BASE_URL`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./riddle.toml` or `./.riddle.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/riddle-rag/config.toml`
    /// 5. Default values
    ///
    /// The merged configuration is validated before it is returned.
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.clone()));
            }
            figment = figment.merge(Toml::file(path));
        }

        let config: FileConfig = Self::with_env_overrides(figment)
            .extract()
            .map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Load only default configuration (for --no-config)
    ///
    /// Environment overrides still apply.
    pub fn load_defaults() -> Result<FileConfig, ConfigError> {
        let figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));
        let config: FileConfig = Self::with_env_overrides(figment)
            .extract()
            .map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    fn with_env_overrides(figment: Figment) -> Figment {
        figment
            .merge(
                Env::raw()
                    .only(&["TARGET_MODEL"])
                    .map(|_| "generator.model".into()),
            )
            .merge(
                Env::raw()
                    .only(&["OPENAI_BASE_URL"])
                    .map(|_| "generator.base_url".into()),
            )
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/riddle-rag/config.toml if set,
    /// otherwise falls back to ~/.config/riddle-rag/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("riddle-rag").join("config.toml"))
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

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./riddle.toml or ./.riddle.toml");
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
    use crate::config::SearchProviderKind;
    use figment::Jail;

    #[test]
    fn test_load_defaults() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let config = ConfigLoader::load_defaults().unwrap();
            assert_eq!(config, FileConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("riddle-rag"));
    }

    #[test]
    fn test_project_file_then_explicit_file() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                "riddle.toml",
                r#"
[pipeline]
top_k = 4
max_sentences = 3

[search]
provider = "baidu"
"#,
            )?;
            jail.create_file("override.toml", "[pipeline]\ntop_k = 7\n")?;

            let config = ConfigLoader::load(None).unwrap();
            assert_eq!(config.pipeline.top_k, 4);
            assert_eq!(config.search.provider, SearchProviderKind::Baidu);

            let explicit = PathBuf::from("override.toml");
            let config = ConfigLoader::load(Some(&explicit)).unwrap();
            assert_eq!(config.pipeline.top_k, 7);
            assert_eq!(config.pipeline.max_sentences, 3);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_model_and_base_url() {
        Jail::expect_with(|jail| {
            jail.create_file("riddle.toml", "[generator]\nmodel = \"from-file\"\n")?;
            jail.set_env("TARGET_MODEL", "qwen-plus");
            jail.set_env("OPENAI_BASE_URL", "http://localhost:8000/v1");

            let config = ConfigLoader::load(None).unwrap();
            assert_eq!(config.generator.model, "qwen-plus");
            assert_eq!(config.generator.base_url, "http://localhost:8000/v1");
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        Jail::expect_with(|_jail| {
            let missing = PathBuf::from("nope.toml");
            assert!(matches!(
                ConfigLoader::load(Some(&missing)),
                Err(ConfigError::NotFound(_))
            ));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file("riddle.toml", "[pipeline]\ntop_k = 0\n")?;
            assert!(matches!(
                ConfigLoader::load(None),
                Err(ConfigError::Invalid(_))
            ));
            Ok(())
        });
    }
}
