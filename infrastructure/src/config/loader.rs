//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Application directory name under the user config dir.
pub const APP_DIR: &str = "breakaway-blueprint";

/// Project-level config file names, checked in order.
pub const PROJECT_FILES: [&str; 2] = ["blueprint.toml", ".blueprint.toml"];

/// Environment variable prefix. `__` separates nested keys.
pub const ENV_PREFIX: &str = "BLUEPRINT_";

/// One place configuration may come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub label: &'static str,
    pub location: String,
    pub found: bool,
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `BLUEPRINT_REPORT__FORMAT=json`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./blueprint.toml` or `./.blueprint.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/breakaway-blueprint/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Config locations in priority order, for `--show-config`.
    pub fn sources(config_path: Option<&Path>) -> Vec<ConfigSource> {
        let mut sources = Vec::new();

        if let Some(path) = config_path {
            sources.push(ConfigSource {
                label: "Explicit",
                location: path.display().to_string(),
                found: path.exists(),
            });
        }

        sources.push(match Self::project_config_path() {
            Some(path) => ConfigSource {
                label: "Project",
                location: path.display().to_string(),
                found: true,
            },
            None => ConfigSource {
                label: "Project",
                location: PROJECT_FILES.map(|f| format!("./{}", f)).join(" or "),
                found: false,
            },
        });

        if let Some(path) = Self::global_config_path() {
            sources.push(ConfigSource {
                label: "Global",
                location: path.display().to_string(),
                found: path.exists(),
            });
        }

        sources.push(ConfigSource {
            label: "Default",
            location: "built-in defaults".to_string(),
            found: true,
        });
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_domain::ReportFormat;
    use figment::Jail;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(!config.notification.enabled);
        assert!(config.report.color);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains(APP_DIR));
    }

    #[test]
    fn test_project_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
            jail.create_file(
                "blueprint.toml",
                r#"
[report]
format = "summary"
weakest_count = 5
"#,
            )?;

            let config = ConfigLoader::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.report.format, Some(ReportFormat::Summary));
            assert_eq!(config.report.weakest_count, 5);
            assert!(config.report.color);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_and_env_priority() {
        Jail::expect_with(|jail| {
            jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
            jail.create_file(".blueprint.toml", "[report]\nweakest_count = 5\n")?;
            jail.create_file(
                "override.toml",
                "[report]\nweakest_count = 2\n\n[flow]\nrequire_gate = false\n",
            )?;
            jail.set_env("BLUEPRINT_REPORT__WEAKEST_COUNT", "7");
            jail.set_env("BLUEPRINT_NOTIFICATION__API_KEY", "re_from_env");

            let config = ConfigLoader::load(Some(Path::new("override.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.report.weakest_count, 7);
            assert!(!config.flow.require_gate);
            assert_eq!(config.notification.api_key.as_deref(), Some("re_from_env"));
            Ok(())
        });
    }

    #[test]
    fn test_global_file_is_lowest_file_priority() {
        Jail::expect_with(|jail| {
            let xdg = jail.directory().join("xdg");
            std::fs::create_dir_all(xdg.join(APP_DIR)).map_err(|e| e.to_string())?;
            std::fs::write(
                xdg.join(APP_DIR).join("config.toml"),
                "[report]\ncolor = false\nweakest_count = 9\n",
            )
            .map_err(|e| e.to_string())?;
            jail.set_env("XDG_CONFIG_HOME", xdg.display());
            jail.create_file("blueprint.toml", "[report]\nweakest_count = 4\n")?;

            let config = ConfigLoader::load(None).map_err(|e| e.to_string())?;
            assert!(!config.report.color);
            assert_eq!(config.report.weakest_count, 4);
            Ok(())
        });
    }

    #[test]
    fn test_sources_lists_explicit_first() {
        let sources = ConfigLoader::sources(Some(Path::new("/nonexistent/bb.toml")));
        assert_eq!(sources[0].label, "Explicit");
        assert!(!sources[0].found);
        assert_eq!(sources.last().map(|s| s.label), Some("Default"));
    }
}
