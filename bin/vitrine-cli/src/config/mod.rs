use crate::command::{
    chrome::ArgsChrome, fetch::ArgsFetch, locale::ArgsLocale, resolve::ArgsResolve,
    switch::ArgsSwitch,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self},
    path::{Path, PathBuf},
    sync::Arc,
};

use vitrine_api::ApiClient;
use vitrine_common::message::ConsoleSink;
use vitrine_i18n::{FileStorage, LocaleStore, SystemLanguage, t};

/** ARG PARSER **/
#[derive(Parser, Debug)]
#[clap(version)]
#[command(
    name = "vitrine",
    about = t!("vitrine.cli.about").to_string(),
    long_about = None,
    bin_name = "vitrine",
)]
pub struct Args {
    #[clap(short('c'), long = "config", value_name = "CONFIG_PATH", help = t!("vitrine.cli.args.config").to_string())]
    pub config_path: Option<String>,
    #[clap(short('Q'), long = "quiet", action = clap::ArgAction::SetTrue, help = t!("vitrine.cli.args.quiet").to_string())]
    pub quiet: bool,
    #[clap(short('l'), long = "loglevel", value_name = "LOG_LEVEL", help = t!("vitrine.cli.args.loglevel").to_string())]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = t!("vitrine.cli.command.locale.about").to_string())]
    Locale(ArgsLocale),
    #[command(about = t!("vitrine.cli.command.resolve.about").to_string())]
    Resolve(ArgsResolve),
    #[command(about = t!("vitrine.cli.command.switch.about").to_string())]
    Switch(ArgsSwitch),
    #[command(about = t!("vitrine.cli.command.fetch.about").to_string())]
    Fetch(ArgsFetch),
    #[command(about = t!("vitrine.cli.command.chrome.about").to_string())]
    Chrome(ArgsChrome),
}

/** ARG PARSER END**/

const CONFIG_FILE_NAME: &str = "vitrine_config.json";
const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Storefront origin that resource paths are resolved against.
    pub base_url: String,
    /// Where the language preference is persisted.
    pub storage_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            storage_path: None,
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    #[cfg(unix)]
    let home = std::env::var("HOME").ok().map(PathBuf::from);
    #[cfg(windows)]
    let home = std::env::var("USERPROFILE").ok().map(PathBuf::from);
    #[cfg(not(any(unix, windows)))]
    let home = None;
    home
}

#[derive(Debug)]
pub struct ConfigManager {
    args_config_path: Option<PathBuf>,
    current_dir_config_path: PathBuf,
    /// `~/.config/vitrine`, when a home directory is known.
    home_config_dir: Option<PathBuf>,

    runtime_config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(args_path: Option<String>) -> Self {
        let args_config_path = args_path.map(PathBuf::from);
        let current_dir_config_path = PathBuf::from(CONFIG_FILE_NAME);
        let home_config_dir = home_dir().map(|home| home.join(".config").join("vitrine"));
        let runtime_config_path = home_config_dir
            .as_ref()
            .map(|dir| dir.join("config.json"))
            .unwrap_or_else(|| current_dir_config_path.clone());

        Self {
            args_config_path,
            current_dir_config_path,
            home_config_dir,
            runtime_config_path,
        }
    }

    /// Lookup order: `--config`, `./vitrine_config.json`,
    /// `~/.config/vitrine/config.json`.
    pub fn load_config(&mut self) -> Result<Option<Config>> {
        if let Some(config) = &self.args_config_path {
            if config.exists() {
                self.runtime_config_path = config.clone();
                return Ok(Some(self.read_config(config)?));
            }
            // a missing explicit path is where the new config goes
            self.runtime_config_path = config.clone();
            return Ok(None);
        }

        if self.current_dir_config_path.exists() {
            self.runtime_config_path = self.current_dir_config_path.clone();
            return Ok(Some(self.read_config(&self.current_dir_config_path)?));
        }

        if let Some(home_config_path) = self.home_config_dir.as_ref().map(|dir| dir.join("config.json")) {
            if home_config_path.exists() {
                self.runtime_config_path = home_config_path.clone();
                return Ok(Some(self.read_config(&home_config_path)?));
            }
        }

        Ok(None)
    }

    pub fn get_config_path(&self) -> &PathBuf {
        &self.runtime_config_path
    }

    /// Default preference file, next to the config file.
    pub fn default_storage_path(&self) -> PathBuf {
        self.runtime_config_path
            .parent()
            .map(|dir| dir.join("storage.json"))
            .unwrap_or_else(|| PathBuf::from("vitrine_storage.json"))
    }

    fn read_config(&self, path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).context(format!(
            "Failed to read config file at {:?}",
            path.display()
        ))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Malformed config file at {}", path.display()))
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        let path = self.get_config_path();
        tracing::debug!("Trying to save config to {:?}", path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory at {}", parent.display())
                })?;
            }
        }

        let content = serde_json::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file at {}", path.display()))?;

        Ok(())
    }
}

#[derive(Debug)]
pub struct Global {
    pub config: Config,
    pub config_manager: ConfigManager,
    pub store: LocaleStore,
    pub api_client: ApiClient,
    pub args: Args,
}

impl Global {
    pub fn new(args: Args) -> Result<Self> {
        let mut config_manager = ConfigManager::new(args.config_path.clone());

        let config = match config_manager.load_config() {
            Ok(Some(config)) => config,
            Ok(None) => {
                tracing::warn!(
                    "No config found, creating a new one to path: {}",
                    config_manager.get_config_path().display()
                );
                let config = Config::default();
                config_manager.save_config(&config)?;
                config
            }
            Err(e) => {
                tracing::error!("Failed to load config: {:#}", e);
                Config::default()
            }
        };

        let storage_path = config
            .storage_path
            .clone()
            .unwrap_or_else(|| config_manager.default_storage_path());
        let store = LocaleStore::new(FileStorage::new(storage_path), SystemLanguage);
        store.initialize();

        let api_client = ApiClient::new(&config.base_url)?.with_messages(Arc::new(ConsoleSink));

        Ok(Self {
            config,
            config_manager,
            store,
            api_client,
            args,
        })
    }
}

pub fn init(args: Args) -> Result<Global> {
    tracing::info!("Initializing config...");
    let global = Global::new(args)?;
    tracing::info!(
        "{}",
        t!(
            "config.initialized",
            path = global.config_manager.get_config_path().display().to_string(),
            base_url = &global.config.base_url,
            language = global.store.current().as_str()
        )
    );
    Ok(global)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_explicit_config_path_is_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shop.json");
        fs::write(&path, r#"{"base_url": "https://shop.example/"}"#).unwrap();

        let mut manager = ConfigManager::new(Some(path.display().to_string()));
        let config = manager.load_config().unwrap().unwrap();

        assert_eq!(config.base_url, "https://shop.example/");
        assert_eq!(config.storage_path, None);
        assert_eq!(manager.get_config_path(), &path);
        assert_eq!(manager.default_storage_path(), dir.path().join("storage.json"));
    }

    #[test]
    fn test_missing_explicit_path_becomes_save_target() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut manager = ConfigManager::new(Some(path.display().to_string()));
        assert!(manager.load_config().unwrap().is_none());

        manager.save_config(&Config::default()).unwrap();
        let mut reloaded = ConfigManager::new(Some(path.display().to_string()));
        assert_eq!(reloaded.load_config().unwrap(), Some(Config::default()));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{").unwrap();

        let mut manager = ConfigManager::new(Some(path.display().to_string()));
        assert!(manager.load_config().is_err());
    }
}
