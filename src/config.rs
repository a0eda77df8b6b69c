use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::BoardError;

pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
pub const NOTION_VERSION: &str = "2022-06-28";

const DATABASE_ID_VARS: [&str; 2] = ["NOTION_DATABASE_ID", "NEXT_PUBLIC_NOTION_DATABASE_ID"];
const API_KEY_VARS: [&str; 2] = ["NOTION_API_KEY", "NEXT_PUBLIC_NOTION_API_KEY"];

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub notion: Option<NotionFileConfig>,
}

#[derive(Debug, Deserialize, Default)]
pub struct NotionFileConfig {
    pub api_key: Option<String>,
    pub database_id: Option<String>,
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub delete_concurrency: Option<usize>,
}

/// Resolved connection settings. Built once at start-up and handed to the client.
#[derive(Debug, Clone)]
pub struct NotionConfig {
    pub api_key: String,
    /// Already in dashed UUID form when it came in as 32 bare hex characters.
    pub database_id: Option<String>,
    pub base_url: String,
    pub request_timeout: Duration,
    pub delete_concurrency: usize,
}

impl NotionConfig {
    pub fn database_id(&self) -> Result<&str, BoardError> {
        self.database_id
            .as_deref()
            .ok_or(BoardError::MissingDatabaseId)
    }
}

pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".notion-board")
}

pub fn config_path() -> PathBuf {
    data_dir().join("config.toml")
}

pub fn log_path() -> PathBuf {
    data_dir().join("board.log")
}

pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &std::path::Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig =
        toml::from_str(&contents).with_context(|| "Failed to parse config.toml")?;
    Ok(config)
}

/// Merge the config file with the process environment. Environment wins.
pub fn resolve_notion(config: &AppConfig) -> Result<NotionConfig, BoardError> {
    resolve_notion_with(config, |name| std::env::var(name).ok())
}

pub fn resolve_notion_with(
    config: &AppConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<NotionConfig, BoardError> {
    let file = config.notion.as_ref();

    let api_key = first_present(&API_KEY_VARS, &env)
        .or_else(|| file.and_then(|f| non_empty(f.api_key.as_deref())))
        .ok_or(BoardError::MissingApiKey)?;

    let database_id = first_present(&DATABASE_ID_VARS, &env)
        .or_else(|| file.and_then(|f| non_empty(f.database_id.as_deref())))
        .map(|id| format_database_id(&id));

    let base_url = file
        .and_then(|f| non_empty(f.base_url.as_deref()))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string();

    let request_timeout =
        Duration::from_secs(file.and_then(|f| f.request_timeout_secs).unwrap_or(30));
    let delete_concurrency = file
        .and_then(|f| f.delete_concurrency)
        .unwrap_or(4)
        .max(1);

    Ok(NotionConfig {
        api_key,
        database_id,
        base_url,
        request_timeout,
        delete_concurrency,
    })
}

fn first_present(names: &[&str], env: &impl Fn(&str) -> Option<String>) -> Option<String> {
    names
        .iter()
        .find_map(|name| env(name).and_then(|v| non_empty(Some(v.as_str()))))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Insert dashes into a bare 32-char hex id (8-4-4-4-12). Anything else passes through.
pub fn format_database_id(id: &str) -> String {
    let id = id.trim();
    if id.len() != 32 || id.contains('-') || !id.chars().all(|c| c.is_ascii_hexdigit()) {
        return id.to_string();
    }
    format!(
        "{}-{}-{}-{}-{}",
        &id[..8],
        &id[8..12],
        &id[12..16],
        &id[16..20],
        &id[20..]
    )
}
