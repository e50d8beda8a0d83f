use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use url::Url;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_OUTPUT_LANGUAGE: &str = "Bahasa Indonesia";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: Url,
    /// Language every free-text model output must be written in.
    pub output_language: String,
    pub ai_rps: u32,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let base_url = get_env_or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL);
        let gemini_base_url = Url::parse(&base_url)
            .map_err(|e| Error::Config(format!("Invalid value for GEMINI_BASE_URL: {}", e)))?;

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            gemini_api_key: get_env("GEMINI_API_KEY")?,
            gemini_model: get_env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_base_url,
            output_language: get_env_or("OUTPUT_LANGUAGE", DEFAULT_OUTPUT_LANGUAGE),
            ai_rps: match env::var("AI_RPS") {
                Ok(_) => get_env_parse("AI_RPS")?,
                Err(_) => 5,
            },
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| Error::Config("Configuration has not been initialized".to_string()))
}
