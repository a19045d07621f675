use anyhow::{Context, Result, bail};
use dirs::home_dir;
use std::env;
use std::path::PathBuf;
use url::Url;

const APP_DIR: &str = ".FitTrack";
const DEFAULT_API_PORT: u16 = 5000;
const DEFAULT_ML_TIMEOUT_SECONDS: u64 = 15;

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub api_port: u16,
    pub ml_base_url: String,
    pub ml_timeout_seconds: u64,
}

impl Config {
    /// Reads configuration from the environment. A missing prediction
    /// service URL is a startup failure, not a per-request error.
    pub fn from_env() -> Result<Self> {
        let db_path = env::var("FITTRACK_DB_PATH")
            .map(|raw| expand_home(&raw))
            .unwrap_or_else(|_| default_db_path());

        let api_port = match env::var("FITTRACK_API_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("FITTRACK_API_PORT must be a port number: {raw}"))?,
            Err(_) => DEFAULT_API_PORT,
        };

        let ml_base_url = env::var("FITTRACK_ML_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .context(
                "FITTRACK_ML_API_URL must be set to the prediction service base URL (e.g. http://localhost:5001)",
            )?;
        let ml_base_url = normalize_ml_base_url(&ml_base_url)?;

        let ml_timeout_seconds = match env::var("FITTRACK_ML_TIMEOUT_SECONDS") {
            Ok(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("FITTRACK_ML_TIMEOUT_SECONDS must be a number: {raw}"))?
                .max(1),
            Err(_) => DEFAULT_ML_TIMEOUT_SECONDS,
        };

        Ok(Self {
            db_path,
            api_port,
            ml_base_url,
            ml_timeout_seconds,
        })
    }
}

pub fn normalize_ml_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed =
        Url::parse(trimmed).with_context(|| format!("Invalid prediction service URL: {raw}"))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        bail!("Prediction service URL must be http or https: {raw}");
    }

    Ok(trimmed.to_string())
}

pub fn expand_home(raw: &str) -> PathBuf {
    raw.strip_prefix("~/")
        .and_then(|stripped| home_dir().map(|home| home.join(stripped)))
        .unwrap_or_else(|| PathBuf::from(raw))
}

pub fn default_db_path() -> PathBuf {
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("db")
        .join("fitness.db")
}

#[cfg(test)]
mod tests {
    use super::normalize_ml_base_url;

    #[test]
    fn trailing_slash_is_trimmed() {
        let url = normalize_ml_base_url("http://localhost:5001/").expect("valid URL");
        assert_eq!(url, "http://localhost:5001");
    }

    #[test]
    fn rejects_non_http_scheme() {
        assert!(normalize_ml_base_url("ftp://predictor.local").is_err());
        assert!(normalize_ml_base_url("localhost:5001").is_err());
    }

    #[test]
    fn rejects_unparseable_url() {
        assert!(normalize_ml_base_url("not a url").is_err());
    }
}
