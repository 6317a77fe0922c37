use std::env;

use chrono::{Datelike, NaiveDate};

use crate::{averages::model::YearMonth, error::AppError};

pub const DEFAULT_ANCHOR: &str = "1875-01";
pub const DEFAULT_OUTPUT_INDENT: usize = 4;

#[derive(Debug, Clone)]
pub struct Config {
    pub app_env: AppEnv,
    pub anchor: YearMonth,
    pub output_indent: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEnv {
    Development,
    Production,
    Test,
}

impl AppEnv {
    pub fn default_log_level(&self) -> &'static str {
        match self {
            AppEnv::Development => "debug",
            AppEnv::Production | AppEnv::Test => "info",
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let app_env_str = lookup("APP_ENV").unwrap_or_else(|| "development".into());
        let app_env = match app_env_str.to_lowercase().as_str() {
            "production" => AppEnv::Production,
            "test" => AppEnv::Test,
            _ => AppEnv::Development,
        };

        let anchor_str = lookup("MA_ANCHOR").unwrap_or_else(|| DEFAULT_ANCHOR.into());
        let anchor = parse_anchor(&anchor_str)
            .map_err(|e| AppError::ConfigError(format!("Invalid MA_ANCHOR '{}': {}", anchor_str, e)))?;

        let output_indent = match lookup("MA_OUTPUT_INDENT") {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .map_err(|_| AppError::ConfigError("Invalid MA_OUTPUT_INDENT".into()))?,
            None => DEFAULT_OUTPUT_INDENT,
        };

        Ok(Self {
            app_env,
            anchor,
            output_indent,
        })
    }
}

// Accepts `YYYY-MM`
fn parse_anchor(anchor_str: &str) -> Result<YearMonth, &'static str> {
    let anchor_str = anchor_str.trim();

    if anchor_str.is_empty() {
        return Err("Anchor string is empty");
    }

    let date = NaiveDate::parse_from_str(&format!("{}-01", anchor_str), "%Y-%m-%d")
        .map_err(|_| "Expected YYYY-MM")?;

    Ok(YearMonth::new(date.year(), date.month()))
}
