use thiserror::Error;

use crate::averages::model::YearMonth;

#[derive(Error, Debug)]
pub enum AppError {
  #[error("Data does not contain {0}")]
  DataNotFound(YearMonth),

  #[error("Insufficient data before {anchor}. Need {required} months, have {available}")]
  InsufficientHistory {
      anchor: YearMonth,
      required: usize,
      available: usize,
  },

  #[error("Input file '{0}' not found")]
  InputNotFound(String),

  #[error("I/O error: {0}")]
  IoError(String),

  #[error("Invalid JSON in input file - {0}")]
  ParseError(String),

  #[error("Validation error: {0}")]
  ValidationError(String),

  #[error("Config error: {0}")]
  ConfigError(String),
}

impl From<std::io::Error> for AppError {
  fn from(err: std::io::Error) -> Self {
      Self::IoError(err.to_string())
  }
}

impl From<serde_json::Error> for AppError {
  fn from(err: serde_json::Error) -> Self {
      Self::ParseError(err.to_string())
  }
}
