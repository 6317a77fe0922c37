use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info};
use validator::Validate;

use crate::{
    averages::model::{AveragedRecord, PriceRecord},
    config::DEFAULT_OUTPUT_INDENT,
    error::AppError,
};

/// Input rows are `[year, month, price, change, percent]`; only the first
/// three are read. Trailing fields may be `null` or absent.
type RawRow = Vec<Option<f64>>;

#[derive(Debug, Clone)]
pub struct PriceRepository {
    indent: usize,
}

impl PriceRepository {
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }

    pub fn load_prices(&self, path: &Path) -> Result<Vec<PriceRecord>, AppError> {
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AppError::InputNotFound(path.display().to_string()),
            _ => AppError::IoError(format!("Failed to read '{}': {}", path.display(), e)),
        })?;

        let rows: Vec<RawRow> = serde_json::from_str(&contents)?;
        debug!("Read {} rows from {}", rows.len(), path.display());

        rows.iter()
            .enumerate()
            .map(|(index, row)| parse_row(index, row))
            .collect()
    }

    pub fn write_averages(&self, path: &Path, records: &[AveragedRecord]) -> Result<(), AppError> {
        let file = File::create(path)
            .map_err(|e| AppError::IoError(format!("Failed to create '{}': {}", path.display(), e)))?;
        let mut writer = BufWriter::new(file);

        let indent = vec![b' '; self.indent];
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(&indent));
        records
            .serialize(&mut serializer)
            .map_err(|e| AppError::IoError(format!("Failed to write '{}': {}", path.display(), e)))?;
        writer.flush()?;

        info!("Wrote {} averaged rows to {}", records.len(), path.display());
        Ok(())
    }
}

impl Default for PriceRepository {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_INDENT)
    }
}

fn parse_row(index: usize, row: &RawRow) -> Result<PriceRecord, AppError> {
    let field = |position: usize, name: &str| {
        row.get(position).copied().flatten().ok_or_else(|| {
            AppError::ValidationError(format!("Row {}: missing {}", index, name))
        })
    };

    let year = field(0, "year")?;
    let month = field(1, "month")?;
    let price = field(2, "price")?;

    if year.fract() != 0.0 || year < i32::MIN as f64 || year > i32::MAX as f64 {
        return Err(AppError::ValidationError(format!("Row {}: invalid year {}", index, year)));
    }
    if month.fract() != 0.0 || month < 0.0 || month > u32::MAX as f64 {
        return Err(AppError::ValidationError(format!("Row {}: invalid month {}", index, month)));
    }

    let record = PriceRecord::new(year as i32, month as u32, price);
    record
        .validate()
        .map_err(|e| AppError::ValidationError(format!("Row {}: {}", index, e)))?;

    Ok(record)
}
