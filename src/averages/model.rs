use std::fmt;

use chrono::Month;
use serde::{ser::SerializeTuple, Serialize, Serializer};
use validator::{Validate, ValidationError};

/// Calendar month key. Orders by year, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match u8::try_from(self.month).ok().and_then(|m| Month::try_from(m).ok()) {
            Some(month) => write!(f, "{} {}", month.name(), self.year),
            None => write!(f, "{:02}/{}", self.month, self.year),
        }
    }
}

/// One monthly observation. `change` and `percent` from the input rows are
/// not carried.
#[derive(Debug, Clone, Copy, PartialEq, Validate)]
pub struct PriceRecord {
    pub year: i32,
    #[validate(range(min = 1, max = 12))]
    pub month: u32,
    #[validate(custom = "validate_finite")]
    pub price: f64,
}

impl PriceRecord {
    pub fn new(year: i32, month: u32, price: f64) -> Self {
        Self { year, month, price }
    }

    pub fn period(&self) -> YearMonth {
        YearMonth::new(self.year, self.month)
    }
}

fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("price_not_finite"))
    }
}

/// Trailing averages for one month. Serializes as
/// `[year, month, ma1y, ma2y, ma4y]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AveragedRecord {
    pub year: i32,
    pub month: u32,
    pub ma1y: f64,
    pub ma2y: f64,
    pub ma4y: f64,
}

impl Serialize for AveragedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_tuple(5)?;
        row.serialize_element(&self.year)?;
        row.serialize_element(&self.month)?;
        row.serialize_element(&self.ma1y)?;
        row.serialize_element(&self.ma2y)?;
        row.serialize_element(&self.ma4y)?;
        row.end()
    }
}
