use crate::{
    averages::{
        indicators::moving_average::MovingAverageIndicator,
        model::{AveragedRecord, PriceRecord, YearMonth},
    },
    error::AppError,
};

pub const ONE_YEAR_MONTHS: usize = 12;
pub const TWO_YEAR_MONTHS: usize = 24;
pub const FOUR_YEAR_MONTHS: usize = 48;

/// Months that must be present up to and including the anchor. All three
/// windows are gated on the longest one.
pub const REQUIRED_HISTORY_MONTHS: usize = FOUR_YEAR_MONTHS;

pub struct AverageService {
    indicator: MovingAverageIndicator,
}

impl AverageService {
    pub fn new() -> Self {
        Self {
            indicator: MovingAverageIndicator::new(),
        }
    }

    /// Computes the 1y, 2y and 4y trailing averages for every month from
    /// `anchor` to the end of the series.
    ///
    /// `records` may arrive in any order; a sorted copy is used and the
    /// caller's slice is left untouched.
    pub fn compute_averages(
        &self,
        records: &[PriceRecord],
        anchor: YearMonth,
    ) -> Result<Vec<AveragedRecord>, AppError> {
        let mut sorted = records.to_vec();
        sorted.sort_by_key(PriceRecord::period);

        let start = sorted
            .iter()
            .position(|r| r.period() == anchor)
            .ok_or(AppError::DataNotFound(anchor))?;

        let available = start + 1;
        if available < REQUIRED_HISTORY_MONTHS {
            return Err(AppError::InsufficientHistory {
                anchor,
                required: REQUIRED_HISTORY_MONTHS,
                available,
            });
        }

        let prices: Vec<f64> = sorted.iter().map(|r| r.price).collect();
        let mut result = Vec::with_capacity(sorted.len() - start);

        for (i, record) in sorted.iter().enumerate().skip(start) {
            // i >= start >= 47, so every window lies inside `prices`
            let window = |period: usize| self.indicator.calculate_sma(&prices[i + 1 - period..=i]);

            result.push(AveragedRecord {
                year: record.year,
                month: record.month,
                ma1y: window(ONE_YEAR_MONTHS),
                ma2y: window(TWO_YEAR_MONTHS),
                ma4y: window(FOUR_YEAR_MONTHS),
            });
        }

        Ok(result)
    }
}

impl Default for AverageService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

    const ANCHOR: YearMonth = YearMonth { year: 1875, month: 1 };

    /// `count` consecutive months ending at (and including) `last`.
    fn months_ending_at(last: YearMonth, count: usize, price: impl Fn(usize) -> f64) -> Vec<PriceRecord> {
        let last_index = last.year as i64 * 12 + (last.month as i64 - 1);
        let first_index = last_index - count as i64 + 1;
        (0..count)
            .map(|offset| {
                let index = first_index + offset as i64;
                PriceRecord::new((index / 12) as i32, (index % 12) as u32 + 1, price(offset))
            })
            .collect()
    }

    fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    #[test]
    fn test_output_length_and_direct_recomputation() {
        let mut records = months_ending_at(ANCHOR, 48, |i| 3.0 + (i as f64 * 0.37).sin());
        let tail = months_ending_at(YearMonth::new(1876, 6), 17, |i| 5.0 + i as f64 * 0.1);
        records.extend(tail);

        let service = AverageService::new();
        let output = service.compute_averages(&records, ANCHOR).unwrap();

        let start = records.iter().position(|r| r.period() == ANCHOR).unwrap();
        assert_eq!(output.len(), records.len() - start);

        let prices: Vec<f64> = records.iter().map(|r| r.price).collect();
        for (offset, avg) in output.iter().enumerate() {
            let i = start + offset;
            assert_eq!((avg.year, avg.month), (records[i].year, records[i].month));
            assert_eq!(avg.ma1y, mean(&prices[i - 11..=i]));
            assert_eq!(avg.ma2y, mean(&prices[i - 23..=i]));
            assert_eq!(avg.ma4y, mean(&prices[i - 47..=i]));
        }
    }

    #[test]
    fn test_shuffled_input_matches_sorted_input() {
        let records = months_ending_at(YearMonth::new(1880, 12), 120, |i| 10.0 + (i % 7) as f64);
        let mut shuffled = records.clone();
        shuffled.shuffle(&mut StdRng::seed_from_u64(7));

        let service = AverageService::new();
        let sorted_output = service.compute_averages(&records, ANCHOR).unwrap();
        let shuffled_output = service.compute_averages(&shuffled, ANCHOR).unwrap();

        assert_eq!(sorted_output, shuffled_output);
    }

    #[test]
    fn test_exactly_48_months_yields_one_record() {
        let records = months_ending_at(ANCHOR, 48, |i| i as f64);

        let output = AverageService::new().compute_averages(&records, ANCHOR).unwrap();

        assert_eq!(output.len(), 1);
        assert_eq!((output[0].year, output[0].month), (1875, 1));
        assert_eq!(output[0].ma1y, mean(&(36..48).map(|i| i as f64).collect::<Vec<_>>()));
        assert_eq!(output[0].ma4y, 23.5);
    }

    #[test]
    fn test_47_months_is_insufficient() {
        let records = months_ending_at(ANCHOR, 47, |_| 100.0);

        let err = AverageService::new().compute_averages(&records, ANCHOR).unwrap_err();

        match err {
            AppError::InsufficientHistory { anchor, required, available } => {
                assert_eq!(anchor, ANCHOR);
                assert_eq!(required, 48);
                assert_eq!(available, 47);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_anchor_month() {
        let records: Vec<PriceRecord> = months_ending_at(YearMonth::new(1876, 12), 72, |_| 1.0)
            .into_iter()
            .filter(|r| r.period() != ANCHOR)
            .collect();

        let err = AverageService::new().compute_averages(&records, ANCHOR).unwrap_err();

        assert!(matches!(err, AppError::DataNotFound(anchor) if anchor == ANCHOR));
        assert_eq!(err.to_string(), "Data does not contain January 1875");
    }

    #[test]
    fn test_price_jump_moves_short_window_first() {
        let mut records = months_ending_at(ANCHOR, 50, |_| 100.0);
        records.push(PriceRecord::new(1875, 2, 200.0));
        records.push(PriceRecord::new(1875, 3, 200.0));

        let output = AverageService::new().compute_averages(&records, ANCHOR).unwrap();

        assert_eq!(output.len(), 3);
        assert_eq!(output[0].ma1y, 100.0);
        assert_eq!(output[0].ma2y, 100.0);
        assert_eq!(output[0].ma4y, 100.0);

        let later = output[2];
        assert_eq!((later.year, later.month), (1875, 3));
        assert!(later.ma1y > later.ma2y);
        assert!(later.ma2y > later.ma4y);
        assert!((later.ma1y - (10.0 * 100.0 + 2.0 * 200.0) / 12.0).abs() < 1e-9);
        assert!((later.ma4y - (46.0 * 100.0 + 2.0 * 200.0) / 48.0).abs() < 1e-9);
    }

    #[test]
    fn test_caller_records_are_not_reordered() {
        let mut records = months_ending_at(ANCHOR, 48, |i| i as f64);
        records.reverse();
        let before = records.clone();

        AverageService::new().compute_averages(&records, ANCHOR).unwrap();

        assert_eq!(records, before);
    }
}
