pub struct MovingAverageIndicator;

impl MovingAverageIndicator {
    pub fn new() -> Self {
        Self
    }

    // Simple Moving Average of one window. Callers pass a non-empty slice.
    pub fn calculate_sma(&self, window: &[f64]) -> f64 {
        let sum: f64 = window.iter().sum();
        sum / window.len() as f64
    }
}

impl Default for MovingAverageIndicator {
    fn default() -> Self {
        Self::new()
    }
}
