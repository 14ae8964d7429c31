//! Configuration access port trait.
//!
//! Sections used: `[data]` (input locations, date range) and `[strategy]`
//! (thresholds, indicator windows, aggregation period).

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;

    /// A window length; non-positive values fall back to `default`.
    fn get_period(&self, section: &str, key: &str, default: usize) -> usize {
        usize::try_from(self.get_int(section, key, default as i64))
            .ok()
            .filter(|&p| p > 0)
            .unwrap_or(default)
    }
}
