/// Timing and retry settings for [`Dht22::read_sensor`](crate::Dht22::read_sensor).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadConfig {
    /// How long the line is held low to wake the sensor, in milliseconds.
    pub wake_ms: u32,
    /// How long the line is driven high before listening, in microseconds.
    pub release_us: u32,
    /// Pause after a frame that decoded to an implausible value, in milliseconds.
    pub implausible_backoff_ms: u32,
    /// Give up after this many failed attempts. `None` retries forever.
    ///
    /// At least one attempt is always made.
    pub max_attempts: Option<u32>,
}

impl ReadConfig {
    /// 18 ms wake pulse, 40 us release, 1 s backoff, unbounded retries.
    pub const fn new() -> Self {
        ReadConfig {
            wake_ms: 18,
            release_us: 40,
            implausible_backoff_ms: 1000,
            max_attempts: None,
        }
    }

    /// Sets the wake pulse length.
    pub const fn with_wake_ms(mut self, wake_ms: u32) -> Self {
        self.wake_ms = wake_ms;
        self
    }

    /// Sets how long the line is driven high before listening.
    pub const fn with_release_us(mut self, release_us: u32) -> Self {
        self.release_us = release_us;
        self
    }

    /// Sets the pause after an implausible reading.
    pub const fn with_implausible_backoff_ms(mut self, backoff_ms: u32) -> Self {
        self.implausible_backoff_ms = backoff_ms;
        self
    }

    /// Bounds the number of attempts made by `read_sensor`.
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Whether `attempts` failed attempts use up the retry budget.
    pub(crate) fn exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        let config = ReadConfig::default();
        assert_eq!(config.wake_ms, 18);
        assert_eq!(config.release_us, 40);
        assert_eq!(config.implausible_backoff_ms, 1000);
        assert!(!config.exhausted(u32::MAX));
    }

    #[test]
    fn test_bounded_attempts() {
        let config = ReadConfig::new().with_max_attempts(3);
        assert!(!config.exhausted(2));
        assert!(config.exhausted(3));

        // zero still allows the first attempt to run before being checked
        let config = ReadConfig::new().with_max_attempts(0);
        assert!(config.exhausted(1));
    }
}
