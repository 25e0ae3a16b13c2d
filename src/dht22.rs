use embedded_hal::delay::DelayNs;

use crate::{
    config::ReadConfig,
    error::DhtError,
    frame::RawFrame,
    gpio::{Gpio, Level, PinMode},
};

/// Edge transitions sampled per attempt: 2 for the sensor's response, 2 for
/// the first bit preamble, 80 for the data bits and one for the final release.
const MAX_TIMINGS: u8 = 85;

/// Maximum number of 1us ticks to wait for the line to change state.
///
/// Reaching it ends the sampling pass.
const TICK_CEILING: u8 = 255;

/// A high pulse longer than this many ticks encodes a `1`.
const ONE_THRESHOLD: u8 = 16;

/// Index of the first transition whose high time carries a data bit.
const FIRST_DATA_TRANSITION: u8 = 4;

/// Driver for the DHT22 temperature and humidity sensor.
///
/// Owns the GPIO capability and keeps the most recent valid reading. All
/// writes to that cache go through `&mut self`.
pub struct Dht22<G, D> {
    gpio: G,
    delay: D,
    config: ReadConfig,
    initialized: bool,
    last: Option<Reading>,
}

/// Reading returned by the DHT22 sensor.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    /// Temperature in degrees Celsius.
    pub temperature: f32,
    /// Relative humidity in percent.
    pub relative_humidity: f32,
}

impl Reading {
    /// Both fields must be strictly positive.
    pub fn is_plausible(&self) -> bool {
        self.temperature > 0.0 && self.relative_humidity > 0.0
    }
}

impl<G, D> Dht22<G, D>
where
    G: Gpio,
    D: DelayNs,
{
    /// Creates a new instance of the DHT22 driver with the default [`ReadConfig`].
    ///
    /// # Arguments
    ///
    /// * `gpio` - The GPIO capability the sensor and output pins live on.
    /// * `delay` - A delay provider implementing the `DelayNs` trait.
    pub fn new(gpio: G, delay: D) -> Self {
        Self::with_config(gpio, delay, ReadConfig::default())
    }

    /// Creates a driver with an explicit timing and retry configuration.
    pub fn with_config(gpio: G, delay: D, config: ReadConfig) -> Self {
        Dht22 {
            gpio,
            delay,
            config,
            initialized: false,
            last: None,
        }
    }

    /// Timing and retry configuration in use.
    pub fn config(&self) -> &ReadConfig {
        &self.config
    }

    /// Gives back the GPIO capability and delay provider.
    pub fn release(self) -> (G, D) {
        (self.gpio, self.delay)
    }

    /// Performs the one-time platform setup.
    ///
    /// A failure here is returned as [`DhtError::Setup`] and is never retried:
    /// nothing else in the driver can work without pin access.
    pub fn initialize(&mut self) -> Result<(), DhtError<G::Error>> {
        self.gpio.setup().map_err(DhtError::Setup)?;
        self.initialized = true;
        Ok(())
    }

    /// Reads the sensor on `pin`, retrying until a valid reading arrives.
    ///
    /// Timeouts and checksum mismatches retry the handshake immediately.
    /// Implausible readings are logged and retried after
    /// [`ReadConfig::implausible_backoff_ms`]. With the default configuration
    /// this blocks until it succeeds; set [`ReadConfig::max_attempts`] to get
    /// [`DhtError::RetriesExhausted`] instead.
    ///
    /// # Returns
    ///
    /// * `Ok(Reading)` once a frame passes the checksum and plausibility checks.
    /// * `Err(DhtError)` on a pin fault, missing setup or an exhausted retry budget.
    pub fn read_sensor(&mut self, pin: u8) -> Result<Reading, DhtError<G::Error>> {
        let mut attempts: u32 = 0;
        loop {
            let backoff = match self.read_once(pin) {
                Ok(reading) => return Ok(reading),
                Err(DhtError::Implausible(_reading)) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!(
                        "Temperature: {} / Humidity: {}",
                        _reading.temperature,
                        _reading.relative_humidity
                    );
                    true
                }
                Err(err) if err.is_transient() => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("DHT22 attempt {} failed, retrying", attempts + 1);
                    false
                }
                Err(err) => return Err(err),
            };

            attempts = attempts.saturating_add(1);
            if self.config.exhausted(attempts) {
                return Err(DhtError::RetriesExhausted { attempts });
            }
            // only pause when another attempt follows
            if backoff {
                self.delay.delay_ms(self.config.implausible_backoff_ms);
            }
        }
    }

    /// Makes a single read attempt: handshake, sampling and validation.
    ///
    /// The cached reading is only updated when this succeeds.
    pub fn read_once(&mut self, pin: u8) -> Result<Reading, DhtError<G::Error>> {
        self.ensure_initialized()?;
        self.start(pin)?;

        let frame = self.sample(pin)?;
        if !frame.is_complete() {
            return Err(DhtError::Timeout);
        }
        if !frame.checksum_matches() {
            return Err(DhtError::ChecksumMismatch {
                expected: frame.expected_checksum(),
                received: frame.checksum(),
            });
        }

        let reading = frame.decode();
        if !reading.is_plausible() {
            return Err(DhtError::Implausible(reading));
        }

        self.last = Some(reading);
        Ok(reading)
    }

    /// Most recent valid reading, if any.
    pub fn last_reading(&self) -> Option<Reading> {
        self.last
    }

    /// Temperature of the most recent valid reading, `0.0` before the first one.
    pub fn last_temperature(&self) -> f32 {
        self.last.map_or(0.0, |r| r.temperature)
    }

    /// Humidity of the most recent valid reading, `0.0` before the first one.
    pub fn last_humidity(&self) -> f32 {
        self.last.map_or(0.0, |r| r.relative_humidity)
    }

    /// Configures `pin` as an output and drives it high for any positive
    /// level, low otherwise.
    pub fn set_digital_output(
        &mut self,
        pin: u8,
        level: impl Into<Level>,
    ) -> Result<(), DhtError<G::Error>> {
        self.ensure_initialized()?;
        self.gpio.set_mode(pin, PinMode::Output)?;
        self.gpio.write(pin, level.into())?;
        Ok(())
    }

    /// Fails with [`DhtError::NotInitialized`] until `initialize` succeeded.
    fn ensure_initialized(&self) -> Result<(), DhtError<G::Error>> {
        if self.initialized {
            Ok(())
        } else {
            Err(DhtError::NotInitialized)
        }
    }

    /// Sends the start signal and hands the line back to the sensor.
    ///
    /// The line is held low for the wake period, then driven high for the
    /// release period before the pin is switched to input.
    fn start(&mut self, pin: u8) -> Result<(), G::Error> {
        self.gpio.set_mode(pin, PinMode::Output)?;
        self.gpio.write(pin, Level::Low)?;
        self.delay.delay_ms(self.config.wake_ms);
        self.gpio.write(pin, Level::High)?;
        self.delay.delay_us(self.config.release_us);
        self.gpio.set_mode(pin, PinMode::Input)
    }

    /// Times up to [`MAX_TIMINGS`] edges and shifts the data bits into a frame.
    ///
    /// Stops early when an edge hits the tick ceiling. Once the last bit has
    /// been sent the line idles high, so a complete frame normally ends this way.
    fn sample(&mut self, pin: u8) -> Result<RawFrame, G::Error> {
        let mut frame = RawFrame::new();
        let mut level = Level::High;

        for i in 0..MAX_TIMINGS {
            let Some(ticks) = self.measure(pin, level)? else {
                break;
            };
            level = !level;

            if i >= FIRST_DATA_TRANSITION && i % 2 == 0 {
                frame.push_bit(ticks > ONE_THRESHOLD);
            }
        }

        Ok(frame)
    }

    /// Counts 1us ticks while the line stays at `level`.
    ///
    /// Returns `None` if the ceiling is reached before the line changes.
    fn measure(&mut self, pin: u8, level: Level) -> Result<Option<u8>, G::Error> {
        let mut ticks: u8 = 0;
        while self.gpio.read(pin)? == level {
            ticks += 1;
            self.delay.delay_us(1);
            if ticks == TICK_CEILING {
                return Ok(None);
            }
        }
        Ok(Some(ticks))
    }
}
