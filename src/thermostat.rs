//! Heater control loop around a [`Dht22`].
//!
//! Keeps the temperature inside a band around a setpoint by switching a heater
//! relay, with a status LED and a cooler relay alongside.

use embedded_hal::delay::DelayNs;

use crate::{
    dht22::{Dht22, Reading},
    error::DhtError,
    gpio::{Gpio, Level},
};

/// Pin assignments and regulation settings.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThermostatConfig {
    pub sensor_pin: u8,
    pub status_pin: u8,
    pub heater_pin: u8,
    /// Cooler relay, switched on by a low level.
    pub cooler_pin: u8,
    /// Target temperature in degrees Celsius.
    pub setpoint: f32,
    /// Half width of the dead band around the setpoint.
    pub hysteresis: f32,
    pub auto_control: bool,
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        ThermostatConfig {
            sensor_pin: 7,
            status_pin: 23,
            heater_pin: 24,
            cooler_pin: 25,
            setpoint: 25.0,
            hysteresis: 0.5,
            auto_control: true,
        }
    }
}

/// Hysteresis heater controller driving its relays through a [`Dht22`].
pub struct Thermostat {
    config: ThermostatConfig,
}

impl Thermostat {
    /// Creates a controller from pin assignments and regulation settings.
    pub fn new(config: ThermostatConfig) -> Self {
        Thermostat { config }
    }

    /// Current pin assignments and regulation settings.
    pub fn config(&self) -> &ThermostatConfig {
        &self.config
    }

    /// Moves the target temperature.
    pub fn set_setpoint(&mut self, setpoint: f32) {
        self.config.setpoint = setpoint;
    }

    /// Enables or disables heater regulation in [`step`](Self::step).
    pub fn set_auto_control(&mut self, enabled: bool) {
        self.config.auto_control = enabled;
    }

    /// Turns the status LED and the cooler on.
    pub fn start<G, D>(&self, dht: &mut Dht22<G, D>) -> Result<(), DhtError<G::Error>>
    where
        G: Gpio,
        D: DelayNs,
    {
        self.set_status(dht, true)?;
        self.set_cooler(dht, true)
    }

    /// Switches the status LED.
    pub fn set_status<G, D>(
        &self,
        dht: &mut Dht22<G, D>,
        on: bool,
    ) -> Result<(), DhtError<G::Error>>
    where
        G: Gpio,
        D: DelayNs,
    {
        dht.set_digital_output(self.config.status_pin, on)
    }

    /// Switches the heater relay.
    pub fn set_heater<G, D>(
        &self,
        dht: &mut Dht22<G, D>,
        on: bool,
    ) -> Result<(), DhtError<G::Error>>
    where
        G: Gpio,
        D: DelayNs,
    {
        dht.set_digital_output(self.config.heater_pin, on)
    }

    /// Switches the cooler relay, which is on when driven low.
    pub fn set_cooler<G, D>(
        &self,
        dht: &mut Dht22<G, D>,
        on: bool,
    ) -> Result<(), DhtError<G::Error>>
    where
        G: Gpio,
        D: DelayNs,
    {
        dht.set_digital_output(self.config.cooler_pin, !Level::from(on))
    }

    /// Heater state for `temperature`: `Some(false)` above the band,
    /// `Some(true)` below it, `None` inside it.
    pub fn regulate(&self, temperature: f32) -> Option<bool> {
        let ThermostatConfig {
            setpoint,
            hysteresis,
            ..
        } = self.config;

        if temperature > setpoint + hysteresis {
            Some(false)
        } else if temperature < setpoint - hysteresis {
            Some(true)
        } else {
            None
        }
    }

    /// One loop iteration: blocks for a reading, then drives the heater if
    /// auto control is on.
    pub fn step<G, D>(&self, dht: &mut Dht22<G, D>) -> Result<Reading, DhtError<G::Error>>
    where
        G: Gpio,
        D: DelayNs,
    {
        let reading = dht.read_sensor(self.config.sensor_pin)?;

        if self.config.auto_control {
            if let Some(on) = self.regulate(reading.temperature) {
                self.set_heater(dht, on)?;
            }
        }

        Ok(reading)
    }
}
