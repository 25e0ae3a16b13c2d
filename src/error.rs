use crate::dht22::Reading;

/// Possible errors from the DHT22 driver.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DhtError<E> {
    /// Timed out waiting for an edge before all 40 data bits arrived.
    #[error("timed out waiting for the sensor")]
    Timeout,
    /// Checksum did not match the received data.
    #[error("checksum mismatch: expected {expected:#04x}, received {received:#04x}")]
    ChecksumMismatch { expected: u8, received: u8 },
    /// Frame was valid but temperature or humidity was not above zero.
    #[error("implausible reading: {0:?}")]
    Implausible(Reading),
    /// The configured attempt limit was reached without a valid reading.
    #[error("no valid reading after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
    /// A pin was used before [`Dht22::initialize`](crate::Dht22::initialize).
    #[error("GPIO not initialized")]
    NotInitialized,
    /// The GPIO platform could not be set up.
    #[error("GPIO setup failed: {0:?}")]
    Setup(E),
    /// Error from the GPIO pin (input/output).
    #[error("pin error: {0:?}")]
    PinError(E),
}

impl<E> From<E> for DhtError<E> {
    fn from(value: E) -> Self {
        Self::PinError(value)
    }
}

impl<E> DhtError<E> {
    /// Whether another handshake may still produce a valid reading.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::ChecksumMismatch { .. } | Self::Implausible(_)
        )
    }
}
