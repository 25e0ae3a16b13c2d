use crate::dht22::Reading;

/// Number of data bits in a complete frame.
pub const FRAME_BITS: u8 = 40;

/// The 5 bytes clocked in during one sampling pass, MSB first.
///
/// Layout: humidity high, humidity low, temperature high (bit 7 is the sign),
/// temperature low, checksum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawFrame {
    bytes: [u8; 5],
    bits: u8,
}

impl RawFrame {
    /// Creates an empty frame with no bits received.
    pub const fn new() -> Self {
        RawFrame {
            bytes: [0; 5],
            bits: 0,
        }
    }

    /// Builds a complete frame from already received bytes.
    pub const fn from_bytes(bytes: [u8; 5]) -> Self {
        RawFrame {
            bytes,
            bits: FRAME_BITS,
        }
    }

    /// Shifts one bit into the current byte. Bits past the 40th are dropped.
    pub fn push_bit(&mut self, bit: bool) {
        if self.bits >= FRAME_BITS {
            return;
        }
        let byte = &mut self.bytes[usize::from(self.bits / 8)];
        *byte = (*byte << 1) | u8::from(bit);
        self.bits += 1;
    }

    /// Number of data bits received so far.
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Raw frame bytes, checksum last.
    pub fn bytes(&self) -> &[u8; 5] {
        &self.bytes
    }

    /// Whether all 40 data bits have arrived.
    pub fn is_complete(&self) -> bool {
        self.bits >= FRAME_BITS
    }

    /// Low 8 bits of the sum of the four data bytes.
    pub fn expected_checksum(&self) -> u8 {
        self.bytes[..4]
            .iter()
            .fold(0u8, |sum, v| sum.wrapping_add(*v))
    }

    /// Checksum byte as sent by the sensor.
    pub fn checksum(&self) -> u8 {
        self.bytes[4]
    }

    /// Whether the received checksum equals [`expected_checksum`](Self::expected_checksum).
    pub fn checksum_matches(&self) -> bool {
        self.expected_checksum() == self.checksum()
    }

    /// Converts the four data bytes into a `Reading`.
    ///
    /// Does not look at the checksum.
    pub fn decode(&self) -> Reading {
        let [hum_hi, hum_lo, temp_hi, temp_lo, _] = self.bytes;

        let joined_humidity = u16::from_be_bytes([hum_hi, hum_lo]);
        let relative_humidity = joined_humidity as f32 / 10.0;

        let is_temp_negative = (temp_hi >> 7) != 0;
        let temp_hi = temp_hi & 0b0111_1111;
        let joined_temp = u16::from_be_bytes([temp_hi, temp_lo]);
        let mut temperature = joined_temp as f32 / 10.0;
        if is_temp_negative {
            temperature = -temperature;
        }

        Reading {
            temperature,
            relative_humidity,
        }
    }
}
