/// Bit-reversed form of the CCITT polynomial 0x1021.
pub const POLY: u16 = 0x8408;

/// Register seed used by the MIPI CSI-2 reference routine.
pub const DEFAULT_INITIAL: u16 = 0xFFFF;

/// CRC-16/CCITT (reflected poly 0x8408), bit-by-bit implementation
/// matching the MIPI CSI-2 reference C routine.
///
/// The register starts at `initial` and is returned as-is, without the
/// optional endian swap from the reference code. An empty slice returns
/// `initial` unchanged.
pub fn crc16_ccitt(data: &[u8], initial: u16) -> u16 {
    data.iter().fold(initial, |crc, &byte| shift_byte(crc, byte))
}

/// Same as [`crc16_ccitt`] seeded with [`DEFAULT_INITIAL`].
pub fn crc16_ccitt_default(data: &[u8]) -> u16 {
    crc16_ccitt(data, DEFAULT_INITIAL)
}

// Feeds one byte through the register, least significant bit first.
fn shift_byte(mut crc: u16, byte: u8) -> u16 {
    let mut data = byte;
    for _ in 0..8 {
        crc = shift_bit(crc, data & 1);
        data >>= 1;
    }
    crc
}

fn shift_bit(crc: u16, bit: u8) -> u16 {
    if (crc & 0x0001) ^ u16::from(bit) != 0 {
        (crc >> 1) ^ POLY
    } else {
        crc >> 1
    }
}
