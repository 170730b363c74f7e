//! CRC16-CCITT calculator for IIC commands.
//! Provides the reflected CRC16 engine, a strict hex text decoder and
//! the per-row command model used by the command-line front end.

pub mod crc;
pub mod hex;
pub mod row;
