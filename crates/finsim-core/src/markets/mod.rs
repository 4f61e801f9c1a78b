//! Arithmetic over caller-supplied market quotes. Fetching the quotes is the
//! caller's job; nothing here performs I/O.

pub mod currency;
pub mod equity;
