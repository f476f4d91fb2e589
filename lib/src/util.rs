use crate::constants::{PADDING, TRANS_ID_LEN};
use crate::header::TransId;
use rand::prelude::*;
use std::fmt::Write as _;

pub fn print_bytes(buf: &[u8], separator: &str, row_width: usize) -> String {
    let mut hex = String::new();
    buf.iter().enumerate().for_each(|(x, y)| {
        let _ = write!(hex, "{:02X}", y);
        if (x + 1) % row_width == 0 {
            hex.push('\n');
        } else {
            hex.push_str(separator);
        }
    });

    hex
}

/// Supplies transaction ids. Implementations must be non-repeating and safe to
/// share between threads; tests plug in a fixed one.
pub trait TransIdSource: Send + Sync {
    fn trans_id(&self) -> TransId;
}

/// Thread-local CSPRNG, a fresh id on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTransId;

impl TransIdSource for RandomTransId {
    fn trans_id(&self) -> TransId {
        let mut trans_id = [0u8; TRANS_ID_LEN];
        rand::thread_rng().fill_bytes(&mut trans_id);
        trans_id
    }
}

pub fn new_trans_id() -> TransId {
    RandomTransId.trans_id()
}

/// Byte-wise xor, truncated to the shorter input.
pub fn xor(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter().zip(b).map(|(x, y)| x ^ y).collect()
}

// 0..=3 bytes up to the next 32-bit boundary
pub fn padding_len(len: usize) -> usize {
    (PADDING - len % PADDING) % PADDING
}

// class: 3 bit  (3-6)
// number: 8 bit (0-99)
pub fn pack_error_code(code: u16) -> u16 {
    let class = code / 100;
    let number = code % 100;

    class << 8 | number
}

pub fn unpack_error_code(code: u16) -> u16 {
    let class = (code >> 8) & 0x07;
    let number = code & 0xff;
    class * 100 + number
}
