//! The 64-symbol text alphabet used for cipher output.
//!
//! Every symbol survives URI encoding untouched: `a-z`, `A-Z`, `0-9`, `_`
//! and `-`, in that order.

use std::sync::LazyLock;

pub const SIZE: usize = 64;

/// Bits carried by one symbol.
pub const BITS_PER_SYMBOL: u32 = 6;

pub static SYMBOLS: [u8; SIZE] =
    *b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_-";

static INDICES: LazyLock<[Option<u8>; 128]> = LazyLock::new(|| {
    let mut indices = [None; 128];
    for (i, &symbol) in SYMBOLS.iter().enumerate() {
        indices[symbol as usize] = Some(i as u8);
    }
    indices
});

/// Symbol for a 6-bit value. Only the low six bits of `value` are used.
pub fn symbol(value: u8) -> char {
    SYMBOLS[(value & 0x3f) as usize] as char
}

/// Inverse of [`symbol`].
pub fn index_of(ch: char) -> Option<u8> {
    if ch.is_ascii() {
        INDICES[ch as usize]
    } else {
        None
    }
}

pub fn contains(ch: char) -> bool {
    index_of(ch).is_some()
}
