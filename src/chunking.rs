//! Folds groups of characters into wide units before coding, and back.
//!
//! With a group size of 1 every `char` is its own unit. Larger groups fold
//! up to `group` ASCII characters into one integer, seven bits per
//! character: `acc = acc * 128 + code`.

use tracing::debug;

use crate::error::{CodecError, Result};
use crate::frequency::Unit;

/// Largest group whose fold still fits a `u64` (128^9 = 2^63).
pub const MAX_GROUP_SIZE: usize = 9;

const CHAR_BITS: u32 = 7;
const CHAR_MASK: Unit = (1 << CHAR_BITS) - 1;

pub fn check_group_size(group: usize) -> Result<()> {
    if group == 0 || group > MAX_GROUP_SIZE {
        return Err(CodecError::InvalidGroupSize(group));
    }
    Ok(())
}

/// Split `input` into units of `group` characters each.
pub fn chunk(input: &str, group: usize) -> Result<Vec<Unit>> {
    check_group_size(group)?;
    if group == 1 {
        return Ok(input.chars().map(|c| c as Unit).collect());
    }

    let chars: Vec<char> = input.chars().collect();
    let mut units = Vec::with_capacity(chars.len().div_ceil(group));
    for (n, chunk) in chars.chunks(group).enumerate() {
        let mut acc: Unit = 0;
        for (i, &ch) in chunk.iter().enumerate() {
            // NUL would vanish as a leading zero in the fold
            if ch == '\0' || !ch.is_ascii() {
                return Err(CodecError::UnchunkableChar {
                    ch,
                    position: n * group + i,
                });
            }
            acc = (acc << CHAR_BITS) | ch as Unit;
        }
        units.push(acc);
    }

    debug!(chars = chars.len(), units = units.len(), group, "chunked input");
    Ok(units)
}

/// Turn units back into text; the inverse of [`chunk`].
pub fn unchunk(units: &[Unit], group: usize) -> Result<String> {
    check_group_size(group)?;
    if group == 1 {
        return units
            .iter()
            .map(|&unit| {
                u32::try_from(unit)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or(CodecError::InvalidUnit(unit))
            })
            .collect();
    }

    let mut text = String::with_capacity(units.len() * group);
    let mut codes = Vec::with_capacity(group);
    for &unit in units {
        let mut rest = unit;
        codes.clear();
        while rest > 0 {
            codes.push((rest & CHAR_MASK) as u8);
            rest >>= CHAR_BITS;
        }
        if codes.is_empty() || codes.len() > group || codes.contains(&0) {
            return Err(CodecError::InvalidUnit(unit));
        }
        text.extend(codes.iter().rev().map(|&c| c as char));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_group() {
        let units = chunk("añ€", 1).unwrap();
        assert_eq!(units, vec!['a' as Unit, 'ñ' as Unit, '€' as Unit]);
        assert_eq!(unchunk(&units, 1).unwrap(), "añ€");
    }

    #[test]
    fn test_fold_values() {
        let units = chunk("abc", 2).unwrap();
        assert_eq!(units, vec![97 * 128 + 98, 99]);
        assert_eq!(unchunk(&units, 2).unwrap(), "abc");
    }

    #[test]
    fn test_max_group_fits() {
        let input = "\x7f".repeat(MAX_GROUP_SIZE);
        let units = chunk(&input, MAX_GROUP_SIZE).unwrap();
        assert_eq!(units, vec![(1u64 << 63) - 1]);
        assert_eq!(unchunk(&units, MAX_GROUP_SIZE).unwrap(), input);
    }

    #[test]
    fn test_group_size_bounds() {
        assert!(matches!(chunk("abc", 0), Err(CodecError::InvalidGroupSize(0))));
        assert!(matches!(
            unchunk(&[97], MAX_GROUP_SIZE + 1),
            Err(CodecError::InvalidGroupSize(_))
        ));
    }

    #[test]
    fn test_rejects_wide_chars() {
        let result = chunk("abcé", 2);
        assert!(matches!(
            result,
            Err(CodecError::UnchunkableChar { ch: 'é', position: 3 })
        ));
        assert!(matches!(
            chunk("a\0", 3),
            Err(CodecError::UnchunkableChar { ch: '\0', position: 1 })
        ));
    }

    #[test]
    fn test_unchunk_invalid_units() {
        assert!(matches!(unchunk(&[0], 2), Err(CodecError::InvalidUnit(0))));
        // three 7-bit groups do not fit a group of two
        let wide = (97 << 14) | (98 << 7) | 99;
        assert!(matches!(unchunk(&[wide], 2), Err(CodecError::InvalidUnit(_))));
        // an embedded zero group
        assert!(matches!(unchunk(&[97 << 7], 2), Err(CodecError::InvalidUnit(_))));
        assert!(matches!(unchunk(&[0xD800], 1), Err(CodecError::InvalidUnit(_))));
    }

    #[test]
    fn test_empty_input() {
        assert!(chunk("", 3).unwrap().is_empty());
        assert_eq!(unchunk(&[], 3).unwrap(), "");
    }
}
