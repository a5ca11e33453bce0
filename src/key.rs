//! Key serialization: the frequency table as text.
//!
//! Entries are `<unit>~<count>` joined by `!`, in table order. Units are
//! always written as decimal numbers, so the separators can never appear
//! inside a field whatever the input text or group size.

use tracing::debug;

use crate::error::{CodecError, Result};
use crate::frequency::{FrequencyTable, Unit};

pub const ENTRY_SEPARATOR: char = '!';
pub const FIELD_SEPARATOR: char = '~';

/// Render a frequency table as key text.
pub fn serialize_key(freqs: &FrequencyTable) -> String {
    let mut key = String::new();
    for (i, entry) in freqs.iter().enumerate() {
        if i > 0 {
            key.push(ENTRY_SEPARATOR);
        }
        key.push_str(&format!("{}{FIELD_SEPARATOR}{}", entry.unit, entry.count));
    }
    debug!(entries = freqs.len(), len = key.len(), "serialized key");
    key
}

/// Parse key text back into a frequency table, preserving entry order.
pub fn deserialize_key(key: &str) -> Result<FrequencyTable> {
    let mut freqs = FrequencyTable::new();
    let mut total: u64 = 0;
    if key.is_empty() {
        return Ok(freqs);
    }

    for entry in key.split(ENTRY_SEPARATOR) {
        let (unit, count) = entry
            .split_once(FIELD_SEPARATOR)
            .ok_or_else(|| malformed(format!("entry {entry:?} has no {FIELD_SEPARATOR:?}")))?;
        let unit: Unit = unit
            .parse()
            .map_err(|_| malformed(format!("unit {unit:?} is not a number")))?;
        let count: u64 = count
            .parse()
            .map_err(|_| malformed(format!("count {count:?} is not a number")))?;
        if count == 0 {
            return Err(malformed(format!("unit {unit} has a zero count")));
        }
        total = total
            .checked_add(count)
            .ok_or_else(|| malformed(format!("counts overflow at unit {unit}")))?;
        if !freqs.insert(unit, count) {
            return Err(malformed(format!("unit {unit} appears twice")));
        }
    }

    debug!(entries = freqs.len(), "parsed key");
    Ok(freqs)
}

fn malformed(reason: String) -> CodecError {
    CodecError::MalformedKey(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_format() {
        let freqs = FrequencyTable::from_units(&[97, 97, 97, 98, 98, 99]);
        assert_eq!(serialize_key(&freqs), "97~3!98~2!99~1");
    }

    #[test]
    fn test_roundtrip_keeps_order() {
        let freqs = FrequencyTable::from_units(&[500, 3, 3, 126, 33, 500, 500]);
        let parsed = deserialize_key(&serialize_key(&freqs)).unwrap();
        assert_eq!(parsed, freqs);
    }

    #[test]
    fn test_separator_units_are_numeric() {
        let units = ['~' as Unit, '!' as Unit, '~' as Unit];
        let key = serialize_key(&FrequencyTable::from_units(&units));
        assert_eq!(key, "126~2!33~1");
        assert_eq!(deserialize_key(&key).unwrap().get('~' as Unit), Some(2));
    }

    #[test]
    fn test_count_overflow() {
        let result = deserialize_key("97~18446744073709551615!98~1");
        assert!(matches!(result, Err(CodecError::MalformedKey(_))));
        // a single maximal count is still a valid key
        let max = deserialize_key("97~18446744073709551615").unwrap();
        assert_eq!(max.total(), u64::MAX);
    }

    #[test]
    fn test_empty_key() {
        assert!(deserialize_key("").unwrap().is_empty());
        assert_eq!(serialize_key(&FrequencyTable::new()), "");
    }

    #[test]
    fn test_malformed_keys() {
        for key in ["97", "97~", "x~3", "97~three", "97~0", "97~1!97~2", "97~1!", "-1~2"] {
            assert!(
                matches!(deserialize_key(key), Err(CodecError::MalformedKey(_))),
                "{key:?} should be rejected"
            );
        }
    }
}
