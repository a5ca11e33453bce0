//! hufftext: lossless text compression with Huffman coding.
//!
//! Compression produces two strings:
//! - a **cipher**: one pad digit followed by the Huffman bitstream packed six
//!   bits per symbol into `a-z A-Z 0-9 _ -`
//! - a **key**: the frequency table, from which the decoder rebuilds the
//!   exact same tree
//!
//! An optional unit group size folds several ASCII characters into one wide
//! symbol before coding. It is not recorded in either string, so the same
//! value must be used to decompress.
//!
//! ```
//! let packed = hufftext::compress("aaabbc", 1)?;
//! assert_eq!(packed.cipher, "3aBq");
//! assert_eq!(packed.keys, "97~3!98~2!99~1");
//! assert_eq!(hufftext::decompress(&packed, 1)?, "aaabbc");
//! # Ok::<(), hufftext::error::CodecError>(())
//! ```

pub mod alphabet;
pub mod chunking;
pub mod config;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod key;
pub mod packer;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::frequency::FrequencyTable;
use crate::huffman::{CodeTable, HuffmanTree};

/// Cipher and key produced by one compression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedText {
    pub cipher: String,
    pub keys: String,
}

impl CompressedText {
    /// Combined length of cipher and key relative to the original text.
    pub fn ratio(&self, original_len: usize) -> f64 {
        if original_len == 0 {
            return 1.0;
        }
        (self.cipher.len() + self.keys.len()) as f64 / original_len as f64
    }
}

/// Single-string form: `<cipher>!<keys>`. The cipher alphabet has no `!`,
/// so the first one always ends the cipher.
impl fmt::Display for CompressedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.cipher, key::ENTRY_SEPARATOR, self.keys)
    }
}

impl FromStr for CompressedText {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        let (cipher, keys) = s
            .split_once(key::ENTRY_SEPARATOR)
            .ok_or_else(|| CodecError::MalformedKey("packed text has no key section".into()))?;
        Ok(Self {
            cipher: cipher.to_string(),
            keys: keys.to_string(),
        })
    }
}

/// The main codec
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    /// Create a codec, rejecting an invalid configuration.
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Compress `input`. Empty input has no symbols to build a tree from and
    /// fails with [`CodecError::InsufficientSymbols`].
    pub fn compress(&self, input: &str) -> Result<CompressedText> {
        if input.len() > self.config.max_input_size {
            return Err(CodecError::InputTooLarge {
                size: input.len(),
                max: self.config.max_input_size,
            });
        }

        let units = chunking::chunk(input, self.config.unit_group_size)?;
        let freqs = FrequencyTable::from_units(&units);
        let tree = HuffmanTree::from_frequencies(&freqs)?;
        let table = CodeTable::from_tree(&tree);

        let cipher = packer::pack(&units, &table)?;
        let keys = key::serialize_key(&freqs);

        debug!(
            input = input.len(),
            symbols = freqs.len(),
            cipher = cipher.len(),
            keys = keys.len(),
            "compressed"
        );
        Ok(CompressedText { cipher, keys })
    }

    /// Rebuild the tree from the key and decode the cipher back to text.
    pub fn decompress(&self, packed: &CompressedText) -> Result<String> {
        let freqs = key::deserialize_key(&packed.keys)?;
        let tree = HuffmanTree::from_frequencies(&freqs)?;
        let table = CodeTable::from_tree(&tree);

        let units = packer::unpack(&packed.cipher, &table)?;
        if units.len() as u64 != freqs.total() {
            return Err(CodecError::CorruptCipher(format!(
                "decoded {} units but key counts {}",
                units.len(),
                freqs.total()
            )));
        }

        let text = chunking::unchunk(&units, self.config.unit_group_size)?;
        debug!(units = units.len(), output = text.len(), "decompressed");
        Ok(text)
    }

    /// Decompress the single-string `<cipher>!<keys>` form.
    pub fn decompress_packed(&self, packed: &str) -> Result<String> {
        self.decompress(&packed.parse::<CompressedText>()?)
    }
}

/// Compress `input`, folding `unit_group_size` characters into each unit.
pub fn compress(input: &str, unit_group_size: usize) -> Result<CompressedText> {
    Codec::new(CodecConfig::with_group_size(unit_group_size))?.compress(input)
}

/// Decompress with the same `unit_group_size` that was used to compress.
pub fn decompress(packed: &CompressedText, unit_group_size: usize) -> Result<String> {
    Codec::new(CodecConfig::with_group_size(unit_group_size))?.decompress(packed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_known_output() {
        let packed = compress("aaabbc", 1).unwrap();
        assert_eq!(packed.cipher, "3aBq");
        assert_eq!(packed.keys, "97~3!98~2!99~1");
    }

    #[test]
    fn test_roundtrip() {
        let data = "the quick brown fox jumps over the lazy dog";
        let packed = compress(data, 1).unwrap();
        assert_eq!(decompress(&packed, 1).unwrap(), data);
    }

    #[test]
    fn test_single_symbol() {
        let packed = compress("aaaa", 1).unwrap();
        assert_eq!(packed.cipher, "2a");
        assert_eq!(packed.keys, "97~4");
        assert_eq!(decompress(&packed, 1).unwrap(), "aaaa");
    }

    #[test]
    fn test_compress_empty() {
        assert!(matches!(compress("", 1), Err(CodecError::InsufficientSymbols)));
        assert!(matches!(compress("", 4), Err(CodecError::InsufficientSymbols)));
    }

    #[test]
    fn test_decompress_empty_key() {
        let packed = CompressedText {
            cipher: "0".into(),
            keys: String::new(),
        };
        assert!(matches!(decompress(&packed, 1), Err(CodecError::InsufficientSymbols)));
    }

    #[test]
    fn test_invalid_group_size() {
        assert!(matches!(compress("abc", 0), Err(CodecError::InvalidGroupSize(0))));
        assert!(Codec::new(CodecConfig::with_group_size(10)).is_err());
    }

    #[test]
    fn test_input_too_large() {
        let codec = Codec::new(CodecConfig {
            max_input_size: 4,
            ..CodecConfig::default()
        })
        .unwrap();
        assert!(matches!(
            codec.compress("hello"),
            Err(CodecError::InputTooLarge { size: 5, max: 4 })
        ));
    }

    #[test]
    fn test_count_mismatch_is_corrupt() {
        // single-symbol trees decode padding zeros as symbols; the key total
        // catches a wrong pad digit
        let packed = CompressedText {
            cipher: "0a".into(),
            keys: "97~4".into(),
        };
        assert!(matches!(decompress(&packed, 1), Err(CodecError::CorruptCipher(_))));
    }

    #[test]
    fn test_packed_string_form() {
        let packed = compress("aaabbc", 1).unwrap();
        let text = packed.to_string();
        assert_eq!(text, "3aBq!97~3!98~2!99~1");
        assert_eq!(text.parse::<CompressedText>().unwrap(), packed);
        assert_eq!(Codec::default().decompress_packed(&text).unwrap(), "aaabbc");
    }

    #[test]
    fn test_packed_string_without_key() {
        assert!("3aBq".parse::<CompressedText>().is_err());
    }

    #[test]
    fn test_compression_ratio() {
        let data = "aaaaaaaaab".repeat(100);
        let packed = compress(&data, 1).unwrap();
        assert!(packed.ratio(data.len()) < 0.5, "repetitive data should compress well");
    }
}
