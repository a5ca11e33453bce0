//! Packs code bits into alphabet symbols, and back.
//!
//! Cipher layout: one pad digit (`0`-`5`, the number of zero bits appended
//! to reach a multiple of six), then one alphabet symbol per 6-bit group,
//! most significant bit first.

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use tracing::{debug, warn};

use crate::alphabet::{self, BITS_PER_SYMBOL};
use crate::error::{CodecError, Result};
use crate::frequency::Unit;
use crate::huffman::{BitCode, CodeTable};

const GROUP: usize = BITS_PER_SYMBOL as usize;

/// Encode `units` with `table` into a pad digit followed by alphabet symbols.
pub fn pack(units: &[Unit], table: &CodeTable) -> Result<String> {
    let mut writer = BitWriter::endian(Vec::new(), BigEndian);
    let mut total_bits = 0usize;

    for &unit in units {
        let code = table
            .get(unit)
            .ok_or(CodecError::CodeTableMismatch { unit })?;
        for &bit in code.bits() {
            writer.write_bit(bit)?;
        }
        total_bits += code.len();
    }

    let pad = (GROUP - total_bits % GROUP) % GROUP;
    if pad > 0 {
        writer.write(pad as u32, 0u8)?;
    }
    writer.byte_align()?;
    let bytes = writer.into_writer();

    let groups = (total_bits + pad) / GROUP;
    let mut reader = BitReader::endian(bytes.as_slice(), BigEndian);
    let mut cipher = String::with_capacity(groups + 1);
    cipher.push(char::from(b'0' + pad as u8));
    for _ in 0..groups {
        let value: u8 = reader.read(BITS_PER_SYMBOL)?;
        cipher.push(alphabet::symbol(value));
    }

    debug!(units = units.len(), bits = total_bits, pad, len = cipher.len(), "packed cipher");
    Ok(cipher)
}

/// Decode a cipher produced by [`pack`] with the same code table.
pub fn unpack(cipher: &str, table: &CodeTable) -> Result<Vec<Unit>> {
    if table.is_empty() {
        return Err(CodecError::InsufficientSymbols);
    }
    let mut chars = cipher.chars();
    let pad = chars
        .next()
        .and_then(|c| c.to_digit(10))
        .filter(|&d| (d as usize) < GROUP)
        .ok_or_else(|| corrupt("missing or invalid pad digit"))? as usize;

    let mut writer = BitWriter::endian(Vec::new(), BigEndian);
    let mut groups = 0usize;
    for ch in chars {
        let value = alphabet::index_of(ch)
            .ok_or_else(|| corrupt(format!("{ch:?} is not an alphabet symbol")))?;
        writer.write(BITS_PER_SYMBOL, value)?;
        groups += 1;
    }
    writer.byte_align()?;
    let bytes = writer.into_writer();

    let total_bits = groups * GROUP;
    if pad > total_bits {
        return Err(corrupt(format!("pad of {pad} bits exceeds {total_bits} payload bits")));
    }

    let mut reader = BitReader::endian(bytes.as_slice(), BigEndian);
    let mut units = Vec::new();
    let mut current = BitCode::default();
    for _ in 0..total_bits - pad {
        current.push(reader.read_bit()?);
        if current.len() > table.max_code_len() {
            return Err(corrupt("bit sequence matches no code"));
        }
        if let Some(unit) = table.unit_for(&current) {
            units.push(unit);
            current.clear();
        }
    }

    if !current.is_empty() {
        return Err(corrupt(format!("{} trailing bits match no code", current.len())));
    }
    for _ in 0..pad {
        if reader.read_bit()? {
            return Err(corrupt("padding bits are not zero"));
        }
    }

    debug!(groups, units = units.len(), "unpacked cipher");
    Ok(units)
}

fn corrupt(reason: impl Into<String>) -> CodecError {
    let reason = reason.into();
    warn!(%reason, "cipher rejected");
    CodecError::CorruptCipher(reason)
}
