//! Field length norms
//!
//! Norms are stored as a single byte per document per field using a small
//! floating point format with a 3 bit mantissa and a zero point at exponent
//! 15. This keeps roughly one significant decimal digit, which is plenty for
//! a length normalisation factor.

use std::sync::OnceLock;


/// Number of mantissa bits kept by the encoded form
const MANTISSA_BITS: i32 = 3;

/// Encoded values at or below this point round to zero (or the smallest value)
const ZERO_POINT: i32 = (63 - 15) << MANTISSA_BITS;


/// Encodes a float into a byte, rounding down. Negative values and zero
/// encode to 0, other values too small to represent encode to 1.
pub fn float_to_byte315(f: f32) -> u8 {
    let bits = f.to_bits() as i32;
    let smallfloat = bits >> (24 - MANTISSA_BITS);

    if smallfloat <= ZERO_POINT {
        return if bits <= 0 { 0 } else { 1 };
    }

    if smallfloat >= ZERO_POINT + 0x100 {
        return 0xff;
    }

    (smallfloat - ZERO_POINT) as u8
}


pub fn byte315_to_float(b: u8) -> f32 {
    if b == 0 {
        return 0.0;
    }

    let mut bits = (b as u32) << (24 - MANTISSA_BITS);
    bits += ((63 - 15) as u32) << 24;
    f32::from_bits(bits)
}


/// Every decoded norm, indexed by its encoded byte
pub struct NormTable([f32; 256]);


impl NormTable {
    pub fn new() -> NormTable {
        let mut table = [0.0f32; 256];

        for (i, slot) in table.iter_mut().enumerate() {
            *slot = byte315_to_float(i as u8);
        }

        NormTable(table)
    }

    #[inline]
    pub fn decode(&self, norm: u8) -> f32 {
        self.0[norm as usize]
    }
}


impl Default for NormTable {
    fn default() -> NormTable {
        NormTable::new()
    }
}


#[inline]
pub fn encode_norm(value: f32) -> u8 {
    float_to_byte315(value)
}


#[inline]
pub fn decode_norm(norm: u8) -> f32 {
    static TABLE: OnceLock<NormTable> = OnceLock::new();
    TABLE.get_or_init(NormTable::new).decode(norm)
}


/// Raw per-document norms for a single field
///
/// Documents that have no norm recorded read as 0.
pub trait FieldNorms: Sync {
    fn norm(&self, doc_id: u64) -> u8;
}


impl FieldNorms for [u8] {
    fn norm(&self, doc_id: u64) -> u8 {
        self.get(doc_id as usize).cloned().unwrap_or(0)
    }
}


impl FieldNorms for Vec<u8> {
    fn norm(&self, doc_id: u64) -> u8 {
        self.as_slice().norm(doc_id)
    }
}


#[cfg(test)]
mod tests {
    use super::{float_to_byte315, byte315_to_float, encode_norm, decode_norm, NormTable, FieldNorms};

    #[test]
    fn test_one_round_trips() {
        assert_eq!(float_to_byte315(1.0), 124);
        assert_eq!(byte315_to_float(124), 1.0);
    }

    #[test]
    fn test_powers_of_two_are_exact() {
        for value in [0.5f32, 0.25, 2.0, 4.0].iter() {
            assert_eq!(decode_norm(encode_norm(*value)), *value);
        }
    }

    #[test]
    fn test_encoding_rounds_down() {
        // 1/sqrt(3) sits between two representable values
        let value = 1.0 / 3.0f32.sqrt();
        let decoded = decode_norm(encode_norm(value));

        assert!(decoded <= value);
        assert_eq!(decoded, 0.5);
    }

    #[test]
    fn test_zero_and_negative() {
        assert_eq!(float_to_byte315(0.0), 0);
        assert_eq!(float_to_byte315(-3.0), 0);
        assert_eq!(byte315_to_float(0), 0.0);
    }

    #[test]
    fn test_tiny_values_encode_to_smallest() {
        assert_eq!(float_to_byte315(1.0e-20), 1);
    }

    #[test]
    fn test_huge_values_saturate() {
        assert_eq!(float_to_byte315(1.0e20), 0xff);
    }

    #[test]
    fn test_decoding_is_monotonic() {
        for b in 1..255u8 {
            assert!(byte315_to_float(b) < byte315_to_float(b + 1));
        }
    }

    #[test]
    fn test_norm_table_matches_decode() {
        let table = NormTable::new();

        for b in 0..=255u8 {
            assert_eq!(table.decode(b), byte315_to_float(b));
        }
    }

    #[test]
    fn test_vec_field_norms() {
        let norms: Vec<u8> = vec![124, 120];

        assert_eq!(norms.norm(1), 120);
        assert_eq!(norms.norm(2), 0);
    }
}
