use serde::Serialize;
use crate::geometry::CacheGeometry;

/// An address split into its three fields
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct DecodedAddress {
    pub tag: u64,
    pub index: u64,
    pub offset: u64,
}

/// Splits addresses into tag, index, and offset for a fixed geometry
///
/// The masks and shifts are computed once up front, decoding is then a handful of bit operations.
/// A field with zero width gets a zero mask, so it always decodes to 0. Bits above the configured
/// address width are not checked and end up in the tag.
#[derive(Debug, Copy, Clone)]
pub struct AddressDecoder {
    offset_mask: u64,
    index_mask: u64,
    index_shift: u32,
    tag_shift: u32,
}

impl AddressDecoder {
    pub fn new(geometry: &CacheGeometry) -> Self {
        Self {
            offset_mask: low_bits_mask(geometry.offset_bits),
            index_mask: low_bits_mask(geometry.index_bits),
            index_shift: geometry.offset_bits,
            tag_shift: geometry.offset_bits + geometry.index_bits,
        }
    }

    /// Decodes an address
    ///
    /// # Examples
    ///
    /// ```
    /// use nrucache::address::AddressDecoder;
    /// use nrucache::config::CacheConfig;
    /// use nrucache::geometry::{CacheGeometry, GeometryMode};
    /// let config = CacheConfig { address_bits: 8, block_size: 4, cache_sets: 8, associativity: 1 };
    /// let decoder = AddressDecoder::new(&CacheGeometry::resolve(&config, GeometryMode::Strict).unwrap());
    /// let decoded = decoder.decode(0b101_011_10);
    /// assert_eq!((decoded.tag, decoded.index, decoded.offset), (0b101, 0b011, 0b10));
    /// ```
    pub fn decode(&self, address: u64) -> DecodedAddress {
        DecodedAddress {
            tag: shift_right(address, self.tag_shift),
            index: shift_right(address, self.index_shift) & self.index_mask,
            offset: address & self.offset_mask,
        }
    }
}

fn low_bits_mask(bits: u32) -> u64 {
    1u64.checked_shl(bits).map_or(u64::MAX, |bit| bit - 1)
}

// A 64 bit shift shifts everything out
fn shift_right(value: u64, bits: u32) -> u64 {
    value.checked_shr(bits).unwrap_or(0)
}
