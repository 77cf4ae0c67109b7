use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::config::CacheConfig;
use crate::error::ConfigError;

/// How block sizes and set counts which aren't powers of two are handled
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum GeometryMode {
    /// Reject them with [`ConfigError::NonPowerOfTwo`]
    #[default]
    #[serde(alias = "strict")]
    Strict,
    /// Round the bit widths down with floor(log2), as the legacy simulator did. The resulting
    /// geometry only addresses the largest power of two below each dimension
    #[serde(alias = "truncating")]
    Truncating,
}

/// The bit-level layout of an address for a particular cache
///
/// An address splits, from most to least significant, into `tag_bits`, `index_bits`, and
/// `offset_bits`. The three always add up to `address_bits`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct CacheGeometry {
    pub address_bits: u32,
    pub block_size: u64,
    pub set_count: usize,
    pub associativity: usize,
    pub offset_bits: u32,
    pub index_bits: u32,
    pub tag_bits: u32,
}

impl CacheGeometry {
    /// Resolves the bit widths for a configuration
    ///
    /// # Arguments
    ///
    /// * `config`: The parsed configuration values
    /// * `mode`: Whether non-power-of-two dimensions are rejected or truncated
    ///
    /// returns: Result<CacheGeometry, ConfigError>
    ///
    /// # Examples
    ///
    /// ```
    /// use nrucache::config::CacheConfig;
    /// use nrucache::geometry::{CacheGeometry, GeometryMode};
    /// let config = CacheConfig { address_bits: 8, block_size: 2, cache_sets: 4, associativity: 2 };
    /// let geometry = CacheGeometry::resolve(&config, GeometryMode::Strict).unwrap();
    /// assert_eq!((geometry.offset_bits, geometry.index_bits, geometry.tag_bits), (1, 2, 5));
    /// ```
    pub fn resolve(config: &CacheConfig, mode: GeometryMode) -> Result<Self, ConfigError> {
        let address_bits = u32::try_from(config.address_bits)
            .ok()
            .filter(|bits| *bits <= u64::BITS)
            .ok_or(ConfigError::AddressTooWide(config.address_bits))?;
        let offset_bits = dimension_bits("block size", config.block_size, mode)?;
        let index_bits = dimension_bits("number of sets", config.cache_sets, mode)?;
        if config.associativity == 0 {
            return Err(ConfigError::ZeroDimension { name: "associativity" });
        }
        let set_count = fits_in_memory("number of sets", config.cache_sets)?;
        let associativity = fits_in_memory("associativity", config.associativity)?;
        let tag_bits = address_bits
            .checked_sub(offset_bits + index_bits)
            .ok_or(ConfigError::AddressTooNarrow {
                address_bits,
                required: offset_bits + index_bits,
            })?;
        let geometry = Self {
            address_bits,
            block_size: config.block_size,
            set_count,
            associativity,
            offset_bits,
            index_bits,
            tag_bits,
        };
        debug!(?geometry, ?mode, "resolved cache geometry");
        Ok(geometry)
    }

    /// Bit positions of the index field, counted from the most significant bit of the address.
    ///
    /// Element `i` is the position of the `i`th index bit counted from the least significant end of
    /// the index field, so positions are in descending order
    pub fn index_bit_positions(&self) -> Vec<u32> {
        (0..self.index_bits)
            .map(|i| self.address_bits - 1 - (self.offset_bits + i))
            .collect()
    }
}

fn dimension_bits(name: &'static str, value: u64, mode: GeometryMode) -> Result<u32, ConfigError> {
    if value == 0 {
        return Err(ConfigError::ZeroDimension { name });
    }
    if mode == GeometryMode::Strict && !value.is_power_of_two() {
        return Err(ConfigError::NonPowerOfTwo { name, value });
    }
    Ok(value.ilog2())
}

fn fits_in_memory(name: &'static str, value: u64) -> Result<usize, ConfigError> {
    usize::try_from(value).map_err(|_| ConfigError::TooLarge { name, value })
}
