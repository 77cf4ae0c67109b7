use std::fs;
use std::path::Path;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::ConfigError;

/// The four values describing a cache, in the order they appear in a configuration file
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    pub address_bits: u64,
    pub block_size: u64,
    pub cache_sets: u64,
    pub associativity: u64,
}

impl CacheConfig {
    /// Loads a configuration from a file. Files with a `.json` extension are read as JSON, anything
    /// else is read as `header value` pairs
    ///
    /// # Arguments
    ///
    /// * `path`: Path to the configuration file
    ///
    /// returns: Result<CacheConfig, ConfigError>
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(serde_json::from_str(&contents)?),
            _ => contents.parse(),
        }
    }
}

/// Parses the text format, a sequence of whitespace separated `header value` pairs such as
///
/// ```text
/// Address_bits: 8
/// Block_size: 4
/// Cache_sets: 8
/// Associativity: 1
/// ```
///
/// Headers are not interpreted, only their position matters. Reading stops at the first value
/// which isn't a non-negative integer, and exactly four values must have been read by then.
///
/// # Examples
///
/// ```
/// use nrucache::config::CacheConfig;
/// let config: CacheConfig = "Address_bits: 8 Block_size: 4 Cache_sets: 8 Associativity: 1".parse().unwrap();
/// assert_eq!(config.cache_sets, 8);
/// ```
impl FromStr for CacheConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let mut values = Vec::with_capacity(4);
        while let (Some(_header), Some(value)) = (tokens.next(), tokens.next()) {
            match value.parse::<u64>() {
                Ok(v) => values.push(v),
                Err(_) => break,
            }
        }
        match values[..] {
            [address_bits, block_size, cache_sets, associativity] => Ok(Self {
                address_bits,
                block_size,
                cache_sets,
                associativity,
            }),
            _ => Err(ConfigError::WrongValueCount { found: values.len() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_value_pairs() {
        let config: CacheConfig = "Address_bits: 8\nBlock_size: 4\nCache_sets: 8\nAssociativity: 1\n".parse().unwrap();
        assert_eq!(config, CacheConfig { address_bits: 8, block_size: 4, cache_sets: 8, associativity: 1 });
    }

    #[test]
    fn headers_are_positional() {
        let config: CacheConfig = "a 16 b 2 c 4 d 2".parse().unwrap();
        assert_eq!(config, CacheConfig { address_bits: 16, block_size: 2, cache_sets: 4, associativity: 2 });
    }

    #[test]
    fn too_few_values() {
        let err = "Address_bits: 8\nBlock_size: 4\nCache_sets: 8\n".parse::<CacheConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::WrongValueCount { found: 3 }));
    }

    #[test]
    fn too_many_values() {
        let err = "a 1 b 2 c 4 d 1 e 9".parse::<CacheConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::WrongValueCount { found: 5 }));
    }

    #[test]
    fn stops_at_first_non_numeric_value() {
        let err = "a 8 b 4 c eight d 1".parse::<CacheConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::WrongValueCount { found: 2 }));
        // A dangling header with no value is ignored
        let config: CacheConfig = "a 8 b 4 c 8 d 1 trailing".parse().unwrap();
        assert_eq!(config.associativity, 1);
    }

    #[test]
    fn negative_values_are_rejected() {
        let err = "a 8 b -4 c 8 d 1".parse::<CacheConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::WrongValueCount { found: 1 }));
    }

    #[test]
    fn json_config() {
        let config: CacheConfig = serde_json::from_str(r#"{"address_bits": 8, "block_size": 2, "cache_sets": 4, "associativity": 2}"#).unwrap();
        assert_eq!(config, CacheConfig { address_bits: 8, block_size: 2, cache_sets: 4, associativity: 2 });
    }

    #[test]
    fn missing_file() {
        let err = CacheConfig::load("does/not/exist.org").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
