//! Registry construction parameters.

use super::PairConfig;
use crate::domain::Address;
use crate::error::AmmError;

/// Configuration for a [`PairRegistry`](crate::factory::PairRegistry).
///
/// The fee recipient always starts disabled; only the setter named here
/// can enable it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RegistryConfig {
    address: Address,
    fee_to_setter: Address,
    pair: PairConfig,
}

impl RegistryConfig {
    /// Creates a new `RegistryConfig`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAddress`] if `address` is null.
    /// - Whatever [`PairConfig::validate`] reports.
    pub fn new(address: Address, fee_to_setter: Address, pair: PairConfig) -> Result<Self, AmmError> {
        let config = Self {
            address,
            fee_to_setter,
            pair,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.address.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        self.pair.validate()
    }

    /// Returns the registry's own identity.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the initial fee-recipient setter.
    #[must_use]
    pub const fn fee_to_setter(&self) -> Address {
        self.fee_to_setter
    }

    /// Returns the pair template configuration.
    #[must_use]
    pub const fn pair(&self) -> &PairConfig {
        &self.pair
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RegistryConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            address: Address,
            fee_to_setter: Address,
            pair: PairConfig,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.address, raw.fee_to_setter, raw.pair).map_err(serde::de::Error::custom)
    }
}
