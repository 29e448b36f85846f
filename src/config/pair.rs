//! Parameters shared by every pool a registry creates.

use crate::domain::{FeeRate, Shares};
use crate::error::AmmError;

/// Shares permanently locked on a pool's first deposit.
pub const MINIMUM_LIQUIDITY: Shares = Shares::new(1_000);

/// Default protocol fee divisor: the protocol takes one sixth of fee growth.
pub const PROTOCOL_FEE_DIVISOR: u32 = 6;

/// Configuration of the pair template (`x · y ≥ k` with a swap fee).
///
/// A registry stamps every pool it creates from one `PairConfig`; the
/// config is part of the registry's template fingerprint, so changing it
/// changes every derived pool address.
///
/// # Validation
///
/// - The swap fee is validated at [`FeeRate`] construction time.
/// - `minimum_liquidity` must be non-zero.
/// - `protocol_fee_divisor` must be non-zero.
///
/// # Examples
///
/// ```
/// use pairswap::config::PairConfig;
/// use pairswap::domain::{FeeRate, Shares};
///
/// let cfg = PairConfig::default();
/// assert_eq!(cfg.swap_fee(), FeeRate::REFERENCE);
/// assert_eq!(cfg.minimum_liquidity(), Shares::new(1_000));
/// assert_eq!(cfg.protocol_fee_divisor(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PairConfig {
    swap_fee: FeeRate,
    minimum_liquidity: Shares,
    protocol_fee_divisor: u32,
}

impl PairConfig {
    /// Length of [`encode`](Self::encode) output.
    pub const ENCODED_LEN: usize = 28;

    /// Creates a new `PairConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `minimum_liquidity` or
    /// `protocol_fee_divisor` is zero.
    pub fn new(
        swap_fee: FeeRate,
        minimum_liquidity: Shares,
        protocol_fee_divisor: u32,
    ) -> Result<Self, AmmError> {
        let config = Self {
            swap_fee,
            minimum_liquidity,
            protocol_fee_divisor,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// [`new`](Self::new) and deserialisation both run this.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] naming the offending field.
    pub fn validate(&self) -> Result<(), AmmError> {
        FeeRate::new(self.swap_fee.numerator(), self.swap_fee.denominator())?;
        if self.minimum_liquidity.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "minimum liquidity must be non-zero",
            ));
        }
        if self.protocol_fee_divisor == 0 {
            return Err(AmmError::InvalidConfiguration(
                "protocol fee divisor must be non-zero",
            ));
        }
        Ok(())
    }

    /// Returns the swap fee.
    #[must_use]
    pub const fn swap_fee(&self) -> FeeRate {
        self.swap_fee
    }

    /// Returns the number of shares locked on the first deposit.
    #[must_use]
    pub const fn minimum_liquidity(&self) -> Shares {
        self.minimum_liquidity
    }

    /// Returns `d`, where the protocol receives `1/d` of fee growth.
    #[must_use]
    pub const fn protocol_fee_divisor(&self) -> u32 {
        self.protocol_fee_divisor
    }

    /// Big-endian encoding fed into the template fingerprint.
    #[must_use]
    pub fn encode(&self) -> [u8; Self::ENCODED_LEN] {
        let mut out = [0u8; Self::ENCODED_LEN];
        out[0..4].copy_from_slice(&self.swap_fee.numerator().to_be_bytes());
        out[4..8].copy_from_slice(&self.swap_fee.denominator().to_be_bytes());
        out[8..24].copy_from_slice(&self.minimum_liquidity.get().to_be_bytes());
        out[24..28].copy_from_slice(&self.protocol_fee_divisor.to_be_bytes());
        out
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PairConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            swap_fee: FeeRate,
            minimum_liquidity: Shares,
            protocol_fee_divisor: u32,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.swap_fee, raw.minimum_liquidity, raw.protocol_fee_divisor)
            .map_err(serde::de::Error::custom)
    }
}

impl Default for PairConfig {
    fn default() -> Self {
        Self {
            swap_fee: FeeRate::REFERENCE,
            minimum_liquidity: MINIMUM_LIQUIDITY,
            protocol_fee_divisor: PROTOCOL_FEE_DIVISOR,
        }
    }
}
