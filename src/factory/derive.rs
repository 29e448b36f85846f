//! Deterministic pool addresses.
//!
//! A pool's handle is computed, not assigned:
//!
//! ```text
//! salt    = keccak256(x ‖ y)
//! address = keccak256(0xff ‖ registry ‖ salt ‖ fingerprint)
//! ```
//!
//! where `x < y` are the canonically ordered assets and `fingerprint`
//! identifies the pair template.  Anyone who knows the registry and the
//! template can find a pool's handle without a lookup.

use core::fmt;

use sha3::{Digest, Keccak256};

use crate::config::PairConfig;
use crate::domain::{Address, AssetPair};

/// Domain tag hashed into every template fingerprint.
pub const PAIR_TEMPLATE_TAG: &[u8] = b"pairswap/reserve-pair";

/// Version of the pair engine.  Bumped whenever pool behaviour changes.
pub const ENGINE_VERSION: u32 = 1;

const CREATE_PREFIX: u8 = 0xff;

/// Hash identifying the code and parameters pools are created from.
///
/// `keccak256(PAIR_TEMPLATE_TAG ‖ ENGINE_VERSION ‖ PairConfig::encode())`.
/// Changing the engine version or any pair parameter changes the
/// fingerprint, and with it every derived address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateFingerprint([u8; 32]);

impl TemplateFingerprint {
    /// Computes the fingerprint of the current engine with `config`.
    #[must_use]
    pub fn of(config: &PairConfig) -> Self {
        let mut hasher = Keccak256::new();
        hasher.update(PAIR_TEMPLATE_TAG);
        hasher.update(ENGINE_VERSION.to_be_bytes());
        hasher.update(config.encode());
        Self(hasher.finalize().into())
    }

    /// Returns the raw hash.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for TemplateFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TemplateFingerprint({self})")
    }
}

impl fmt::Display for TemplateFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for b in self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// Derives the handle of the pool for `assets` under `registry`.
#[must_use]
pub fn pair_address(
    registry: Address,
    fingerprint: &TemplateFingerprint,
    assets: &AssetPair,
) -> Address {
    let salt: [u8; 32] = Keccak256::new()
        .chain_update(assets.first().as_bytes())
        .chain_update(assets.second().as_bytes())
        .finalize()
        .into();
    let digest: [u8; 32] = Keccak256::new()
        .chain_update([CREATE_PREFIX])
        .chain_update(registry.as_bytes())
        .chain_update(salt)
        .chain_update(fingerprint.as_bytes())
        .finalize()
        .into();
    Address::from_bytes(digest)
}
