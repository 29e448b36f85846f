//! Chain-agnostic identifier for assets, holders, pools, and the registry.

use core::fmt;

/// A 32-byte identifier.
///
/// The same type names assets, account holders, pool handles, the router,
/// and the registry.  The total order is lexicographic over the bytes and
/// defines the canonical order of a pool's two assets.
///
/// The all-zero value is the null identifier: it is never a valid asset,
/// and it is the burn address that permanently holds the minimum
/// liquidity of every initialised pool.
///
/// # Examples
///
/// ```
/// use pairswap::domain::Address;
///
/// let a = Address::from_bytes([1u8; 32]);
/// assert!(!a.is_zero());
/// assert!(Address::zero() < a);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address([u8; 32]);

impl Address {
    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Convenience constructor that repeats one byte 32 times.
    ///
    /// Handy for fixtures: `Address::repeat(1)` is `0x0101…01`.
    #[must_use]
    pub const fn repeat(byte: u8) -> Self {
        Self([byte; 32])
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the all-zero (null) address.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Returns `true` for the null address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl fmt::Display for Address {
    /// Abbreviated hex form: first and last four bytes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for b in &self.0[..4] {
            write!(f, "{b:02x}")?;
        }
        write!(f, "…")?;
        for b in &self.0[28..] {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_null() {
        assert!(Address::zero().is_zero());
        assert!(Address::default().is_zero());
        assert!(!Address::repeat(1).is_zero());
    }

    #[test]
    fn ordering_is_lexicographic() {
        let mut lo = [0u8; 32];
        lo[31] = 9;
        let mut hi = [0u8; 32];
        hi[0] = 1;
        assert!(Address::from_bytes(lo) < Address::from_bytes(hi));
    }

    #[test]
    fn display_abbreviates() {
        let s = Address::repeat(0xab).to_string();
        assert_eq!(s, "0xabababab…abababab");
        assert!(format!("{:?}", Address::zero()).starts_with("Address(0x00000000"));
    }
}
