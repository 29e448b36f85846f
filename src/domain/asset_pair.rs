//! Canonically ordered pair of distinct assets.

use super::Address;
use crate::error::AmmError;

/// An unordered pair of assets normalised to one fixed order.
///
/// `(A, B)` and `(B, A)` produce the same `AssetPair`, so a pair is a
/// valid lookup key for "the pool of these two assets".  The lower
/// address is always [`first`](Self::first) (`x`), the higher one
/// [`second`](Self::second) (`y`).
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Address, AssetPair};
///
/// let usdc = Address::repeat(1);
/// let weth = Address::repeat(2);
///
/// let pair = AssetPair::new(weth, usdc).expect("distinct, non-null");
/// assert_eq!(pair.first(), usdc);
/// assert_eq!(pair, AssetPair::new(usdc, weth).expect("same pair"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AssetPair {
    x: Address,
    y: Address,
}

impl AssetPair {
    /// Creates a canonically ordered pair.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] if `a == b`.
    /// - [`AmmError::ZeroAddress`] if either identifier is null.
    pub fn new(a: Address, b: Address) -> Result<Self, AmmError> {
        if a == b {
            return Err(AmmError::IdenticalAssets);
        }
        let (x, y) = if a < b { (a, b) } else { (b, a) };
        // x is the smaller one, so only x can be the null address.
        if x.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        Ok(Self { x, y })
    }

    /// Returns the lower asset identifier.
    #[must_use]
    pub const fn first(&self) -> Address {
        self.x
    }

    /// Returns the higher asset identifier.
    #[must_use]
    pub const fn second(&self) -> Address {
        self.y
    }

    /// Returns `true` if `asset` is one of the two assets.
    #[must_use]
    pub fn contains(&self, asset: &Address) -> bool {
        self.x == *asset || self.y == *asset
    }

    /// Returns `true` if `asset` is the first (`x`) side of the pair.
    #[must_use]
    pub fn is_first(&self, asset: &Address) -> bool {
        self.x == *asset
    }

    /// Returns the counterpart of `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPath`] if `asset` is not in the pair.
    pub fn other(&self, asset: &Address) -> Result<Address, AmmError> {
        if *asset == self.x {
            Ok(self.y)
        } else if *asset == self.y {
            Ok(self.x)
        } else {
            Err(AmmError::InvalidPath)
        }
    }
}

/// Re-sorts on the way in, so `{"x": B, "y": A}` reads as `(A, B)`.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for AssetPair {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            x: Address,
            y: Address,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.x, raw.y).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::repeat(b)
    }

    #[test]
    fn sorts_reversed_input() {
        let Ok(pair) = AssetPair::new(addr(2), addr(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.first(), addr(1));
        assert_eq!(pair.second(), addr(2));
        assert!(pair.is_first(&addr(1)));
        assert!(!pair.is_first(&addr(2)));
    }

    #[test]
    fn order_independent_equality() {
        let (Ok(p1), Ok(p2)) = (AssetPair::new(addr(1), addr(2)), AssetPair::new(addr(2), addr(1)))
        else {
            panic!("expected Ok");
        };
        assert_eq!(p1, p2);
    }

    #[test]
    fn rejects_identical() {
        assert_eq!(
            AssetPair::new(addr(3), addr(3)),
            Err(AmmError::IdenticalAssets)
        );
    }

    #[test]
    fn rejects_zero_either_side() {
        assert_eq!(
            AssetPair::new(Address::zero(), addr(3)),
            Err(AmmError::ZeroAddress)
        );
        assert_eq!(
            AssetPair::new(addr(3), Address::zero()),
            Err(AmmError::ZeroAddress)
        );
    }

    #[test]
    fn identical_zero_is_identical() {
        assert_eq!(
            AssetPair::new(Address::zero(), Address::zero()),
            Err(AmmError::IdenticalAssets)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialising_sorts_and_validates() {
        let raw = |x: Address, y: Address| {
            let (Ok(x), Ok(y)) = (serde_json::to_value(x), serde_json::to_value(y)) else {
                panic!("serialise");
            };
            serde_json::json!({ "x": x, "y": y })
        };

        let Ok(pair) = serde_json::from_value::<AssetPair>(raw(addr(2), addr(1))) else {
            panic!("distinct assets read back");
        };
        assert_eq!(pair.first(), addr(1));
        assert_eq!(pair.second(), addr(2));

        assert!(serde_json::from_value::<AssetPair>(raw(addr(4), addr(4))).is_err());
        assert!(serde_json::from_value::<AssetPair>(raw(Address::zero(), addr(4))).is_err());
    }

    #[test]
    fn other_and_contains() {
        let Ok(pair) = AssetPair::new(addr(1), addr(2)) else {
            panic!("expected Ok");
        };
        assert!(pair.contains(&addr(1)));
        assert!(!pair.contains(&addr(9)));
        assert_eq!(pair.other(&addr(1)), Ok(addr(2)));
        assert_eq!(pair.other(&addr(2)), Ok(addr(1)));
        assert_eq!(pair.other(&addr(9)), Err(AmmError::InvalidPath));
    }
}
