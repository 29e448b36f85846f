//! Ordered multi-hop swap route.

use core::fmt;

use super::Address;
use crate::error::AmmError;

/// An ordered sequence of at least two assets.
///
/// Hop `i` trades `path[i]` for `path[i + 1]` through the pool of that
/// pair.  Adjacent entries must form a valid pair; that is checked when
/// the hop's pool is resolved, not here.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Address, SwapPath};
///
/// let path = SwapPath::new(vec![Address::repeat(1), Address::repeat(2), Address::repeat(3)])
///     .expect("two or more assets");
/// assert_eq!(path.hops().count(), 2);
/// assert!(SwapPath::new(vec![Address::repeat(1)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Address>")
)]
pub struct SwapPath(Vec<Address>);

impl SwapPath {
    /// Creates a validated path.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPath`] if fewer than two assets are given.
    pub fn new(assets: Vec<Address>) -> Result<Self, AmmError> {
        if assets.len() < 2 {
            return Err(AmmError::InvalidPath);
        }
        Ok(Self(assets))
    }

    /// Number of assets on the path (hops + 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; a path has at least two entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The asset sold on the first hop.
    #[must_use]
    pub fn first(&self) -> Address {
        self.0[0]
    }

    /// The asset received on the last hop.
    #[must_use]
    pub fn last(&self) -> Address {
        self.0[self.0.len() - 1]
    }

    /// Iterates `(input, output)` for each hop, front to back.
    pub fn hops(&self) -> impl DoubleEndedIterator<Item = (Address, Address)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    /// Borrow the raw asset list.
    #[must_use]
    pub fn as_slice(&self) -> &[Address] {
        &self.0
    }
}

impl TryFrom<Vec<Address>> for SwapPath {
    type Error = AmmError;

    fn try_from(assets: Vec<Address>) -> Result<Self, Self::Error> {
        Self::new(assets)
    }
}

impl fmt::Display for SwapPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, a) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{a}")?;
        }
        Ok(())
    }
}
