//! Explicit rounding direction for integer division.

/// Direction of an integer division.
///
/// Every division in the engine and the router names its direction.
/// Amounts a pool pays out round [`Down`](Self::Down); amounts a caller
/// must pay in round [`Up`](Self::Up).  Either way the pool never loses
/// value to rounding.
///
/// # Examples
///
/// ```
/// use pairswap::domain::Rounding;
///
/// assert_eq!(Rounding::Down.divide(7, 2), Some(3));
/// assert_eq!(Rounding::Up.divide(7, 2), Some(4));
/// assert_eq!(Rounding::Up.divide(7, 0), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }

    /// Divides `n` by `d` in this direction.  `None` when `d == 0`.
    #[must_use]
    pub const fn divide(&self, n: u128, d: u128) -> Option<u128> {
        if d == 0 {
            return None;
        }
        let q = n / d;
        match self {
            Self::Down => Some(q),
            // q < u128::MAX whenever n % d != 0
            Self::Up if n % d != 0 => Some(q + 1),
            Self::Up => Some(q),
        }
    }
}
