use std::fmt::{Display, Formatter};
use std::ops::Neg;

use crate::utils::MyHash;

/// Handle to a node in the [`Bdd`][crate::bdd::Bdd] manager.
///
/// The absolute value is the node index, the sign is a complement edge:
/// `-f` is the negation of `f` and costs nothing to build.
/// Index `1` is the single terminal, so `Ref::ONE` is `true` and `Ref::ZERO` is `false`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Ref(i32);

impl Ref {
    pub const ONE: Ref = Ref(1);
    pub const ZERO: Ref = Ref(-1);

    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn positive(index: u32) -> Self {
        Self(index as i32)
    }

    pub const fn is_negated(&self) -> bool {
        self.0 < 0
    }

    pub const fn negate(self) -> Self {
        Self(-self.0)
    }

    /// Return the internal representation of the reference.
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Return the index of the referenced node.
    pub const fn index(self) -> u32 {
        self.0.unsigned_abs()
    }

    pub(crate) fn as_lit(self) -> u32 {
        signed_to_lit(self.0)
    }
}

impl Neg for Ref {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Display for Ref {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", if self.is_negated() { "~" } else { "" }, self.index())
    }
}

impl MyHash for Ref {
    fn hash(&self) -> u64 {
        self.as_lit() as u64
    }
}

pub(crate) fn signed_to_lit(value: i32) -> u32 {
    (value.unsigned_abs() << 1) + (value < 0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminals() {
        assert_eq!(-Ref::ONE, Ref::ZERO);
        assert_eq!(Ref::ONE.index(), Ref::ZERO.index());
        assert!(Ref::ZERO.is_negated());
        assert!(!Ref::ONE.is_negated());
    }

    #[test]
    fn test_display() {
        assert_eq!(Ref::new(5).to_string(), "@5");
        assert_eq!(Ref::new(-5).to_string(), "~@5");
    }

    #[test]
    fn test_lit_encoding() {
        assert_eq!(signed_to_lit(3), 6);
        assert_eq!(signed_to_lit(-3), 7);
        assert_ne!(MyHash::hash(&Ref::ONE), MyHash::hash(&Ref::ZERO));
    }
}
