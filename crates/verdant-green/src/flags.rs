use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Per-node bit set.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct NodeFlags(u8);

impl NodeFlags {
    pub const EMPTY: Self = Self(0);
    /// The node or one of its descendants carries a diagnostic.
    pub const HAS_DIAGNOSTIC: Self = Self(1 << 0);
    /// The node is a synthesized placeholder for absent, required input.
    pub const IS_MISSING: Self = Self(1 << 1);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub(crate) const fn with(self, flag: Self, enabled: bool) -> Self {
        if enabled { self.union(flag) } else { self.difference(flag) }
    }
}

impl BitOr for NodeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for NodeFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Debug for NodeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        if self.contains(Self::HAS_DIAGNOSTIC) {
            set.entry(&format_args!("HAS_DIAGNOSTIC"));
        }
        if self.contains(Self::IS_MISSING) {
            set.entry(&format_args!("IS_MISSING"));
        }
        set.finish()
    }
}

impl fmt::LowerHex for NodeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
