//! Type handles

use std::fmt;

/// Opaque, identity-stable handle to a type known to a host model.
///
/// Two lookups of the same type within one process yield equal ids. The
/// numeric value carries no meaning outside the host model that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(u32);

impl TypeId {
    /// Create a type id from a raw index issued by a host model
    pub const fn new(raw: u32) -> Self {
        TypeId(raw)
    }

    /// Raw index backing this id
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}
