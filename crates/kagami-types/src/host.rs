//! Host-model capability traits
//!
//! Defines the interface a host runtime implements for the engine. Engine
//! components program against these traits without depending on a concrete
//! type system or object layout.

use crate::member::{Member, MemberKind};
use crate::ty::TypeId;
use crate::value::Value;

/// Type-introspection capability consumed by the engine.
///
/// The engine never validates the model up front; a malformed supertype
/// relation surfaces as a traversal error when a walk runs into it.
pub trait TypeModel {
    /// Direct supertype of `ty`, or `None` for root types
    fn direct_supertype(&self, ty: TypeId) -> Option<TypeId>;

    /// Members `ty` itself declares, in declaration order.
    ///
    /// The order is part of the contract: enumeration and resolution
    /// preserve it within each chain level. The host guarantees no two
    /// declared members of one type share a lookup identity.
    fn declared_members(&self, ty: TypeId, kind: MemberKind) -> Vec<Member>;

    /// Whether the host marks `member` externally accessible
    fn is_publicly_visible(&self, member: &Member) -> bool;

    /// Element type for array types, `None` otherwise
    fn element_type(&self, ty: TypeId) -> Option<TypeId>;

    /// Human-readable name for diagnostics, if the host tracks one
    fn type_name(&self, _ty: TypeId) -> Option<String> {
        None
    }
}

/// Value-container capability consumed by instance access.
pub trait ValueModel {
    /// Runtime type of a value
    fn type_of(&self, value: &Value) -> TypeId;

    /// Whether a value of type `source` can be stored where `target` is
    /// expected
    fn is_assignable(&self, target: TypeId, source: TypeId) -> bool;
}
