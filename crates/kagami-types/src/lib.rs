//! Kagami Type Model
//!
//! Shared data model for the Kagami member-resolution engine: type handles,
//! member descriptors, traversal policies, value containers, and the
//! host-model capability traits the engine consumes.
//!
//! This crate carries no resolution logic. The engine lives in
//! `kagami-engine`; host runtimes implement the traits in [`host`] to plug
//! their own type system in.

#![warn(missing_docs)]

pub mod error;
pub mod host;
pub mod member;
pub mod policy;
pub mod ty;
pub mod value;

pub use error::{AccessError, ResolveError, TypeGraphError};
pub use host::{TypeModel, ValueModel};
pub use member::{
    ConstructorMember, FieldMember, Member, MemberKind, MemberQuery, MethodMember, Modifiers,
    ResolvedMember,
};
pub use policy::{AncestorDepth, TraversalOrder, TraversalPolicy, Visibility};
pub use ty::TypeId;
pub use value::{Instance, ListValue, Value};
