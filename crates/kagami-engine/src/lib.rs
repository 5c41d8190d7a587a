//! Kagami Member-Resolution Engine
//!
//! Resolves fields, methods, and constructors across single-inheritance
//! type hierarchies, and reads/writes field values on instances:
//! - **TypeGraph**: ancestor-chain traversal over a host model (`graph`)
//! - **MemberIndex**: ordered member enumeration under a policy (`index`)
//! - **MemberResolver**: first-match name/signature lookup (`resolver`)
//! - **InstanceAccessor**: dynamic field reads and writes (`access`)
//!
//! The engine consumes the capability traits of `kagami-types` and ships
//! with `TypeRegistry` (`registry`), an in-memory host model that doubles
//! as the test fixture.
//!
//! # Example
//!
//! ```rust,ignore
//! use kagami_engine::{ClassSpec, MemberResolver, TypeRegistry};
//! use kagami_engine::TraversalPolicy;
//!
//! let mut registry = TypeRegistry::new();
//! let animal = registry
//!     .define_class(ClassSpec::new("Animal").field("age", registry.int_type()))
//!     .unwrap();
//! let dog = registry
//!     .define_class(ClassSpec::new("Dog").extends(animal))
//!     .unwrap();
//!
//! let resolver = MemberResolver::new(&registry);
//! let found = resolver.resolve_field(dog, "age", TraversalPolicy::default()).unwrap();
//! assert_eq!(found.found_at, animal);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod access;
pub mod cache;
pub mod graph;
pub mod index;
pub mod registry;
pub mod resolver;

// Re-export the shared data model (canonical definitions live in kagami-types)
pub use kagami_types::{
    AccessError, AncestorDepth, ConstructorMember, FieldMember, Instance, ListValue, Member,
    MemberKind, MemberQuery, MethodMember, Modifiers, ResolveError, ResolvedMember,
    TraversalOrder, TraversalPolicy, TypeGraphError, TypeId, TypeModel, Value, ValueModel,
    Visibility,
};

pub use access::InstanceAccessor;
pub use cache::ResolutionCache;
pub use graph::{SupertypeWalk, TypeGraph};
pub use index::MemberIndex;
pub use registry::{ClassSpec, RegistryError, TypeRegistry};
pub use resolver::MemberResolver;
