//! Member descriptors and lookup identities

use std::fmt;

use crate::policy::Visibility;
use crate::ty::TypeId;

/// Kind of member a query or enumeration targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Instance field
    Field,
    /// Method
    Method,
    /// Constructor
    Constructor,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Field => write!(f, "field"),
            MemberKind::Method => write!(f, "method"),
            MemberKind::Constructor => write!(f, "constructor"),
        }
    }
}

/// Host-side flags on a declared member
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Externally accessible
    pub is_public: bool,
    /// Storage rejects writes through the access pathway
    pub is_readonly: bool,
}

impl Modifiers {
    /// Public, writable member flags
    pub fn public() -> Self {
        Modifiers {
            is_public: true,
            is_readonly: false,
        }
    }

    /// Mark the member readonly
    pub fn as_readonly(mut self) -> Self {
        self.is_readonly = true;
        self
    }
}

/// Field descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMember {
    /// Field name
    pub name: String,
    /// Declaring type
    pub owner: TypeId,
    /// Type of the stored value
    pub value_type: TypeId,
    /// Index into the owning instance's slot storage
    pub slot: usize,
    /// Host-side flags
    pub modifiers: Modifiers,
    /// View under which this descriptor was produced
    pub visibility: Visibility,
}

/// Method descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodMember {
    /// Method name
    pub name: String,
    /// Declaring type
    pub owner: TypeId,
    /// Exact parameter-type sequence
    pub params: Vec<TypeId>,
    /// Host-side flags
    pub modifiers: Modifiers,
    /// View under which this descriptor was produced
    pub visibility: Visibility,
}

/// Constructor descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorMember {
    /// Declaring type
    pub owner: TypeId,
    /// Exact parameter-type sequence
    pub params: Vec<TypeId>,
    /// Host-side flags
    pub modifiers: Modifiers,
    /// View under which this descriptor was produced
    pub visibility: Visibility,
}

/// Member descriptor: a field, method, or constructor declared by a type.
///
/// The `visibility` attribute on each variant records the view of the query
/// that produced the descriptor, not an intrinsic property of the member:
/// the same member surfaces under either view. Hosts construct descriptors
/// with [`Visibility::Declared`]; the engine restamps them per query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    /// Field member
    Field(FieldMember),
    /// Method member
    Method(MethodMember),
    /// Constructor member
    Constructor(ConstructorMember),
}

impl Member {
    /// Kind of this member
    pub fn kind(&self) -> MemberKind {
        match self {
            Member::Field(_) => MemberKind::Field,
            Member::Method(_) => MemberKind::Method,
            Member::Constructor(_) => MemberKind::Constructor,
        }
    }

    /// Member name; empty for constructors
    pub fn name(&self) -> &str {
        match self {
            Member::Field(field) => &field.name,
            Member::Method(method) => &method.name,
            Member::Constructor(_) => "",
        }
    }

    /// Declaring type
    pub fn owner(&self) -> TypeId {
        match self {
            Member::Field(field) => field.owner,
            Member::Method(method) => method.owner,
            Member::Constructor(ctor) => ctor.owner,
        }
    }

    /// Host-side flags
    pub fn modifiers(&self) -> Modifiers {
        match self {
            Member::Field(field) => field.modifiers,
            Member::Method(method) => method.modifiers,
            Member::Constructor(ctor) => ctor.modifiers,
        }
    }

    /// View under which this descriptor was produced
    pub fn visibility(&self) -> Visibility {
        match self {
            Member::Field(field) => field.visibility,
            Member::Method(method) => method.visibility,
            Member::Constructor(ctor) => ctor.visibility,
        }
    }

    /// Parameter signature for methods and constructors, `None` for fields
    pub fn params(&self) -> Option<&[TypeId]> {
        match self {
            Member::Field(_) => None,
            Member::Method(method) => Some(&method.params),
            Member::Constructor(ctor) => Some(&ctor.params),
        }
    }

    /// Get the field descriptor if this is a field
    pub fn as_field(&self) -> Option<&FieldMember> {
        match self {
            Member::Field(field) => Some(field),
            _ => None,
        }
    }

    /// Get the method descriptor if this is a method
    pub fn as_method(&self) -> Option<&MethodMember> {
        match self {
            Member::Method(method) => Some(method),
            _ => None,
        }
    }

    /// Get the constructor descriptor if this is a constructor
    pub fn as_constructor(&self) -> Option<&ConstructorMember> {
        match self {
            Member::Constructor(ctor) => Some(ctor),
            _ => None,
        }
    }

    /// Same descriptor restamped with the view that produced it
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        match &mut self {
            Member::Field(field) => field.visibility = visibility,
            Member::Method(method) => method.visibility = visibility,
            Member::Constructor(ctor) => ctor.visibility = visibility,
        }
        self
    }
}

/// A matched descriptor plus the chain level the match occurred at.
///
/// `found_at` matters because a name may exist at several levels; resolution
/// returns the first match per policy, not all matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMember {
    /// The matched descriptor
    pub member: Member,
    /// Chain level at which the match occurred
    pub found_at: TypeId,
}

/// Lookup identity for first-match resolution.
///
/// Fields are identified by name alone; methods and constructors by exact
/// parameter-type sequence (and name, for methods). No overload-distance
/// scoring and no widening; a match is exact or absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberQuery<'a> {
    /// Field by name
    Field {
        /// Field name
        name: &'a str,
    },
    /// Method by name and exact parameter signature
    Method {
        /// Method name
        name: &'a str,
        /// Exact parameter types
        params: &'a [TypeId],
    },
    /// Constructor by exact parameter signature
    Constructor {
        /// Exact parameter types
        params: &'a [TypeId],
    },
}

impl MemberQuery<'_> {
    /// Member kind this query targets
    pub fn kind(&self) -> MemberKind {
        match self {
            MemberQuery::Field { .. } => MemberKind::Field,
            MemberQuery::Method { .. } => MemberKind::Method,
            MemberQuery::Constructor { .. } => MemberKind::Constructor,
        }
    }

    /// Whether `member` has this query's identity
    pub fn matches(&self, member: &Member) -> bool {
        match (self, member) {
            (MemberQuery::Field { name }, Member::Field(field)) => field.name == *name,
            (MemberQuery::Method { name, params }, Member::Method(method)) => {
                method.name == *name && method.params == *params
            }
            (MemberQuery::Constructor { params }, Member::Constructor(ctor)) => {
                ctor.params == *params
            }
            _ => false,
        }
    }

    /// Identity of this query for diagnostics
    pub fn ident(&self) -> String {
        match self {
            MemberQuery::Field { name } => (*name).to_string(),
            MemberQuery::Method { name, params } => format_signature(name, params),
            MemberQuery::Constructor { params } => format_signature("constructor", params),
        }
    }
}

fn format_signature(name: &str, params: &[TypeId]) -> String {
    let mut out = String::from(name);
    out.push('(');
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&param.to_string());
    }
    out.push(')');
    out
}
