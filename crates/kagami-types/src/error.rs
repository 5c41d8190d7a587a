//! Engine error types
//!
//! Every failure path in the engine returns a distinguishable value; no
//! failure collapses into a bare boolean or disappears into a log line.

use thiserror::Error;

use crate::member::MemberKind;
use crate::ty::TypeId;

/// Errors reported while walking a host model's supertype chain
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TypeGraphError {
    /// Cyclic or otherwise invalid supertype chain reported by the host
    /// model. Fatal to the specific traversal, not to the process.
    #[error("Malformed supertype chain at {ty}: {detail}")]
    Malformed {
        /// Type at which the walk failed
        ty: TypeId,
        /// What the walk observed
        detail: String,
    },
}

/// Errors from name/signature member lookup
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResolveError {
    /// No member matched the query anywhere the policy let the walk look.
    /// Expected and recoverable; callers decide whether absence is an error.
    #[error("{kind} `{ident}` not found on {ty}")]
    NotFound {
        /// Kind of member looked up
        kind: MemberKind,
        /// Query identity (name, or signature for constructors)
        ident: String,
        /// Type the lookup started at
        ty: TypeId,
    },

    /// Supertype chain failure during the upward walk
    #[error(transparent)]
    Graph(#[from] TypeGraphError),
}

/// Errors from reading or writing instance fields
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccessError {
    /// Value or instance type incompatible with the descriptor
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// Expected type name
        expected: String,
        /// Actual type name
        got: String,
    },

    /// Field storage refuses mutation through this pathway
    #[error("Write to `{field}` denied")]
    Denied {
        /// Field name
        field: String,
    },

    /// Field storage has no readable cell for the descriptor
    #[error("Field `{field}` is not readable on this instance")]
    Unreadable {
        /// Field name
        field: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TypeGraphError::Malformed {
            ty: TypeId::new(2),
            detail: "TypeId(2) -> TypeId(3) -> TypeId(2)".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed supertype chain at TypeId(2): TypeId(2) -> TypeId(3) -> TypeId(2)"
        );

        let err = ResolveError::NotFound {
            kind: MemberKind::Field,
            ident: "age".to_string(),
            ty: TypeId::new(1),
        };
        assert_eq!(err.to_string(), "field `age` not found on TypeId(1)");

        let err = AccessError::TypeMismatch {
            expected: "int".to_string(),
            got: "str".to_string(),
        };
        assert_eq!(err.to_string(), "Type mismatch: expected int, got str");
    }

    #[test]
    fn test_graph_error_converts_to_resolve_error() {
        let graph_err = TypeGraphError::Malformed {
            ty: TypeId::new(0),
            detail: "TypeId(0) -> TypeId(0)".to_string(),
        };
        let resolve_err: ResolveError = graph_err.clone().into();
        assert_eq!(resolve_err, ResolveError::Graph(graph_err));
    }
}
