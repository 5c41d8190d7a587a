//! First-match member lookup with upward search

use kagami_types::{
    AncestorDepth, Member, MemberQuery, ResolveError, ResolvedMember, TraversalPolicy, TypeId,
    TypeModel, Visibility,
};

use crate::graph::TypeGraph;

/// Resolves members by name or signature with optional ancestor fallback.
///
/// The walk inspects one chain level at a time and stops at the first
/// identity match, so cost is proportional to the depth at which the member
/// lives, not to the hierarchy size. A full enumeration is never
/// materialized on this path.
pub struct MemberResolver<'m, M> {
    model: &'m M,
    graph: TypeGraph<'m, M>,
}

impl<'m, M: TypeModel> MemberResolver<'m, M> {
    /// Create a resolver over `model`
    pub fn new(model: &'m M) -> Self {
        MemberResolver {
            model,
            graph: TypeGraph::new(model),
        }
    }

    /// Resolve `query` starting at `ty` under `policy`.
    ///
    /// Looks in `ty`'s own declared members first. If the policy includes
    /// ancestors, the search continues upward one level at a time, bounded
    /// by the policy's depth, until a member matches or the chain is
    /// exhausted. Constructors walk the chain exactly like fields and
    /// methods do.
    pub fn resolve(
        &self,
        ty: TypeId,
        query: &MemberQuery<'_>,
        policy: TraversalPolicy,
    ) -> Result<ResolvedMember, ResolveError> {
        if !policy.include_ancestors {
            return match self.lookup_level(ty, query, policy.visibility) {
                Some(member) => Ok(ResolvedMember {
                    member,
                    found_at: ty,
                }),
                None => Err(self.not_found(ty, query)),
            };
        }
        let window = match policy.ancestor_depth {
            // Self plus immediate supertype
            AncestorDepth::One => 2,
            AncestorDepth::All => usize::MAX,
        };
        for step in self.graph.walk(ty).take(window) {
            let level_ty = step?;
            if let Some(member) = self.lookup_level(level_ty, query, policy.visibility) {
                return Ok(ResolvedMember {
                    member,
                    found_at: level_ty,
                });
            }
        }
        Err(self.not_found(ty, query))
    }

    /// Resolve a field by name
    pub fn resolve_field(
        &self,
        ty: TypeId,
        name: &str,
        policy: TraversalPolicy,
    ) -> Result<ResolvedMember, ResolveError> {
        self.resolve(ty, &MemberQuery::Field { name }, policy)
    }

    /// Resolve a method by name and exact parameter signature
    pub fn resolve_method(
        &self,
        ty: TypeId,
        name: &str,
        params: &[TypeId],
        policy: TraversalPolicy,
    ) -> Result<ResolvedMember, ResolveError> {
        self.resolve(ty, &MemberQuery::Method { name, params }, policy)
    }

    /// Resolve a constructor by exact parameter signature
    pub fn resolve_constructor(
        &self,
        ty: TypeId,
        params: &[TypeId],
        policy: TraversalPolicy,
    ) -> Result<ResolvedMember, ResolveError> {
        self.resolve(ty, &MemberQuery::Constructor { params }, policy)
    }

    /// First identity match within one level's declared members, under the
    /// given visibility mode.
    fn lookup_level(
        &self,
        ty: TypeId,
        query: &MemberQuery<'_>,
        visibility: Visibility,
    ) -> Option<Member> {
        self.model
            .declared_members(ty, query.kind())
            .into_iter()
            .find_map(|member| {
                if !query.matches(&member) {
                    return None;
                }
                if visibility == Visibility::PubliclyVisible
                    && !self.model.is_publicly_visible(&member)
                {
                    return None;
                }
                Some(member.with_visibility(visibility))
            })
    }

    fn not_found(&self, ty: TypeId, query: &MemberQuery<'_>) -> ResolveError {
        ResolveError::NotFound {
            kind: query.kind(),
            ident: query.ident(),
            ty,
        }
    }
}
