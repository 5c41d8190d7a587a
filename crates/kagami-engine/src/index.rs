//! Ordered member enumeration under a traversal policy

use std::sync::Arc;

use kagami_types::{
    AncestorDepth, Member, MemberKind, TraversalOrder, TraversalPolicy, TypeGraphError, TypeId,
    TypeModel, Visibility,
};

use crate::cache::ResolutionCache;
use crate::graph::TypeGraph;

/// Enumerates member descriptors across a type's ancestor chain.
///
/// Results concatenate each chain level's declared members in host
/// declaration order. Levels appear leaf-first or root-first per the
/// policy; nothing is deduplicated across levels, so a field shadowed by a
/// subclass appears once per declaring level. Callers wanting
/// "most-derived wins" take the first occurrence under leaf-to-root order.
pub struct MemberIndex<'m, M> {
    model: &'m M,
    graph: TypeGraph<'m, M>,
    cache: Option<Arc<ResolutionCache>>,
}

impl<'m, M: TypeModel> MemberIndex<'m, M> {
    /// Create an index over `model` without memoization
    pub fn new(model: &'m M) -> Self {
        MemberIndex {
            model,
            graph: TypeGraph::new(model),
            cache: None,
        }
    }

    /// Create an index that memoizes results in `cache`
    pub fn with_cache(model: &'m M, cache: Arc<ResolutionCache>) -> Self {
        MemberIndex {
            model,
            graph: TypeGraph::with_cache(model, Arc::clone(&cache)),
            cache: Some(cache),
        }
    }

    /// Ordered member descriptors of `ty` under `policy`.
    ///
    /// The returned slice is shared with the cache when one is attached;
    /// repeated identical queries hand back the same allocation.
    pub fn members(
        &self,
        ty: TypeId,
        kind: MemberKind,
        policy: TraversalPolicy,
    ) -> Result<Arc<[Member]>, TypeGraphError> {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.members(ty, kind, policy) {
                return Ok(hit);
            }
        }
        let collected: Arc<[Member]> = self.collect(ty, kind, policy)?.into();
        match &self.cache {
            Some(cache) => Ok(cache.insert_members(ty, kind, policy, collected)),
            None => Ok(collected),
        }
    }

    fn collect(
        &self,
        ty: TypeId,
        kind: MemberKind,
        policy: TraversalPolicy,
    ) -> Result<Vec<Member>, TypeGraphError> {
        if !policy.include_ancestors {
            return Ok(self.level(ty, kind, policy.visibility));
        }
        let chain: Vec<TypeId> = match policy.ancestor_depth {
            // Self plus immediate supertype; the full chain is not needed.
            // A type that is its own supertype trips the walk's repeat
            // check instead of enumerating the same level twice.
            AncestorDepth::One => self.graph.walk(ty).take(2).collect::<Result<_, _>>()?,
            AncestorDepth::All => self.graph.chain(ty)?.to_vec(),
        };
        let mut out = Vec::new();
        match policy.order {
            TraversalOrder::LeafToRoot => {
                for level_ty in &chain {
                    out.extend(self.level(*level_ty, kind, policy.visibility));
                }
            }
            TraversalOrder::RootToLeaf => {
                for level_ty in chain.iter().rev() {
                    out.extend(self.level(*level_ty, kind, policy.visibility));
                }
            }
        }
        Ok(out)
    }

    /// One chain level: declared members filtered by the visibility mode
    /// and stamped with the view that produced them.
    fn level(&self, ty: TypeId, kind: MemberKind, visibility: Visibility) -> Vec<Member> {
        self.model
            .declared_members(ty, kind)
            .into_iter()
            .filter(|member| {
                visibility == Visibility::Declared || self.model.is_publicly_visible(member)
            })
            .map(|member| member.with_visibility(visibility))
            .collect()
    }
}
