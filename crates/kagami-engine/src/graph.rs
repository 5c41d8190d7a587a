//! Ancestor-chain traversal over a host type model
//!
//! The supertype relation is a linear chain (single inheritance), so
//! leaf-to-root is the natural iteration: repeatedly fetch the direct
//! supertype until none remains. Root-to-leaf buffers the chain and
//! reverses it, an O(depth) allocation on chains bounded by practical
//! class-design limits.
//!
//! Acyclicity is the host's invariant, not re-validated up front; a chain
//! that revisits a type fails the walk with [`TypeGraphError::Malformed`]
//! at the point the repeat is observed.

use std::sync::Arc;

use kagami_types::{TraversalOrder, TypeGraphError, TypeId, TypeModel};

use crate::cache::ResolutionCache;

/// Walks the supertype chains of a host model's types.
pub struct TypeGraph<'m, M> {
    model: &'m M,
    cache: Option<Arc<ResolutionCache>>,
}

impl<'m, M: TypeModel> TypeGraph<'m, M> {
    /// Create a graph over `model` without memoization
    pub fn new(model: &'m M) -> Self {
        TypeGraph { model, cache: None }
    }

    /// Create a graph that memoizes chains in `cache`
    pub fn with_cache(model: &'m M, cache: Arc<ResolutionCache>) -> Self {
        TypeGraph {
            model,
            cache: Some(cache),
        }
    }

    /// Ancestor chain of `ty` in the requested order.
    ///
    /// With `include_self` the chain contains `ty` itself at its leaf end.
    pub fn ancestors_of(
        &self,
        ty: TypeId,
        include_self: bool,
        order: TraversalOrder,
    ) -> Result<Vec<TypeId>, TypeGraphError> {
        let chain = self.chain(ty)?;
        let mut out: Vec<TypeId> = if include_self {
            chain.to_vec()
        } else {
            chain[1..].to_vec()
        };
        if order == TraversalOrder::RootToLeaf {
            out.reverse();
        }
        Ok(out)
    }

    /// Full self-first chain for `ty`, memoized when a cache is attached.
    pub fn chain(&self, ty: TypeId) -> Result<Arc<[TypeId]>, TypeGraphError> {
        if let Some(cache) = &self.cache {
            if let Some(chain) = cache.chain(ty) {
                return Ok(chain);
            }
        }
        let mut chain = Vec::new();
        for step in self.walk(ty) {
            chain.push(step?);
        }
        let chain: Arc<[TypeId]> = chain.into();
        match &self.cache {
            Some(cache) => Ok(cache.insert_chain(ty, chain)),
            None => Ok(chain),
        }
    }

    /// Lazily walk `ty` and its supertypes, leaf to root.
    ///
    /// Yields `ty` first, then each successive supertype. Consumers that
    /// stop at a match never touch the levels above it. If the chain
    /// revisits a type, the walk yields `Malformed` once and ends.
    pub fn walk(&self, ty: TypeId) -> SupertypeWalk<'m, M> {
        SupertypeWalk {
            model: self.model,
            visited: Vec::new(),
            next: Some(ty),
        }
    }
}

/// Lazy leaf-to-root iterator over a type and its supertypes.
///
/// Created by [`TypeGraph::walk`].
pub struct SupertypeWalk<'m, M> {
    model: &'m M,
    visited: Vec<TypeId>,
    next: Option<TypeId>,
}

impl<'m, M: TypeModel> Iterator for SupertypeWalk<'m, M> {
    type Item = Result<TypeId, TypeGraphError>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        // Linear scan is fine: chains are as deep as class hierarchies get.
        if self.visited.contains(&current) {
            return Some(Err(TypeGraphError::Malformed {
                ty: current,
                detail: cycle_path(&self.visited, current),
            }));
        }
        self.visited.push(current);
        self.next = self.model.direct_supertype(current);
        Some(Ok(current))
    }
}

fn cycle_path(visited: &[TypeId], repeated: TypeId) -> String {
    let mut path = String::new();
    for ty in visited {
        path.push_str(&ty.to_string());
        path.push_str(" -> ");
    }
    path.push_str(&repeated.to_string());
    path
}
