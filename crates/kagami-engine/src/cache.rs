//! Shared memoization for chains and member enumerations
//!
//! Types and their member sets do not change at runtime, so both tables are
//! pure functions of their keys for a fixed host model and may live for the
//! process lifetime. The cache is an explicit component: construct one,
//! share it via `Arc`, and hand it to the engine pieces that should use it.
//! Tests run with a fresh cache per case.

use std::sync::Arc;

use dashmap::DashMap;

use kagami_types::{Member, MemberKind, TraversalPolicy, TypeId};

/// Memoization table shared by [`TypeGraph`](crate::TypeGraph) and
/// [`MemberIndex`](crate::MemberIndex).
///
/// Population is idempotent insert-if-absent: two threads computing the
/// same entry concurrently waste one computation, nothing more, and both
/// end up holding the same shared slice.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    /// Self-first ancestor chains by type
    chains: DashMap<TypeId, Arc<[TypeId]>>,
    /// Enumeration results by full query key
    members: DashMap<(TypeId, MemberKind, TraversalPolicy), Arc<[Member]>>,
}

impl ResolutionCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Memoized self-first chain for `ty`
    pub fn chain(&self, ty: TypeId) -> Option<Arc<[TypeId]>> {
        self.chains.get(&ty).map(|entry| Arc::clone(entry.value()))
    }

    /// Insert a chain, keeping the existing entry if one raced in first
    pub fn insert_chain(&self, ty: TypeId, chain: Arc<[TypeId]>) -> Arc<[TypeId]> {
        Arc::clone(self.chains.entry(ty).or_insert(chain).value())
    }

    /// Memoized enumeration result for a query key
    pub fn members(
        &self,
        ty: TypeId,
        kind: MemberKind,
        policy: TraversalPolicy,
    ) -> Option<Arc<[Member]>> {
        self.members
            .get(&(ty, kind, policy))
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Insert an enumeration result, keeping the existing entry if one
    /// raced in first
    pub fn insert_members(
        &self,
        ty: TypeId,
        kind: MemberKind,
        policy: TraversalPolicy,
        members: Arc<[Member]>,
    ) -> Arc<[Member]> {
        Arc::clone(
            self.members
                .entry((ty, kind, policy))
                .or_insert(members)
                .value(),
        )
    }

    /// Number of memoized chains
    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    /// Number of memoized enumeration results
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}
