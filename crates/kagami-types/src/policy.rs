//! Traversal policies for member enumeration and lookup

/// Which members a walk sees at each chain level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Everything the type declares, regardless of host visibility flags
    Declared,
    /// Only members the host model marks externally accessible
    PubliclyVisible,
}

/// How far up the ancestor chain a walk may go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AncestorDepth {
    /// The type itself plus its immediate supertype only
    One,
    /// The full chain to the root
    All,
}

/// Direction in which chain levels are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Start at the type itself and move toward the root
    LeafToRoot,
    /// Ancestors first; requires buffering the chain before emission
    RootToLeaf,
}

/// Configuration for member enumeration and lookup.
///
/// Collapses the walk's knobs into one named record so call sites say what
/// they want instead of passing positional booleans. The default is the
/// common case: declared visibility, ancestors included, full depth, leaf
/// to root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraversalPolicy {
    /// Which members each level contributes
    pub visibility: Visibility,
    /// Whether the walk continues above the type itself
    pub include_ancestors: bool,
    /// How far an ancestor walk may go
    pub ancestor_depth: AncestorDepth,
    /// Direction levels are emitted in
    pub order: TraversalOrder,
}

impl Default for TraversalPolicy {
    fn default() -> Self {
        TraversalPolicy {
            visibility: Visibility::Declared,
            include_ancestors: true,
            ancestor_depth: AncestorDepth::All,
            order: TraversalOrder::LeafToRoot,
        }
    }
}

impl TraversalPolicy {
    /// Policy equal to the default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the visibility mode
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Include or exclude ancestor levels
    pub fn with_ancestors(mut self, include: bool) -> Self {
        self.include_ancestors = include;
        self
    }

    /// Set the walk depth
    pub fn with_depth(mut self, depth: AncestorDepth) -> Self {
        self.ancestor_depth = depth;
        self
    }

    /// Set the emission order
    pub fn with_order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = TraversalPolicy::default();
        assert_eq!(policy.visibility, Visibility::Declared);
        assert!(policy.include_ancestors);
        assert_eq!(policy.ancestor_depth, AncestorDepth::All);
        assert_eq!(policy.order, TraversalOrder::LeafToRoot);
    }

    #[test]
    fn test_policy_builders() {
        let policy = TraversalPolicy::new()
            .with_visibility(Visibility::PubliclyVisible)
            .with_ancestors(false)
            .with_depth(AncestorDepth::One)
            .with_order(TraversalOrder::RootToLeaf);
        assert_eq!(policy.visibility, Visibility::PubliclyVisible);
        assert!(!policy.include_ancestors);
        assert_eq!(policy.ancestor_depth, AncestorDepth::One);
        assert_eq!(policy.order, TraversalOrder::RootToLeaf);
    }

    #[test]
    fn test_policy_is_hashable() {
        use std::collections::HashSet;

        let mut seen = HashSet::new();
        seen.insert(TraversalPolicy::default());
        seen.insert(TraversalPolicy::default().with_ancestors(false));
        assert_eq!(seen.len(), 2);
        assert!(seen.contains(&TraversalPolicy::new()));
    }
}
