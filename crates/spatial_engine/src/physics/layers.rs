//! Collision layer tags for filtering geometric queries
//!
//! Based on Game Engine Architecture 3rd Edition, Section 13.3.8: collision
//! filtering via layers or groups. A query here excludes at most one layer,
//! so layers compare by equality instead of through bit masks.

/// Coarse category tag carried by every geometry part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionLayer {
    /// Geometry that never participates in queries
    None,

    /// Regular gameplay geometry
    Gameplay,

    /// Editor-only geometry such as gizmos and helper meshes
    Editor,
}

impl Default for CollisionLayer {
    fn default() -> Self {
        CollisionLayer::Gameplay
    }
}

impl CollisionLayer {
    /// Whether a part tagged with this layer is skipped by a query that
    /// excludes `excluded`.
    ///
    /// [`CollisionLayer::None`] is skipped by every query, independent of
    /// the query's own exclusion.
    pub fn excluded_by(self, excluded: CollisionLayer) -> bool {
        self == CollisionLayer::None || self == excluded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_layer_is_always_excluded() {
        assert!(CollisionLayer::None.excluded_by(CollisionLayer::None));
        assert!(CollisionLayer::None.excluded_by(CollisionLayer::Gameplay));
        assert!(CollisionLayer::None.excluded_by(CollisionLayer::Editor));
    }

    #[test]
    fn test_matching_layer_is_excluded() {
        assert!(CollisionLayer::Editor.excluded_by(CollisionLayer::Editor));
        assert!(!CollisionLayer::Gameplay.excluded_by(CollisionLayer::Editor));
    }

    #[test]
    fn test_default_layer_participates_in_queries() {
        let layer = CollisionLayer::default();
        assert_eq!(layer, CollisionLayer::Gameplay);
        assert!(!layer.excluded_by(CollisionLayer::None));
    }
}
