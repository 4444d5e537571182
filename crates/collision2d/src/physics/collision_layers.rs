//! Collision layer masks
//!
//! A collider's mask says what kind of collider it is. A query mask lists the
//! bits a candidate must carry to be considered: every bit set in the query
//! must also be set on the candidate (`candidate & query == query`).

/// Collision layer bitfield
pub type Mask = u32;

/// Named collision layer bits
pub struct CollisionLayers;

impl CollisionLayers {
    /// No collision layer; as a query mask this matches every collider
    pub const NONE: Mask = 0;

    /// All collision layers
    pub const ALL: Mask = 0xFFFF_FFFF;

    /// Player character layer
    pub const PLAYER: Mask = 1 << 0;

    /// Enemy character layer
    pub const ENEMY: Mask = 1 << 1;

    /// Projectiles (bullets, missiles, etc.)
    pub const PROJECTILE: Mask = 1 << 2;

    /// Static environment geometry
    pub const ENVIRONMENT: Mask = 1 << 3;

    /// Trigger volumes (no physical response)
    pub const TRIGGER: Mask = 1 << 4;

    /// Pickups and collectibles
    pub const PICKUP: Mask = 1 << 5;

    /// First bit free for game-defined layers (bits 8-31)
    pub const FIRST_CUSTOM_BIT: u32 = 8;

    /// Game-defined layer `index` (0-based from [`Self::FIRST_CUSTOM_BIT`])
    ///
    /// Returns `None` when the layer would not fit in a [`Mask`].
    pub const fn custom(index: u32) -> Option<Mask> {
        let bit = Self::FIRST_CUSTOM_BIT + index;
        if bit < Mask::BITS {
            Some(1 << bit)
        } else {
            None
        }
    }

    /// Whether a collider with `mask` satisfies `query`
    ///
    /// Required-bits semantics: the candidate must contain every bit of the
    /// query, sharing a single bit is not enough.
    ///
    /// # Example
    /// ```
    /// use collision2d::physics::CollisionLayers;
    ///
    /// let wall = CollisionLayers::ENVIRONMENT | CollisionLayers::TRIGGER;
    /// assert!(CollisionLayers::matches(wall, CollisionLayers::TRIGGER));
    /// assert!(!CollisionLayers::matches(CollisionLayers::TRIGGER, wall));
    /// ```
    pub const fn matches(mask: Mask, query: Mask) -> bool {
        mask & query == query
    }

    /// Helper to create a mask from multiple layers
    pub fn mask(layers: &[Mask]) -> Mask {
        layers.iter().fold(Self::NONE, |acc, &layer| acc | layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_bits_match() {
        assert!(CollisionLayers::matches(0b110, 0b100));
        assert!(CollisionLayers::matches(0b110, 0b110));
        assert!(!CollisionLayers::matches(0b100, 0b110));
    }

    #[test]
    fn test_sharing_one_bit_is_not_enough() {
        let query = CollisionLayers::ENEMY | CollisionLayers::PROJECTILE;
        assert!(!CollisionLayers::matches(CollisionLayers::ENEMY, query));
        assert!(!CollisionLayers::matches(CollisionLayers::PROJECTILE, query));
        assert!(CollisionLayers::matches(query | CollisionLayers::PLAYER, query));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(CollisionLayers::matches(CollisionLayers::NONE, CollisionLayers::NONE));
        assert!(CollisionLayers::matches(CollisionLayers::PICKUP, CollisionLayers::NONE));
    }

    #[test]
    fn test_mask_creation() {
        let mask = CollisionLayers::mask(&[
            CollisionLayers::PLAYER,
            CollisionLayers::ENEMY,
            CollisionLayers::ENVIRONMENT,
        ]);

        assert_eq!(
            mask,
            CollisionLayers::PLAYER | CollisionLayers::ENEMY | CollisionLayers::ENVIRONMENT
        );
    }

    #[test]
    fn test_custom_layers() {
        assert_eq!(CollisionLayers::custom(0), Some(1 << 8));
        assert_eq!(CollisionLayers::custom(23), Some(1 << 31));
        assert_eq!(CollisionLayers::custom(24), None);
    }
}
