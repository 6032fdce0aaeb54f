//! Live variant selection per material family
//!
//! The interaction layer owns a [`VariantSelectors`] and mutates it between
//! frames; the renderer only ever sees the immutable [`VariantSnapshot`]
//! taken at the start of a frame.

use super::classification::MaterialFamily;
use crate::gfx::shading::table::MaterialTable;

/// One cycling selector with range `[1, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantSelector {
    value: i32,
    max: i32,
}

impl VariantSelector {
    /// Creates a selector at variant 1. `max` is clamped to at least 1.
    pub fn new(max: i32) -> Self {
        Self {
            value: 1,
            max: max.max(1),
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Sets the value directly, wrapping it into `[1, max]`.
    pub fn set(&mut self, value: i32) {
        self.value = (value - 1).rem_euclid(self.max) + 1;
    }

    pub fn increment(&mut self) -> i32 {
        self.value = if self.value >= self.max {
            1
        } else {
            self.value + 1
        };
        self.value
    }

    pub fn decrement(&mut self) -> i32 {
        self.value = if self.value <= 1 {
            self.max
        } else {
            self.value - 1
        };
        self.value
    }
}

/// Selectors for all five families, indexed by [`MaterialFamily::index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSelectors {
    selectors: [VariantSelector; 5],
}

impl VariantSelectors {
    /// Builds selectors whose maxima match the number of patterns each
    /// family has in `table`.
    pub fn from_table(table: &MaterialTable) -> Self {
        Self {
            selectors: MaterialFamily::ALL
                .map(|family| VariantSelector::new(table.variant_count(family) as i32)),
        }
    }

    pub fn get(&self, family: MaterialFamily) -> &VariantSelector {
        &self.selectors[family.index()]
    }

    pub fn get_mut(&mut self, family: MaterialFamily) -> &mut VariantSelector {
        &mut self.selectors[family.index()]
    }

    pub fn snapshot(&self) -> VariantSnapshot {
        VariantSnapshot(self.selectors.map(|selector| selector.value()))
    }
}

impl Default for VariantSelectors {
    fn default() -> Self {
        Self::from_table(MaterialTable::standard())
    }
}

/// Frozen selector values for one frame, in family index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantSnapshot(pub [i32; 5]);

impl VariantSnapshot {
    pub fn variant(&self, family: MaterialFamily) -> i32 {
        self.0[family.index()]
    }
}

impl Default for VariantSnapshot {
    fn default() -> Self {
        Self([1; 5])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_wraps_to_one() {
        let mut selector = VariantSelector::new(3);
        assert_eq!(selector.increment(), 2);
        assert_eq!(selector.increment(), 3);
        assert_eq!(selector.increment(), 1);
    }

    #[test]
    fn test_decrement_wraps_to_max() {
        let mut selector = VariantSelector::new(3);
        let seen: Vec<i32> = (0..3).map(|_| selector.decrement()).collect();
        assert_eq!(seen, vec![3, 2, 1]);
    }

    #[test]
    fn test_set_wraps_into_range() {
        let mut selector = VariantSelector::new(2);
        selector.set(5);
        assert_eq!(selector.value(), 1);
        selector.set(0);
        assert_eq!(selector.value(), 2);
        selector.set(-1);
        assert_eq!(selector.value(), 1);
    }

    #[test]
    fn test_single_variant_selector_stays_put() {
        let mut selector = VariantSelector::new(0);
        assert_eq!(selector.max(), 1);
        assert_eq!(selector.increment(), 1);
        assert_eq!(selector.decrement(), 1);
    }

    #[test]
    fn test_default_maxima_follow_material_table() {
        let selectors = VariantSelectors::default();
        assert_eq!(selectors.get(MaterialFamily::WhitePieces).max(), 3);
        assert_eq!(selectors.get(MaterialFamily::BlackPieces).max(), 3);
        assert_eq!(selectors.get(MaterialFamily::BoardBase).max(), 3);
        assert_eq!(selectors.get(MaterialFamily::WhiteSquares).max(), 2);
        assert_eq!(selectors.get(MaterialFamily::BlackSquares).max(), 3);
    }

    #[test]
    fn test_snapshot_is_detached_from_live_state() {
        let mut selectors = VariantSelectors::default();
        selectors.get_mut(MaterialFamily::BoardBase).increment();
        let snapshot = selectors.snapshot();
        selectors.get_mut(MaterialFamily::BoardBase).increment();

        assert_eq!(snapshot.variant(MaterialFamily::BoardBase), 2);
        assert_eq!(snapshot.0, [1, 1, 2, 1, 1]);
        assert_eq!(selectors.snapshot().variant(MaterialFamily::BoardBase), 3);
    }
}
