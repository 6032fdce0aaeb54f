//! Family → pattern table driving the procedural shading stage
//!
//! Every (family, variant) pair maps to exactly one [`Pattern`] entry. The
//! CPU reference evaluator and the generated WGSL dispatch both read this
//! table, so adding a look is a table edit rather than a new shader branch.
//! Variant numbers are 1-based: variant `v` selects entry `v - 1`.

use crate::gfx::material::MaterialFamily;

/// Parameters of the stochastic marble pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarbleParams {
    /// Multiplier applied to the texture coordinate before evaluation
    pub uv_scale: f32,
    pub base: [f32; 3],
    pub vein: [f32; 3],
}

/// Parameters of the procedural wood-grain pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WoodParams {
    /// Multiplier applied to the texture coordinate before evaluation
    pub uv_scale: f32,
    pub base: [f32; 3],
    pub mid: [f32; 3],
    pub highlight: [f32; 3],
}

/// One procedural colour-generation method with its fixed constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pattern {
    Solid { color: [f32; 3] },
    Marble(MarbleParams),
    Wood(WoodParams),
}

impl Pattern {
    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Solid { .. } => "Solid",
            Pattern::Marble(_) => "Marble",
            Pattern::Wood(_) => "Wood",
        }
    }
}

pub const WHITE_PIECES_SOLID: Pattern = Pattern::Solid {
    color: [0.75, 0.75, 0.75],
};
pub const WHITE_PIECES_MARBLE: Pattern = Pattern::Marble(MarbleParams {
    uv_scale: 15.0,
    base: [0.9, 0.9, 0.9],
    vein: [0.3, 0.3, 0.3],
});
pub const WHITE_PIECES_WOOD: Pattern = Pattern::Wood(WoodParams {
    uv_scale: 2.0,
    base: [0.40, 0.32, 0.20],
    mid: [0.55, 0.44, 0.28],
    highlight: [0.70, 0.56, 0.36],
});

pub const BLACK_PIECES_SOLID: Pattern = Pattern::Solid {
    color: [0.25, 0.25, 0.25],
};
pub const BLACK_PIECES_MARBLE: Pattern = Pattern::Marble(MarbleParams {
    uv_scale: 15.0,
    base: [0.25, 0.25, 0.25],
    vein: [0.8, 0.8, 0.8],
});
pub const BLACK_PIECES_WOOD: Pattern = Pattern::Wood(WoodParams {
    uv_scale: 2.0,
    base: [0.15, 0.05, 0.03],
    mid: [0.30, 0.10, 0.05],
    highlight: [0.40, 0.15, 0.08],
});

pub const BOARD_BASE_SOLID: Pattern = Pattern::Solid {
    color: [0.40, 0.26, 0.13],
};
pub const BOARD_BASE_DARK_WOOD: Pattern = Pattern::Wood(WoodParams {
    uv_scale: 1.0,
    base: [0.10, 0.05, 0.02],
    mid: [0.30, 0.15, 0.07],
    highlight: [0.45, 0.25, 0.12],
});
pub const BOARD_BASE_BLUE_WOOD: Pattern = Pattern::Wood(WoodParams {
    uv_scale: 0.25,
    base: [0.02, 0.05, 0.10],
    mid: [0.07, 0.15, 0.30],
    highlight: [0.12, 0.25, 0.45],
});

pub const WHITE_SQUARES_SOLID: Pattern = Pattern::Solid {
    color: [0.75, 0.75, 0.75],
};
pub const WHITE_SQUARES_PALE_WOOD: Pattern = Pattern::Wood(WoodParams {
    uv_scale: 0.25,
    base: [0.9, 0.9, 0.85],
    mid: [0.8, 0.8, 0.75],
    highlight: [1.0, 1.0, 0.95],
});

pub const BLACK_SQUARES_SOLID: Pattern = Pattern::Solid {
    color: [0.25, 0.25, 0.25],
};
pub const BLACK_SQUARES_DARK_WOOD: Pattern = Pattern::Wood(WoodParams {
    uv_scale: 0.25,
    base: [0.10, 0.05, 0.02],
    mid: [0.30, 0.15, 0.07],
    highlight: [0.45, 0.25, 0.12],
});
pub const BLACK_SQUARES_BLUE_WOOD: Pattern = Pattern::Wood(WoodParams {
    uv_scale: 0.25,
    base: [0.02, 0.05, 0.10],
    mid: [0.07, 0.15, 0.30],
    highlight: [0.12, 0.25, 0.45],
});

static WHITE_PIECES: [Pattern; 3] = [WHITE_PIECES_SOLID, WHITE_PIECES_MARBLE, WHITE_PIECES_WOOD];
static BLACK_PIECES: [Pattern; 3] = [BLACK_PIECES_SOLID, BLACK_PIECES_MARBLE, BLACK_PIECES_WOOD];
static BOARD_BASE: [Pattern; 3] = [BOARD_BASE_SOLID, BOARD_BASE_DARK_WOOD, BOARD_BASE_BLUE_WOOD];
static WHITE_SQUARES: [Pattern; 2] = [WHITE_SQUARES_SOLID, WHITE_SQUARES_PALE_WOOD];
static BLACK_SQUARES: [Pattern; 3] = [
    BLACK_SQUARES_SOLID,
    BLACK_SQUARES_DARK_WOOD,
    BLACK_SQUARES_BLUE_WOOD,
];

static STANDARD: MaterialTable = MaterialTable::new([
    &WHITE_PIECES,
    &BLACK_PIECES,
    &BOARD_BASE,
    &WHITE_SQUARES,
    &BLACK_SQUARES,
]);

/// Pattern lists for all five families, in [`MaterialFamily::index`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialTable {
    families: [&'static [Pattern]; 5],
}

impl MaterialTable {
    pub const fn new(families: [&'static [Pattern]; 5]) -> Self {
        Self { families }
    }

    /// The built-in chessboard table.
    pub fn standard() -> &'static MaterialTable {
        &STANDARD
    }

    pub fn patterns(&self, family: MaterialFamily) -> &'static [Pattern] {
        self.families[family.index()]
    }

    /// Number of selectable variants, i.e. the selector maximum.
    pub fn variant_count(&self, family: MaterialFamily) -> usize {
        self.patterns(family).len()
    }

    /// Looks up a 1-based variant. Out-of-range variants yield `None`.
    pub fn pattern(&self, family: MaterialFamily, variant: i32) -> Option<&'static Pattern> {
        let slot = usize::try_from(variant.checked_sub(1)?).ok()?;
        self.patterns(family).get(slot)
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_lookup_is_one_based() {
        let table = MaterialTable::standard();
        assert_eq!(
            table.pattern(MaterialFamily::WhitePieces, 1),
            Some(&WHITE_PIECES_SOLID)
        );
        assert_eq!(
            table.pattern(MaterialFamily::BoardBase, 3),
            Some(&BOARD_BASE_BLUE_WOOD)
        );
    }

    #[test]
    fn test_out_of_range_variant_has_no_pattern() {
        let table = MaterialTable::standard();
        assert_eq!(table.pattern(MaterialFamily::WhiteSquares, 3), None);
        assert_eq!(table.pattern(MaterialFamily::BlackPieces, 0), None);
        assert_eq!(table.pattern(MaterialFamily::BlackPieces, -2), None);
        assert_eq!(table.pattern(MaterialFamily::BlackPieces, i32::MIN), None);
    }

    #[test]
    fn test_every_family_starts_with_a_solid_look() {
        let table = MaterialTable::standard();
        for family in MaterialFamily::ALL {
            assert_eq!(table.patterns(family)[0].name(), "Solid", "{family}");
        }
    }
}
