//! Name-based material classification
//!
//! Each imported primitive group is tagged once, at import time, with the
//! shading family its material belongs to. The policy is a case-sensitive
//! substring match against the material name, evaluated top-to-bottom over
//! [`CLASSIFICATION_RULES`]; the first rule whose pattern occurs in the name
//! wins. Names matching no rule are [`Classification::Unclassified`], which
//! the shader renders in the diagnostic green.

use std::fmt;

/// The five shading families a material can belong to.
///
/// The discriminant is the classification ID uploaded to the shader.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaterialFamily {
    WhitePieces = 1,
    BlackPieces = 2,
    BoardBase = 3,
    WhiteSquares = 4,
    BlackSquares = 5,
}

impl MaterialFamily {
    /// All families in ID order.
    pub const ALL: [MaterialFamily; 5] = [
        MaterialFamily::WhitePieces,
        MaterialFamily::BlackPieces,
        MaterialFamily::BoardBase,
        MaterialFamily::WhiteSquares,
        MaterialFamily::BlackSquares,
    ];

    /// Classification ID as seen by the shader.
    pub fn id(self) -> i32 {
        self as i32
    }

    /// Position of this family in [`Self::ALL`] and in selector arrays.
    pub fn index(self) -> usize {
        self as usize - 1
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|family| family.id() == id)
    }

    /// Human readable label used by the UI.
    pub fn label(self) -> &'static str {
        match self {
            MaterialFamily::WhitePieces => "White Pieces",
            MaterialFamily::BlackPieces => "Black Pieces",
            MaterialFamily::BoardBase => "Board Base",
            MaterialFamily::WhiteSquares => "White Squares",
            MaterialFamily::BlackSquares => "Black Squares",
        }
    }
}

impl fmt::Display for MaterialFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Permanent classification of an imported primitive group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Classification {
    #[default]
    Unclassified,
    Family(MaterialFamily),
}

impl Classification {
    /// ID of the unclassified bucket; distinct from every family ID.
    pub const UNCLASSIFIED_ID: i32 = 0;

    pub fn id(self) -> i32 {
        match self {
            Classification::Unclassified => Self::UNCLASSIFIED_ID,
            Classification::Family(family) => family.id(),
        }
    }

    pub fn family(self) -> Option<MaterialFamily> {
        match self {
            Classification::Unclassified => None,
            Classification::Family(family) => Some(family),
        }
    }
}

impl From<MaterialFamily> for Classification {
    fn from(family: MaterialFamily) -> Self {
        Classification::Family(family)
    }
}

/// Ordered (substring, family) rules. Order is the priority.
pub const CLASSIFICATION_RULES: [(&str, MaterialFamily); 5] = [
    ("Bianco", MaterialFamily::WhitePieces),
    ("Nero", MaterialFamily::BlackPieces),
    ("Legno", MaterialFamily::BoardBase),
    ("CaselleBianche", MaterialFamily::WhiteSquares),
    ("CaselleNere", MaterialFamily::BlackSquares),
];

/// Classifies a material name against [`CLASSIFICATION_RULES`].
pub fn classify(material_name: &str) -> Classification {
    classify_with(&CLASSIFICATION_RULES, material_name)
}

/// Classifies a material name against an arbitrary ordered rule list.
pub fn classify_with(rules: &[(&str, MaterialFamily)], material_name: &str) -> Classification {
    rules
        .iter()
        .find(|(pattern, _)| material_name.contains(pattern))
        .map_or(Classification::Unclassified, |&(_, family)| {
            Classification::Family(family)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_rule_matches_its_family() {
        assert_eq!(classify("Bianco_piece"), MaterialFamily::WhitePieces.into());
        assert_eq!(classify("Nero_piece"), MaterialFamily::BlackPieces.into());
        assert_eq!(classify("Legno.001"), MaterialFamily::BoardBase.into());
        assert_eq!(classify("CaselleBianche"), MaterialFamily::WhiteSquares.into());
        assert_eq!(classify("CaselleNere"), MaterialFamily::BlackSquares.into());
    }

    #[test]
    fn test_first_rule_wins_when_several_match() {
        // "Nero" is checked before "CaselleNere"'s own rule would be.
        assert_eq!(
            classify("CaselleNere_Nero"),
            MaterialFamily::BlackPieces.into()
        );
        assert_eq!(classify("Legno_Bianco"), MaterialFamily::WhitePieces.into());
        assert_eq!(
            classify("CaselleBianche_Legno"),
            MaterialFamily::BoardBase.into()
        );
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert_eq!(classify("bianco"), Classification::Unclassified);
        assert_eq!(classify("NERO"), Classification::Unclassified);
        assert_eq!(classify(""), Classification::Unclassified);
    }

    #[test]
    fn test_unclassified_id_is_distinct() {
        assert_eq!(Classification::Unclassified.id(), 0);
        for family in MaterialFamily::ALL {
            assert_ne!(Classification::from(family).id(), 0);
            assert_eq!(MaterialFamily::from_id(family.id()), Some(family));
            assert_eq!(MaterialFamily::ALL[family.index()], family);
        }
        assert_eq!(MaterialFamily::from_id(6), None);
    }

    #[test]
    fn test_custom_rule_order_is_respected() {
        let rules = [
            ("CaselleNere", MaterialFamily::BlackSquares),
            ("Nero", MaterialFamily::BlackPieces),
        ];
        assert_eq!(
            classify_with(&rules, "CaselleNere_Nero"),
            MaterialFamily::BlackSquares.into()
        );
    }
}
