//! Viewer panels
//!
//! The material selector lets the user cycle each family's variant; changes
//! take effect on the next frame's snapshot.

use crate::gfx::{
    material::{MaterialFamily, VariantSelectors},
    scene::model::SceneStatistics,
};

/// Offset of the first arrow button from the window's left edge.
const LABEL_COLUMN: f32 = 150.0;

/// A press on one of a family's arrow buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorAction {
    Previous(MaterialFamily),
    Next(MaterialFamily),
}

impl SelectorAction {
    /// Applies the press, returning the family's new variant.
    pub fn apply(self, selectors: &mut VariantSelectors) -> i32 {
        match self {
            SelectorAction::Previous(family) => selectors.get_mut(family).decrement(),
            SelectorAction::Next(family) => selectors.get_mut(family).increment(),
        }
    }
}

pub fn variant_label(variant: i32) -> String {
    format!("Material {}", variant)
}

/// One widget in a family's selector row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowItem {
    Label(String),
    Button { id: String, action: SelectorAction },
    Variant(String),
}

/// Left to right: family label, `<`, current variant, `>`.
pub fn selector_row(family: MaterialFamily, variant: i32) -> [RowItem; 4] {
    let label = family.label();
    [
        RowItem::Label(label.to_string()),
        RowItem::Button {
            id: format!("<##{}", label),
            action: SelectorAction::Previous(family),
        },
        RowItem::Variant(variant_label(variant)),
        RowItem::Button {
            id: format!(">##{}", label),
            action: SelectorAction::Next(family),
        },
    ]
}

/// "Material Selector" window: one `<` `>` row per family, then a summary
/// of what the imported scene contains.
pub fn material_selector_panel(
    ui: &imgui::Ui,
    selectors: &mut VariantSelectors,
    stats: &SceneStatistics,
) {
    let mut actions = Vec::new();

    ui.window("Material Selector")
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .always_auto_resize(true)
        .collapsible(true)
        .build(|| {
            for family in MaterialFamily::ALL {
                let row = selector_row(family, selectors.get(family).value());
                for (column, item) in row.into_iter().enumerate() {
                    match column {
                        0 => {}
                        1 => ui.same_line_with_pos(LABEL_COLUMN),
                        _ => ui.same_line(),
                    }
                    match item {
                        RowItem::Label(text) | RowItem::Variant(text) => ui.text(text),
                        RowItem::Button { id, action } => {
                            if ui.button(id) {
                                actions.push(action);
                            }
                        }
                    }
                }
            }

            ui.separator();
            render_scene_summary(ui, stats);
        });

    for action in actions {
        action.apply(selectors);
    }
}

fn render_scene_summary(ui: &imgui::Ui, stats: &SceneStatistics) {
    if stats.meshes == 0 {
        ui.text_disabled("No meshes loaded");
        return;
    }

    ui.text(format!(
        "{} meshes, {} triangles",
        stats.meshes, stats.triangles
    ));
    for family in MaterialFamily::ALL {
        ui.text(format!("{}: {}", family.label(), stats.family(family)));
    }
    if stats.unclassified > 0 {
        ui.text_colored(
            [0.0, 1.0, 0.0, 1.0],
            format!("Unclassified: {}", stats.unclassified),
        );
    }
}

/// Help text pinned to the bottom-right corner.
pub fn controls_overlay(ui: &imgui::Ui) {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window("Controls")
        .position(
            [display_size[0] - 20.0, display_size[1] - 20.0],
            imgui::Condition::Always,
        )
        .position_pivot([1.0, 1.0])
        .no_decoration()
        .always_auto_resize(true)
        .movable(false)
        .bg_alpha(0.35)
        .build(|| {
            ui.text("Hold Right Click and move the mouse to rotate");
            ui.text("Scroll Wheel to Zoom In/Out");
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps_to_first_variant() {
        let mut selectors = VariantSelectors::default();
        let family = MaterialFamily::BlackSquares;
        let max = selectors.get(family).max();

        for expected in 2..=max {
            assert_eq!(SelectorAction::Next(family).apply(&mut selectors), expected);
        }
        assert_eq!(SelectorAction::Next(family).apply(&mut selectors), 1);
    }

    #[test]
    fn test_previous_from_first_wraps_to_last() {
        let mut selectors = VariantSelectors::default();
        let family = MaterialFamily::WhitePieces;
        let max = selectors.get(family).max();
        assert_eq!(SelectorAction::Previous(family).apply(&mut selectors), max);
    }

    #[test]
    fn test_actions_only_touch_their_family() {
        let mut selectors = VariantSelectors::default();
        SelectorAction::Next(MaterialFamily::BoardBase).apply(&mut selectors);

        let snapshot = selectors.snapshot();
        assert_eq!(snapshot.variant(MaterialFamily::BoardBase), 2);
        for family in MaterialFamily::ALL {
            if family != MaterialFamily::BoardBase {
                assert_eq!(snapshot.variant(family), 1);
            }
        }
    }

    #[test]
    fn test_variant_label() {
        assert_eq!(variant_label(3), "Material 3");
    }

    #[test]
    fn test_selector_row_puts_variant_between_arrows() {
        let row = selector_row(MaterialFamily::BlackPieces, 2);
        let label = MaterialFamily::BlackPieces.label();

        assert_eq!(row[0], RowItem::Label(label.to_string()));
        assert_eq!(
            row[1],
            RowItem::Button {
                id: format!("<##{}", label),
                action: SelectorAction::Previous(MaterialFamily::BlackPieces),
            }
        );
        assert_eq!(row[2], RowItem::Variant("Material 2".to_string()));
        assert_eq!(
            row[3],
            RowItem::Button {
                id: format!(">##{}", label),
                action: SelectorAction::Next(MaterialFamily::BlackPieces),
            }
        );
    }
}
