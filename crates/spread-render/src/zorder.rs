//! Paint order for cards.
//!
//! Cards are drawn back to front by ascending `z`. The sort is stable, so
//! equal layers keep list order and the later entry ends up on top. Each
//! entry remembers its list index: selection and drag callbacks must address
//! the authoritative slot, not the paint slot.

use spread_core::Position;

/// A card paired with its index in the authoritative list.
#[derive(Debug, Clone, Copy)]
pub struct ZOrdered<'a> {
    pub card: &'a Position,
    pub index: usize,
}

/// Positions in paint order (bottom first).
pub fn z_order(positions: &[Position]) -> Vec<ZOrdered<'_>> {
    let mut ordered: Vec<ZOrdered<'_>> = positions
        .iter()
        .enumerate()
        .map(|(index, card)| ZOrdered { card, index })
        .collect();
    // `sort_by_key` is stable: ties keep insertion order.
    ordered.sort_by_key(|entry| entry.card.z);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use spread_core::PositionId;

    fn card(name: &str, z: u8) -> Position {
        Position::new(PositionId::intern(name), name, 0, 0).with_z(z)
    }

    #[test]
    fn sorts_ascending_by_layer() {
        let positions = vec![card("zo_top", 9), card("zo_bottom", 0), card("zo_mid", 4)];
        let order: Vec<usize> = z_order(&positions).iter().map(|e| e.index).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn equal_layers_keep_list_order() {
        let positions = vec![
            card("zo_a", 1),
            card("zo_b", 0),
            card("zo_c", 1),
            card("zo_d", 0),
            card("zo_e", 1),
        ];
        let order: Vec<usize> = z_order(&positions).iter().map(|e| e.index).collect();
        assert_eq!(order, vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn index_points_back_at_the_same_card() {
        let positions = vec![card("zo_x", 5), card("zo_y", 1)];
        for entry in z_order(&positions) {
            assert_eq!(positions[entry.index].id, entry.card.id);
        }
    }
}
