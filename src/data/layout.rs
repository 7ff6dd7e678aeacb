use crate::shared::*;

/// The initial workshop layout.
///
/// Buildings sit on the right half of the world, trees on the left. All
/// positions respect the placement buffers, and every building position
/// maps to a distinct grid cell — `tests` below pin both invariants.
/// Unlock order is a presentation hint: cheaper slots come first.
pub fn initial_building_spots() -> Vec<BuildingSpot> {
    let spots: [(&str, BuildingKind, f32, f32, u32); 11] = [
        // Row 1 — starter buildings
        ("toy_1", BuildingKind::ToyMaker, 600.0, 250.0, 1),
        ("toy_2", BuildingKind::ToyMaker, 760.0, 240.0, 2),
        // Row 2 — early production
        ("gift_1", BuildingKind::GiftWrapper, 600.0, 410.0, 3),
        ("cookie_1", BuildingKind::CookieFactory, 760.0, 400.0, 4),
        ("gift_2", BuildingKind::GiftWrapper, 920.0, 320.0, 5),
        // Row 3 — mid game
        ("elf_1", BuildingKind::ElfHouse, 600.0, 570.0, 6),
        ("cookie_2", BuildingKind::CookieFactory, 760.0, 560.0, 7),
        ("reindeer_1", BuildingKind::ReindeerStable, 920.0, 480.0, 8),
        // Row 4 — late game
        ("elf_2", BuildingKind::ElfHouse, 600.0, 720.0, 9),
        ("candy_1", BuildingKind::CandyCaneForge, 760.0, 710.0, 10),
        ("santas_office", BuildingKind::SantasOffice, 920.0, 640.0, 11),
    ];

    spots
        .into_iter()
        .map(|(id, kind, x, y, order)| BuildingSpot {
            id: id.to_string(),
            kind,
            x,
            y,
            state: BuildingState::Broken,
            level: 1,
            unlock_order: order,
        })
        .collect()
}

/// Six tree slots: one free pre-planted starter, five purchasable with a
/// roughly ×2 cost ladder. Trees give active click income between ticks.
pub fn initial_tree_spots() -> Vec<TreeSpot> {
    let spots: [(&str, f32, f32, u32, bool, u64); 6] = [
        ("tree_1", 200.0, 300.0, 1, true, 0),
        ("tree_2", 200.0, 450.0, 2, false, 70),
        ("tree_3", 350.0, 250.0, 3, false, 150),
        ("tree_4", 350.0, 400.0, 4, false, 300),
        ("tree_5", 200.0, 600.0, 5, false, 600),
        ("tree_6", 350.0, 550.0, 6, false, 1_200),
    ];

    spots
        .into_iter()
        .map(|(id, x, y, order, planted, cost)| TreeSpot {
            id: id.to_string(),
            x,
            y,
            cost,
            planted,
            unlock_order: order,
            cooldown_ms: 0.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_of(x: f32, y: f32) -> (i32, i32) {
        ((x / CELL_SIZE).floor() as i32, (y / CELL_SIZE).floor() as i32)
    }

    #[test]
    fn test_building_positions_map_to_distinct_cells() {
        let spots = initial_building_spots();
        for (i, a) in spots.iter().enumerate() {
            for b in &spots[i + 1..] {
                assert_ne!(
                    cell_of(a.x, a.y),
                    cell_of(b.x, b.y),
                    "{} and {} share a grid cell",
                    a.id,
                    b.id
                );
            }
        }
    }

    #[test]
    fn test_layout_respects_buffers() {
        let buildings = initial_building_spots();
        let trees = initial_tree_spots();
        for (i, a) in buildings.iter().enumerate() {
            for b in &buildings[i + 1..] {
                assert!(
                    a.pos().distance(b.pos()) >= BUILDING_BUILDING_BUFFER,
                    "{} too close to {}",
                    a.id,
                    b.id
                );
            }
        }
        for (i, a) in trees.iter().enumerate() {
            for b in &trees[i + 1..] {
                assert!(
                    a.pos().distance(b.pos()) >= TREE_TREE_BUFFER,
                    "{} too close to {}",
                    a.id,
                    b.id
                );
            }
            for b in &buildings {
                assert!(
                    a.pos().distance(b.pos()) >= TREE_BUILDING_BUFFER,
                    "{} too close to {}",
                    a.id,
                    b.id
                );
            }
        }
    }

    #[test]
    fn test_positions_inside_world() {
        for s in initial_building_spots() {
            assert!(s.x > 0.0 && s.x < WORLD_WIDTH);
            assert!(s.y > 0.0 && s.y < WORLD_HEIGHT);
        }
        for t in initial_tree_spots() {
            assert!(t.x > 0.0 && t.x < WORLD_WIDTH);
            assert!(t.y > 0.0 && t.y < WORLD_HEIGHT);
        }
    }
}
