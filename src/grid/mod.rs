//! Grid / placement domain — spatial occupancy and collision-free placement.
//!
//! The world is partitioned into fixed-size square cells; each cell holds at
//! most one building spot. Occupancy is a function of the integer
//! world-to-grid mapping, never of pixel overlap. This module also owns the
//! three-phase drag-relocation protocol and the ring search used when a new
//! spot is purchased.

pub mod drag;

use bevy::prelude::*;
use std::collections::HashMap;

use crate::shared::*;

pub use drag::DragState;

pub struct GridPlugin;

impl Plugin for GridPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorkshopGrid>()
            .init_resource::<DragState>();

        // Rebuild occupancy whenever we (re)enter Playing: fresh boot,
        // load, and reset all rewrite WorkshopState first.
        app.configure_sets(
            OnEnter(GameState::Playing),
            EnterPlayingSet::Restore.before(EnterPlayingSet::Rebuild),
        );
        app.add_systems(
            OnEnter(GameState::Playing),
            rebuild_grid.in_set(EnterPlayingSet::Rebuild),
        );

        app.add_systems(
            Update,
            (
                drag::emit_pointer_drag_events,
                drag::handle_drag_start,
                drag::handle_drag_move,
                drag::handle_drag_end,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// GRID RESOURCE
// ═══════════════════════════════════════════════════════════════════════

/// Cell occupancy for building spots, keyed by integer cell coordinates.
#[derive(Resource, Debug, Clone)]
pub struct WorkshopGrid {
    pub cell_size: f32,
    pub cols: i32,
    pub rows: i32,
    cells: HashMap<(i32, i32), String>,
}

impl Default for WorkshopGrid {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            cols: (WORLD_WIDTH / CELL_SIZE).ceil() as i32,
            rows: (WORLD_HEIGHT / CELL_SIZE).ceil() as i32,
            cells: HashMap::new(),
        }
    }
}

impl WorkshopGrid {
    pub fn in_bounds(&self, cell: (i32, i32)) -> bool {
        cell.0 >= 0 && cell.0 < self.cols && cell.1 >= 0 && cell.1 < self.rows
    }

    /// Clamps a world position so its cell mapping stays inside the grid.
    pub fn clamp_to_bounds(&self, pos: Vec2) -> Vec2 {
        let half = self.cell_size / 2.0;
        Vec2::new(
            pos.x.clamp(half, self.cols as f32 * self.cell_size - half),
            pos.y.clamp(half, self.rows as f32 * self.cell_size - half),
        )
    }

    /// World-to-grid mapping: clamp first, then floor-divide by cell size.
    pub fn world_to_cell(&self, pos: Vec2) -> (i32, i32) {
        let p = self.clamp_to_bounds(pos);
        (
            (p.x / self.cell_size).floor() as i32,
            (p.y / self.cell_size).floor() as i32,
        )
    }

    pub fn cell_center(&self, cell: (i32, i32)) -> Vec2 {
        Vec2::new(
            cell.0 as f32 * self.cell_size + self.cell_size / 2.0,
            cell.1 as f32 * self.cell_size + self.cell_size / 2.0,
        )
    }

    pub fn is_free(&self, cell: (i32, i32)) -> bool {
        self.in_bounds(cell) && !self.cells.contains_key(&cell)
    }

    pub fn occupant(&self, cell: (i32, i32)) -> Option<&str> {
        self.cells.get(&cell).map(|s| s.as_str())
    }

    /// Marks the cell holding `pos` as occupied by `spot_id` and returns the
    /// snapped cell-center position. Fails (None, grid unchanged) if the
    /// cell is taken or out of bounds.
    pub fn occupy(&mut self, pos: Vec2, spot_id: &str) -> Option<Vec2> {
        let cell = self.world_to_cell(pos);
        if !self.is_free(cell) {
            return None;
        }
        self.cells.insert(cell, spot_id.to_string());
        Some(self.cell_center(cell))
    }

    /// Frees the cell at `pos` iff it is the one holding `spot_id`.
    pub fn release(&mut self, pos: Vec2, spot_id: &str) {
        let cell = self.world_to_cell(pos);
        if self.cells.get(&cell).is_some_and(|id| id == spot_id) {
            self.cells.remove(&cell);
        }
    }

    /// Frees every cell held by `spot_id`, wherever it is. A state
    /// round-trip can rebuild occupancy while a spot is lifted mid-drag;
    /// drop handling clears such entries before settling.
    pub fn release_all(&mut self, spot_id: &str) {
        self.cells.retain(|_, id| id.as_str() != spot_id);
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.len()
    }

    /// Deterministic fallback for a failed drag drop: scan concentric square
    /// rings around `origin`, row-major within each ring, and return the
    /// first free cell. The search covers the whole grid, so on any grid
    /// with a free cell this cannot fail.
    pub fn nearest_free_cell(&self, origin: (i32, i32)) -> Option<(i32, i32)> {
        if self.is_free(origin) {
            return Some(origin);
        }
        let max_radius = self.cols.max(self.rows);
        for radius in 1..=max_radius {
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if dx.abs() != radius && dy.abs() != radius {
                        continue; // interior of the ring, already scanned
                    }
                    let cell = (origin.0 + dx, origin.1 + dy);
                    if self.is_free(cell) {
                        return Some(cell);
                    }
                }
            }
        }
        None
    }

    /// Rebuild occupancy from scratch. Spots whose cell is already taken are
    /// reported back so the caller can log them; first writer wins.
    pub fn rebuild(&mut self, workshop: &WorkshopState) -> Vec<String> {
        self.cells.clear();
        let mut conflicts = Vec::new();
        for spot in &workshop.buildings {
            let cell = self.world_to_cell(spot.pos());
            if self.cells.contains_key(&cell) {
                conflicts.push(spot.id.clone());
            } else {
                self.cells.insert(cell, spot.id.clone());
            }
        }
        conflicts
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RING SEARCH FOR NEW SPOT PLACEMENT
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotKind {
    Tree,
    Building,
}

/// Is `candidate` far enough from every existing spot for the given kind?
/// Trees tolerate tighter packing than buildings.
pub fn position_clear(candidate: Vec2, kind: SpotKind, workshop: &WorkshopState) -> bool {
    let (tree_buffer, building_buffer) = match kind {
        SpotKind::Tree => (TREE_TREE_BUFFER, TREE_BUILDING_BUFFER),
        SpotKind::Building => (TREE_BUILDING_BUFFER, BUILDING_BUILDING_BUFFER),
    };
    workshop
        .trees
        .iter()
        .all(|t| candidate.distance(t.pos()) >= tree_buffer)
        && workshop
            .buildings
            .iter()
            .all(|b| candidate.distance(b.pos()) >= building_buffer)
}

/// Scan concentric square rings of cells outward from `near` (usually the
/// player's position) and return the first cell-center that satisfies every
/// buffer constraint for `kind` — and, for buildings, whose cell is free.
///
/// Returns None once MAX_PLACEMENT_RADIUS is exhausted; the caller must
/// then reject the purchase without side effects.
pub fn find_free_position(
    grid: &WorkshopGrid,
    workshop: &WorkshopState,
    near: Vec2,
    kind: SpotKind,
) -> Option<Vec2> {
    let origin = grid.world_to_cell(near);
    for radius in 0..=MAX_PLACEMENT_RADIUS {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if radius > 0 && dx.abs() != radius && dy.abs() != radius {
                    continue;
                }
                let cell = (origin.0 + dx, origin.1 + dy);
                if !grid.in_bounds(cell) {
                    continue;
                }
                if kind == SpotKind::Building && !grid.is_free(cell) {
                    continue;
                }
                let candidate = grid.cell_center(cell);
                if position_clear(candidate, kind, workshop) {
                    return Some(candidate);
                }
            }
        }
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

fn rebuild_grid(mut grid: ResMut<WorkshopGrid>, workshop: Res<WorkshopState>) {
    let conflicts = grid.rebuild(&workshop);
    for id in &conflicts {
        warn!("[Grid] Spot '{}' landed on an occupied cell during rebuild", id);
    }
    info!(
        "[Grid] Occupancy rebuilt: {} cells occupied ({} building spots)",
        grid.occupied_count(),
        workshop.buildings.len()
    );
}
