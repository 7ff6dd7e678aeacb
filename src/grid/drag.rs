//! Drag relocation for building spots.
//!
//! Three phases: press on an occupied cell lifts the spot (its cell is
//! released immediately), the spot follows the pointer while held, and the
//! release snaps it to the drop cell's center. If the drop cell is taken,
//! the nearest free cell wins; a full grid puts the spot back where it was.

use bevy::prelude::*;

use super::WorkshopGrid;
use crate::shared::*;

#[derive(Resource, Debug, Clone, Default)]
pub struct DragState {
    pub active: Option<ActiveDrag>,
}

#[derive(Debug, Clone)]
pub struct ActiveDrag {
    pub spot_id: String,
    /// Position at lift, for revert when the grid has no free cell.
    pub origin: Vec2,
}

/// Translate raw pointer state into the drag event protocol.
pub fn emit_pointer_drag_events(
    input: Res<PlayerInput>,
    drag: Res<DragState>,
    grid: Res<WorkshopGrid>,
    mut start_writer: EventWriter<DragStartEvent>,
    mut move_writer: EventWriter<DragMoveEvent>,
    mut end_writer: EventWriter<DragEndEvent>,
) {
    let Some(pointer) = input.cursor_world else {
        // Pointer left the window mid-drag: treat as a drop.
        if drag.active.is_some() && input.pointer_released {
            end_writer.send(DragEndEvent);
        }
        return;
    };

    if input.pointer_pressed && drag.active.is_none() {
        let cell = grid.world_to_cell(pointer);
        if let Some(spot_id) = grid.occupant(cell) {
            start_writer.send(DragStartEvent {
                spot_id: spot_id.to_string(),
                pointer,
            });
        }
    } else if input.pointer_down && drag.active.is_some() {
        move_writer.send(DragMoveEvent { pointer });
    } else if input.pointer_released && drag.active.is_some() {
        end_writer.send(DragEndEvent);
    }
}

pub fn handle_drag_start(
    mut events: EventReader<DragStartEvent>,
    mut drag: ResMut<DragState>,
    mut grid: ResMut<WorkshopGrid>,
    workshop: Res<WorkshopState>,
) {
    for event in events.read() {
        let Some(spot) = workshop.building(&event.spot_id) else {
            warn!("[Drag] Start for unknown spot '{}'", event.spot_id);
            continue;
        };
        grid.release(spot.pos(), &spot.id);
        drag.active = Some(ActiveDrag {
            spot_id: spot.id.clone(),
            origin: spot.pos(),
        });
        info!("[Drag] Lifted '{}'", spot.id);
    }
}

pub fn handle_drag_move(
    mut events: EventReader<DragMoveEvent>,
    drag: Res<DragState>,
    grid: Res<WorkshopGrid>,
    mut workshop: ResMut<WorkshopState>,
) {
    // Only the last move of the frame matters.
    let Some(event) = events.read().last() else {
        return;
    };
    let Some(active) = &drag.active else { return };
    let pos = grid.clamp_to_bounds(event.pointer);
    if let Some(spot) = workshop.building_mut(&active.spot_id) {
        spot.x = pos.x;
        spot.y = pos.y;
    }
}

pub fn handle_drag_end(
    mut events: EventReader<DragEndEvent>,
    mut drag: ResMut<DragState>,
    mut grid: ResMut<WorkshopGrid>,
    mut workshop: ResMut<WorkshopState>,
) {
    if events.read().next().is_none() {
        return;
    }
    events.clear();
    let Some(active) = drag.active.take() else { return };
    let Some(spot) = workshop.building_mut(&active.spot_id) else {
        return;
    };

    // A panel round-trip mid-drag re-enters Playing and rebuilds occupancy,
    // re-occupying the lifted spot's cell under its own id. Clear our own
    // entries first so the drop check never collides with ourselves.
    grid.release_all(&spot.id);

    let drop_cell = grid.world_to_cell(spot.pos());
    let target = if grid.is_free(drop_cell) {
        Some(drop_cell)
    } else {
        grid.nearest_free_cell(drop_cell)
    };

    let landed = match target {
        Some(cell) => grid.cell_center(cell),
        // Full grid: put it back. The origin cell was released at lift,
        // so re-occupying it cannot fail.
        None => active.origin,
    };
    spot.x = landed.x;
    spot.y = landed.y;
    if grid.occupy(landed, &spot.id).is_none() {
        warn!("[Drag] Could not settle '{}', occupancy out of sync", spot.id);
    }
    info!(
        "[Drag] Dropped '{}' at ({:.0}, {:.0})",
        spot.id, landed.x, landed.y
    );
}
