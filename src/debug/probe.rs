//! Read-only inspection of the map under a screen position.

use std::fmt;

use serde::Serialize;

use crate::core::camera::ViewState;
use crate::core::input::{Action, ActionInput};
use crate::core::types::Vec2;
use crate::world::entity::{EntityId, EntityRef};
use crate::world::index::SpatialIndex;
use crate::world::query::CellCoord;

/// Entity listed in a probe report
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProbeEntity {
    pub id: EntityId,
    pub name: String,
}

/// What lies under a probed screen position
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProbeReport {
    pub screen: [f32; 2],
    pub world: [f32; 2],
    /// Fine cell, if inside the grid
    pub cell: Option<CellCoord>,
    /// Chunk bucket index, if inside the chunk grid
    pub chunk: Option<usize>,
    /// Entities registered in that chunk
    pub entities: Vec<ProbeEntity>,
    /// Occupancy of the fine cell
    pub occupied: bool,
}

impl ProbeReport {
    /// No entity registered in the probed chunk
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Probe at ({:.1}, {:.1})", self.world[0], self.world[1])?;
        match self.cell {
            Some(cell) => write!(f, " cell ({}, {})", cell.x, cell.y)?,
            None => write!(f, " outside grid")?,
        }

        match self.chunk {
            Some(chunk) if self.entities.is_empty() => write!(f, "; chunk {} empty", chunk)?,
            Some(chunk) => {
                write!(f, "; chunk {}:", chunk)?;
                for entity in &self.entities {
                    write!(f, " {} {}", entity.name, entity.id)?;
                }
            }
            None => write!(f, "; no chunk")?,
        }

        let occupancy = if self.occupied { "occupied" } else { "not occupied" };
        write!(f, "; cell {}", occupancy)
    }
}

/// Report the chunk contents and occupancy under `screen`.
pub fn inspect(index: &SpatialIndex, view: &ViewState, screen: Vec2) -> ProbeReport {
    let world = view.screen_to_world(screen);

    let (chunk, entities) = match index.chunks().chunk_of(world) {
        Some((bucket, chunk)) => {
            let entities = bucket
                .iter()
                .map(|e| ProbeEntity { id: e.id(), name: e.name().to_string() })
                .collect();
            (Some(chunk), entities)
        }
        None => (None, Vec::new()),
    };

    ProbeReport {
        screen: screen.to_array(),
        world: world.to_array(),
        cell: index.layout().cell_of(world),
        chunk,
        entities,
        occupied: index.is_blocked(world),
    }
}

/// Entity under `screen`, only within the play area between the HUD bars.
pub fn pick<'a>(index: &'a SpatialIndex, view: &ViewState, screen: Vec2) -> Option<&'a EntityRef> {
    let world = view.screen_to_world(screen);
    if !view.in_play_area(world) {
        return None;
    }
    index.entity_at(world)
}

/// Probes the cursor whenever the probe action fires.
#[derive(Default)]
pub struct DebugProbe {
    last: Option<ProbeReport>,
}

impl DebugProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect under the cursor if the probe action was just pressed
    pub fn update(
        &mut self,
        input: &dyn ActionInput,
        index: &SpatialIndex,
        view: &ViewState,
    ) -> Option<&ProbeReport> {
        if !input.just_pressed(Action::Probe) {
            return None;
        }

        let report = inspect(index, view, input.cursor_position());
        log::info!("{}", report);
        self.last = Some(report);
        self.last.as_ref()
    }

    /// Most recent report
    pub fn last_report(&self) -> Option<&ProbeReport> {
        self.last.as_ref()
    }
}
