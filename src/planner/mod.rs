//! Planner domain: placing plantings on the schedule and taking them back off.
//!
//! `plant` and `unplant` are pure engine functions over an explicit
//! `PlantingSchedule`; the plugin only routes host requests into them and
//! reports the outcome. Communicates with other domains exclusively through
//! crate::shared events/resources.

use bevy::prelude::*;
use crate::shared::*;

pub mod chain;
pub mod events_handler;
pub mod plant;
pub mod unplant;

pub use chain::{harvest_date, Generation, GenerationChain};
pub use plant::{plant, Placement};
pub use unplant::{unplant, Removal};

pub struct PlannerPlugin;

impl Plugin for PlannerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                events_handler::handle_plant_requests,
                events_handler::handle_unplant_requests,
                events_handler::handle_clear_requests,
            )
                .chain()
                .run_if(in_state(PlannerState::Ready)),
        );
    }
}
