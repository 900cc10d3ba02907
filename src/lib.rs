//! Harvest planner library crate.
//!
//! `HarvestPlannerPlugin` wires every domain into a host `App` the same way
//! a game's `main` would. The engine functions (`planner::plant`,
//! `planner::unplant`, `economy::stats::*`) can also be called directly
//! without any app at all.

use bevy::prelude::*;

pub mod shared;
pub mod error;
pub mod calendar;
pub mod data;
pub mod schedule;
pub mod planner;
pub mod economy;
pub mod save;

pub use error::PlannerError;

use shared::*;

pub struct HarvestPlannerPlugin;

impl Plugin for HarvestPlannerPlugin {
    fn build(&self, app: &mut App) {
        app
            // Planner state
            .init_state::<PlannerState>()
            // Shared resources
            .init_resource::<PlantingSchedule>()
            .init_resource::<ViewedSeason>()
            .init_resource::<CropRegistry>()
            .init_resource::<PlannerSettings>()
            // Events
            .add_event::<PlantRequestEvent>()
            .add_event::<UnplantRequestEvent>()
            .add_event::<ClearScheduleEvent>()
            .add_event::<ScheduleChangedEvent>()
            .add_event::<PlannerErrorEvent>()
            .add_event::<NavigateSeasonEvent>()
            // Domain plugins
            .add_plugins(calendar::CalendarPlugin)
            .add_plugins(planner::PlannerPlugin)
            .add_plugins(economy::EconomyPlugin)
            .add_plugins(save::SavePlugin)
            // Data loading
            .add_plugins(data::DataPlugin);
    }
}
