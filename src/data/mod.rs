//! Data layer: populates the crop reference table at startup.
//!
//! This plugin runs in OnEnter(PlannerState::Loading), fills the
//! CropRegistry from the built-in RON table, then transitions the planner
//! into PlannerState::Ready. The engine only ever reads the registry.

pub mod crops;

use bevy::prelude::*;
use crate::shared::*;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(PlannerState::Loading), load_all_data);
    }
}

fn load_all_data(
    mut crop_registry: ResMut<CropRegistry>,
    mut next_state: ResMut<NextState<PlannerState>>,
) {
    info!("DataPlugin: populating registries…");

    match crops::populate_crops(&mut crop_registry) {
        Ok(()) => info!("  Crops loaded: {}", crop_registry.crops.len()),
        Err(e) => error!("  Built-in crop table is malformed: {}", e),
    }

    next_state.set(PlannerState::Ready);
}
