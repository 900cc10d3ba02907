//! Handlers for host requests: PlantRequestEvent, UnplantRequestEvent,
//! ClearScheduleEvent.
//!
//! Each request either mutates `PlantingSchedule` and fires
//! `ScheduleChangedEvent`, or leaves it alone and fires `PlannerErrorEvent`
//! with the message the host should show.

use bevy::prelude::*;
use crate::shared::*;
use super::{plant, unplant};

pub fn handle_plant_requests(
    mut requests: EventReader<PlantRequestEvent>,
    mut schedule: ResMut<PlantingSchedule>,
    crop_registry: Res<CropRegistry>,
    mut changed: EventWriter<ScheduleChangedEvent>,
    mut errors: EventWriter<PlannerErrorEvent>,
) {
    for request in requests.read() {
        match plant(&mut schedule, &crop_registry, request.date, &request.fields) {
            Ok(placement) => {
                info!(
                    "[Planner] Planted {}x {} on {} ({} harvests, {} replants)",
                    request.fields.amount,
                    request.fields.crop_id,
                    request.date,
                    placement.generations.len(),
                    placement.replants.len()
                );
                changed.send(ScheduleChangedEvent);
            }
            Err(e) => {
                if e.is_validation() {
                    warn!(
                        "[Planner] Rejected planting {}x {} on {}: {}",
                        request.fields.amount, request.fields.crop_id, request.date, e
                    );
                } else {
                    error!("[Planner] Bad planting request on {}: {}", request.date, e);
                }
                errors.send(PlannerErrorEvent {
                    message: e.to_string(),
                });
            }
        }
    }
}

pub fn handle_unplant_requests(
    mut requests: EventReader<UnplantRequestEvent>,
    mut schedule: ResMut<PlantingSchedule>,
    crop_registry: Res<CropRegistry>,
    mut changed: EventWriter<ScheduleChangedEvent>,
    mut errors: EventWriter<PlannerErrorEvent>,
) {
    for request in requests.read() {
        match unplant(&mut schedule, &crop_registry, request.date, &request.event) {
            Ok(removal) => {
                info!(
                    "[Planner] Removed {}x {} planted on {} ({} harvests, {} replants)",
                    request.event.amount,
                    request.event.crop_id,
                    request.date,
                    removal.harvests_removed,
                    removal.replants_removed
                );
                changed.send(ScheduleChangedEvent);
            }
            Err(e) => {
                if e.is_validation() {
                    warn!(
                        "[Planner] Rejected removal of {} on {}: {}",
                        request.event.crop_id, request.date, e
                    );
                } else {
                    error!("[Planner] Bad removal request on {}: {}", request.date, e);
                }
                errors.send(PlannerErrorEvent {
                    message: e.to_string(),
                });
            }
        }
    }
}

pub fn handle_clear_requests(
    mut requests: EventReader<ClearScheduleEvent>,
    mut schedule: ResMut<PlantingSchedule>,
    mut viewed: ResMut<ViewedSeason>,
    mut changed: EventWriter<ScheduleChangedEvent>,
) {
    for request in requests.read() {
        match request.scope {
            ClearScope::Season { year, season } => {
                schedule.clear_season(year, season);
                info!("[Planner] Cleared {:?} Year {}", season, year as u64 + 1);
            }
            ClearScope::Year(year) => {
                schedule.clear_year(year);
                info!("[Planner] Cleared Year {}", year as u64 + 1);
            }
            ClearScope::All => {
                schedule.reset();
                *viewed = ViewedSeason::default();
                info!("[Planner] Cleared the whole schedule");
            }
        }
        changed.send(ScheduleChangedEvent);
    }
}
