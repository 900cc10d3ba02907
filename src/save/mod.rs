use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// PUBLIC TYPES
// ═══════════════════════════════════════════════════════════════════════

pub const SAVE_VERSION: u32 = 1;

/// The document kept at `PlannerSettings::save_path`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSaveFile {
    pub version: u32,
    pub viewed: CalendarDate,
    pub schedule: PlantingSchedule,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// Sent by the host to persist the schedule right now.
#[derive(Event, Debug, Clone)]
pub struct SaveRequestEvent;

/// Sent by the host to replace the schedule with what is on disk.
#[derive(Event, Debug, Clone)]
pub struct LoadRequestEvent;

/// Sent by SavePlugin after a save completes (success or failure).
#[derive(Event, Debug, Clone)]
pub struct SaveCompleteEvent {
    pub success: bool,
    pub error_message: Option<String>,
}

/// Sent by SavePlugin after a load completes.
#[derive(Event, Debug, Clone)]
pub struct LoadCompleteEvent {
    pub success: bool,
    pub error_message: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app
            // Events emitted/received by this plugin
            .add_event::<SaveRequestEvent>()
            .add_event::<LoadRequestEvent>()
            .add_event::<SaveCompleteEvent>()
            .add_event::<LoadCompleteEvent>()
            // Pick up where the last session left off
            .add_systems(OnEnter(PlannerState::Ready), request_initial_load)
            .add_systems(
                Update,
                (autosave_on_change, handle_save_request, handle_load_request)
                    .chain()
                    .run_if(in_state(PlannerState::Ready)),
            );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SAVE / LOAD LOGIC
// ═══════════════════════════════════════════════════════════════════════

pub fn write_schedule(
    path: &Path,
    viewed: CalendarDate,
    schedule: &PlantingSchedule,
) -> Result<(), String> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .map_err(|e| format!("Could not create saves directory: {}", e))?;
    }

    let file = ScheduleSaveFile {
        version: SAVE_VERSION,
        viewed,
        schedule: schedule.clone(),
    };

    let json =
        serde_json::to_string_pretty(&file).map_err(|e| format!("Serialization failed: {}", e))?;

    // Write to a temp file first, then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, &json)
        .map_err(|e| format!("Write failed for {}: {}", tmp_path.display(), e))?;
    fs::rename(&tmp_path, path).map_err(|e| format!("Rename failed: {}", e))?;

    Ok(())
}

/// Reads the document at `path`. A missing file is an empty schedule.
pub fn read_schedule(path: &Path) -> Result<ScheduleSaveFile, String> {
    if !path.exists() {
        return Ok(ScheduleSaveFile {
            version: SAVE_VERSION,
            ..Default::default()
        });
    }
    let json = fs::read_to_string(path)
        .map_err(|e| format!("Read failed for {}: {}", path.display(), e))?;
    let file: ScheduleSaveFile =
        serde_json::from_str(&json).map_err(|e| format!("Deserialization failed: {}", e))?;

    if file.version != SAVE_VERSION {
        warn!(
            "Schedule at {} has version {} but current version is {}. Attempting to load anyway.",
            path.display(),
            file.version,
            SAVE_VERSION
        );
    }

    Ok(file)
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

fn request_initial_load(mut load_writer: EventWriter<LoadRequestEvent>) {
    load_writer.send(LoadRequestEvent);
}

/// Every successful mutation is persisted when autosave is on.
fn autosave_on_change(
    mut changed_events: EventReader<ScheduleChangedEvent>,
    mut save_writer: EventWriter<SaveRequestEvent>,
    settings: Res<PlannerSettings>,
) {
    // Several changes in one frame only need one save.
    if changed_events.read().count() > 0 && settings.autosave {
        save_writer.send(SaveRequestEvent);
    }
}

fn handle_save_request(
    mut save_events: EventReader<SaveRequestEvent>,
    mut complete_events: EventWriter<SaveCompleteEvent>,
    settings: Res<PlannerSettings>,
    schedule: Res<PlantingSchedule>,
    viewed: Res<ViewedSeason>,
) {
    if save_events.read().count() == 0 {
        return;
    }

    match write_schedule(&settings.save_path, viewed.date, &schedule) {
        Ok(()) => {
            info!("Saved schedule to {}", settings.save_path.display());
            complete_events.send(SaveCompleteEvent {
                success: true,
                error_message: None,
            });
        }
        Err(e) => {
            warn!("Saving schedule FAILED: {}", e);
            complete_events.send(SaveCompleteEvent {
                success: false,
                error_message: Some(e),
            });
        }
    }
}

fn handle_load_request(
    mut load_events: EventReader<LoadRequestEvent>,
    mut complete_events: EventWriter<LoadCompleteEvent>,
    settings: Res<PlannerSettings>,
    mut schedule: ResMut<PlantingSchedule>,
    mut viewed: ResMut<ViewedSeason>,
) {
    if load_events.read().count() == 0 {
        return;
    }

    match read_schedule(&settings.save_path) {
        Ok(file) => {
            *schedule = file.schedule;
            viewed.date = file.viewed;
            info!(
                "Loaded schedule from {} ({} years)",
                settings.save_path.display(),
                schedule.years.len()
            );
            complete_events.send(LoadCompleteEvent {
                success: true,
                error_message: None,
            });
        }
        Err(e) => {
            warn!("Loading schedule FAILED: {}", e);
            complete_events.send(LoadCompleteEvent {
                success: false,
                error_message: Some(e),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("harvest_planner_save_{}_{}", name, std::process::id()))
            .join("calendar-schedule.json")
    }

    fn sample_schedule() -> PlantingSchedule {
        let mut schedule = PlantingSchedule::new();
        let plant_day = CalendarDate::new(0, Season::Summer, 0);
        let harvest_day = CalendarDate::new(5, Season::Summer, 0);
        schedule.insert(
            plant_day,
            CropEventKind::Plant,
            StoredCropEvent::plant("Corn", 2, 300, false, harvest_day),
        );
        schedule.insert(
            harvest_day,
            CropEventKind::Harvest,
            StoredCropEvent::harvest("Corn", 2, 125),
        );
        schedule
    }

    #[test]
    fn test_write_then_read_restores_schedule() {
        let path = temp_path("roundtrip");
        let viewed = CalendarDate::new(3, Season::Fall, 1);
        let schedule = sample_schedule();

        write_schedule(&path, viewed, &schedule).unwrap();
        let file = read_schedule(&path).unwrap();

        assert_eq!(file.version, SAVE_VERSION);
        assert_eq!(file.viewed, viewed);
        assert_eq!(file.schedule, schedule);
        assert!(!path.with_extension("json.tmp").exists());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let path = temp_path("missing");
        let file = read_schedule(&path).unwrap();
        assert!(file.schedule.is_empty());
        assert_eq!(file.viewed, CalendarDate::default());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let err = read_schedule(&path).unwrap_err();
        assert!(err.starts_with("Deserialization failed"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
