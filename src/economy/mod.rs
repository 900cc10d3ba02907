//! Economy domain: what the schedule costs and earns.
//!
//! The aggregators in `stats` are pure functions over schedule buckets.
//! The plugin keeps a `SeasonSummary` for the viewed season up to date so a
//! host can read it without recomputing anything.

use bevy::prelude::*;
use crate::shared::*;

pub mod stats;

use stats::{format_signed, rank_crops, season_stats, CropRanking, SeasonStats};

// ─────────────────────────────────────────────────────────────────────────────
// Plugin
// ─────────────────────────────────────────────────────────────────────────────

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SeasonSummary>();

        app.add_systems(
            Update,
            refresh_season_summary.run_if(in_state(PlannerState::Ready)),
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Resources
// ─────────────────────────────────────────────────────────────────────────────

/// Totals for the season currently being viewed.
#[derive(Resource, Debug, Clone, Default)]
pub struct SeasonSummary {
    pub year: u32,
    pub season: Season,
    pub stats: SeasonStats,
    /// `None` when the season breaks even.
    pub revenue_label: Option<String>,
    /// Crops worth planting on the viewed date, best first.
    pub best_crops: Vec<CropRanking>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

pub fn refresh_season_summary(
    schedule: Res<PlantingSchedule>,
    viewed: Res<ViewedSeason>,
    crop_registry: Res<CropRegistry>,
    mut summary: ResMut<SeasonSummary>,
) {
    if !(schedule.is_changed() || viewed.is_changed() || crop_registry.is_changed()) {
        return;
    }

    let date = viewed.date;
    let stats = schedule
        .season(date.year, date.season)
        .map(|buckets| season_stats(buckets))
        .unwrap_or_default();

    *summary = SeasonSummary {
        year: date.year,
        season: date.season,
        stats,
        revenue_label: format_signed(stats.revenue),
        best_crops: rank_crops(&crop_registry, date),
    };
}
