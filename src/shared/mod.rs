//! Shared types, resources, events, and states for the harvest planner.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly, except for the pure
//! engine functions re-exported through `planner` and `economy`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::PathBuf;

// ═══════════════════════════════════════════════════════════════════════
// PLANNER STATE: top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum PlannerState {
    #[default]
    Loading,
    Ready,
}

// ═══════════════════════════════════════════════════════════════════════
// CALENDAR
// ═══════════════════════════════════════════════════════════════════════

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn next(self) -> Self {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Fall,
            Season::Fall => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Season::Spring => Season::Winter,
            Season::Summer => Season::Spring,
            Season::Fall => Season::Summer,
            Season::Winter => Season::Fall,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Fall => 2,
            Season::Winter => 3,
        }
    }

    pub fn is_first(self) -> bool {
        self == Season::Spring
    }

    pub fn is_last(self) -> bool {
        self == Season::Winter
    }
}

/// A zero-based position on the perpetual calendar.
///
/// `day` is always in `0..DAYS_PER_SEASON`; the arithmetic that produces
/// dates lives in `crate::calendar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCalendarDate")]
pub struct CalendarDate {
    pub day: u8,
    pub season: Season,
    pub year: u32,
}

/// Unchecked wire form; every deserialized date passes through `try_from`.
#[derive(Deserialize)]
struct RawCalendarDate {
    day: u8,
    season: Season,
    year: u32,
}

impl TryFrom<RawCalendarDate> for CalendarDate {
    type Error = String;

    fn try_from(raw: RawCalendarDate) -> Result<Self, Self::Error> {
        if raw.day >= DAYS_PER_SEASON {
            return Err(format!(
                "day {} is outside 0..{}",
                raw.day, DAYS_PER_SEASON
            ));
        }
        Ok(Self {
            day: raw.day,
            season: raw.season,
            year: raw.year,
        })
    }
}

impl CalendarDate {
    pub fn new(day: u8, season: Season, year: u32) -> Self {
        debug_assert!(day < DAYS_PER_SEASON, "day {} out of range", day);
        Self { day, season, year }
    }

    /// `false` for dates built by hand with a day past the end of the season.
    pub fn is_valid(&self) -> bool {
        self.day < DAYS_PER_SEASON
    }

    /// Days since day 0 of Spring, year 0.
    pub fn ordinal(&self) -> u64 {
        self.year as u64 * DAYS_PER_YEAR as u64
            + self.season.index() as u64 * DAYS_PER_SEASON as u64
            + self.day as u64
    }
}

impl Default for CalendarDate {
    fn default() -> Self {
        Self {
            day: 0,
            season: Season::Spring,
            year: 0,
        }
    }
}

impl Ord for CalendarDate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.season.index(), self.day).cmp(&(
            other.year,
            other.season.index(),
            other.day,
        ))
    }
}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Day {} of {:?}, Year {}",
            self.day + 1,
            self.season,
            self.year as u64 + 1
        )
    }
}

/// The season currently shown by the host's calendar view.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewedSeason {
    pub date: CalendarDate,
}

// ═══════════════════════════════════════════════════════════════════════
// CROP REFERENCE TABLE: loaded from data
// ═══════════════════════════════════════════════════════════════════════

pub type CropId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub id: CropId,
    pub name: String,
    pub seasons: Vec<Season>,
    pub sell_price: u32,
    pub buy_prices: Vec<u32>,
    pub days_to_grow: u8,
    #[serde(default)]
    pub days_to_regrow: Option<u8>,
}

impl Crop {
    pub fn grows_in(&self, season: Season) -> bool {
        self.seasons.contains(&season)
    }

    pub fn regrows(&self) -> bool {
        self.days_to_regrow.is_some()
    }

    /// Offset between successive generations of a chain.
    pub fn chain_offset(&self) -> u32 {
        self.days_to_regrow.unwrap_or(self.days_to_grow) as u32
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct CropRegistry {
    pub crops: HashMap<CropId, Crop>,
}

impl CropRegistry {
    pub fn get(&self, id: &str) -> Option<&Crop> {
        self.crops.get(id)
    }

    /// Crops that can be planted in `season`, sorted by id for stable menus.
    pub fn plantable_in(&self, season: Season) -> Vec<&Crop> {
        let mut crops: Vec<&Crop> = self
            .crops
            .values()
            .filter(|crop| crop.grows_in(season))
            .collect();
        crops.sort_by(|a, b| a.id.cmp(&b.id));
        crops
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SCHEDULE: sparse year → season → day buckets
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropEventKind {
    Plant,
    Harvest,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// The atomic unit stored in a day bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCropEvent {
    pub crop_id: CropId,
    pub amount: u32,
    /// Seed cost for plant events, sell price for harvest events (per unit).
    pub price: u32,
    #[serde(default, skip_serializing_if = "is_false")]
    pub autoplant: bool,
    /// Present on plant events only: the harvest that seeded this chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_harvest_date: Option<CalendarDate>,
}

/// Identity under which two events in the same bucket merge their amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeKey<'a> {
    Plant {
        crop_id: &'a str,
        price: u32,
        autoplant: bool,
        first_harvest_date: Option<CalendarDate>,
    },
    Harvest {
        crop_id: &'a str,
        price: u32,
    },
}

impl StoredCropEvent {
    pub fn plant(
        crop_id: impl Into<CropId>,
        amount: u32,
        price: u32,
        autoplant: bool,
        first_harvest_date: CalendarDate,
    ) -> Self {
        Self {
            crop_id: crop_id.into(),
            amount,
            price,
            autoplant,
            first_harvest_date: Some(first_harvest_date),
        }
    }

    pub fn harvest(crop_id: impl Into<CropId>, amount: u32, price: u32) -> Self {
        Self {
            crop_id: crop_id.into(),
            amount,
            price,
            autoplant: false,
            first_harvest_date: None,
        }
    }

    pub fn merge_key(&self, kind: CropEventKind) -> MergeKey<'_> {
        match kind {
            CropEventKind::Plant => MergeKey::Plant {
                crop_id: &self.crop_id,
                price: self.price,
                autoplant: self.autoplant,
                first_harvest_date: self.first_harvest_date,
            },
            CropEventKind::Harvest => MergeKey::Harvest {
                crop_id: &self.crop_id,
                price: self.price,
            },
        }
    }

    /// `price × amount`, the cost or profit this event contributes.
    pub fn value(&self) -> u64 {
        self.price as u64 * self.amount as u64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plants: Vec<StoredCropEvent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub harvests: Vec<StoredCropEvent>,
}

impl DaySchedule {
    pub fn events(&self, kind: CropEventKind) -> &[StoredCropEvent] {
        match kind {
            CropEventKind::Plant => &self.plants,
            CropEventKind::Harvest => &self.harvests,
        }
    }

    pub fn events_mut(&mut self, kind: CropEventKind) -> &mut Vec<StoredCropEvent> {
        match kind {
            CropEventKind::Plant => &mut self.plants,
            CropEventKind::Harvest => &mut self.harvests,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty() && self.harvests.is_empty()
    }
}

/// One season's day buckets. `None` and an empty bucket mean the same thing;
/// the store normalizes the latter to the former.
pub type SeasonSchedule = [Option<DaySchedule>; DAYS_PER_SEASON as usize];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSchedule {
    /// Indexed by `Season::index()`.
    pub seasons: [SeasonSchedule; SEASONS_PER_YEAR as usize],
}

impl YearSchedule {
    pub fn season(&self, season: Season) -> &SeasonSchedule {
        &self.seasons[season.index()]
    }

    pub fn season_mut(&mut self, season: Season) -> &mut SeasonSchedule {
        &mut self.seasons[season.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.seasons
            .iter()
            .all(|season| season.iter().all(|day| day.is_none()))
    }
}

/// The whole planting document. Years with no entries are simply absent and
/// get materialized on first write.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantingSchedule {
    pub years: BTreeMap<u32, YearSchedule>,
}

/// Payload of the host's planting form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantFormFields {
    pub crop_id: CropId,
    pub amount: u32,
    pub seed_price: u32,
    /// Day (relative to planting) an instant-growth effect was used.
    #[serde(default)]
    pub growth_day_override: Option<u8>,
    #[serde(default)]
    pub autoplant: bool,
}

impl PlantFormFields {
    pub fn new(crop_id: impl Into<CropId>, amount: u32, seed_price: u32) -> Self {
        Self {
            crop_id: crop_id.into(),
            amount,
            seed_price,
            growth_day_override: None,
            autoplant: false,
        }
    }

    pub fn with_autoplant(mut self) -> Self {
        self.autoplant = true;
        self
    }

    pub fn with_growth_day(mut self, day: u8) -> Self {
        self.growth_day_override = Some(day);
        self
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SETTINGS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone)]
pub struct PlannerSettings {
    /// Where `SavePlugin` keeps the schedule document.
    pub save_path: PathBuf,
    /// Persist after every schedule change.
    pub autosave: bool,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        let dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            save_path: dir.join("saves").join("calendar-schedule.json"),
            autosave: true,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// Sent by the host's planting form.
#[derive(Event, Debug, Clone)]
pub struct PlantRequestEvent {
    pub date: CalendarDate,
    pub fields: PlantFormFields,
}

/// Sent by the host's delete action on a stored plant event.
#[derive(Event, Debug, Clone)]
pub struct UnplantRequestEvent {
    pub date: CalendarDate,
    pub event: StoredCropEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearScope {
    Season { year: u32, season: Season },
    Year(u32),
    All,
}

#[derive(Event, Debug, Clone)]
pub struct ClearScheduleEvent {
    pub scope: ClearScope,
}

/// Fired after any successful mutation of `PlantingSchedule`.
#[derive(Event, Debug, Clone)]
pub struct ScheduleChangedEvent;

/// A rejected request, carrying the user-facing message.
#[derive(Event, Debug, Clone)]
pub struct PlannerErrorEvent {
    pub message: String,
}

#[derive(Event, Debug, Clone)]
pub struct NavigateSeasonEvent {
    pub backward: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const DAYS_PER_SEASON: u8 = 28;
pub const SEASONS_PER_YEAR: u8 = 4;
pub const DAYS_PER_YEAR: u32 = DAYS_PER_SEASON as u32 * SEASONS_PER_YEAR as u32;

/// How many years past a chain's planting year a harvest may land.
pub const LOOKAHEAD_YEARS: u32 = 1;

pub const CURRENCY_SUFFIX: &str = "t";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_next_and_previous_cycle() {
        for season in Season::ALL {
            assert_eq!(season.next().previous(), season);
        }
        assert_eq!(Season::Winter.next(), Season::Spring);
        assert_eq!(Season::Spring.previous(), Season::Winter);
    }

    #[test]
    fn test_date_ordering_is_year_season_day() {
        let a = CalendarDate::new(27, Season::Spring, 0);
        let b = CalendarDate::new(0, Season::Summer, 0);
        let c = CalendarDate::new(0, Season::Spring, 1);
        assert!(a < b);
        assert!(b < c);
        assert!(a.ordinal() < b.ordinal());
        assert_eq!(c.ordinal(), DAYS_PER_YEAR as u64);
    }

    #[test]
    fn test_date_display_is_one_based() {
        let date = CalendarDate::new(0, Season::Fall, 2);
        assert_eq!(date.to_string(), "Day 1 of Fall, Year 3");
    }

    #[test]
    fn test_deserialize_rejects_day_past_season_end() {
        let ok: CalendarDate =
            serde_json::from_str(r#"{"day":27,"season":"Winter","year":1}"#).unwrap();
        assert_eq!(ok, CalendarDate::new(27, Season::Winter, 1));

        let err = serde_json::from_str::<StoredCropEvent>(
            r#"{"crop_id":"Corn","amount":1,"price":300,
                "first_harvest_date":{"day":40,"season":"Summer","year":0}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("day 40"), "{}", err);
    }

    #[test]
    fn test_is_valid() {
        assert!(CalendarDate::new(27, Season::Fall, 0).is_valid());
        let hand_built = CalendarDate {
            day: DAYS_PER_SEASON,
            season: Season::Fall,
            year: 0,
        };
        assert!(!hand_built.is_valid());
    }

    #[test]
    fn test_merge_key_for_harvest_ignores_first_harvest_date() {
        let date = CalendarDate::new(5, Season::Summer, 0);
        let mut a = StoredCropEvent::plant("Corn", 1, 300, false, date);
        let b = StoredCropEvent::harvest("Corn", 4, 300);
        assert_eq!(
            a.merge_key(CropEventKind::Harvest),
            b.merge_key(CropEventKind::Harvest)
        );
        assert_ne!(
            a.merge_key(CropEventKind::Plant),
            b.merge_key(CropEventKind::Plant)
        );
        a.autoplant = true;
        let c = StoredCropEvent::plant("Corn", 2, 300, false, date);
        assert_ne!(a.merge_key(CropEventKind::Plant), c.merge_key(CropEventKind::Plant));
    }

    #[test]
    fn test_plantable_in_is_sorted_and_filtered() {
        let mut registry = CropRegistry::default();
        for (id, seasons) in [
            ("Tomato", vec![Season::Summer]),
            ("Corn", vec![Season::Summer]),
            ("Turnip", vec![Season::Spring]),
        ] {
            registry.crops.insert(
                id.to_string(),
                Crop {
                    id: id.to_string(),
                    name: id.to_string(),
                    seasons,
                    sell_price: 10,
                    buy_prices: vec![5],
                    days_to_grow: 3,
                    days_to_regrow: None,
                },
            );
        }
        let ids: Vec<&str> = registry
            .plantable_in(Season::Summer)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["Corn", "Tomato"]);
    }

    #[test]
    fn test_empty_year_schedule_is_empty() {
        let year = YearSchedule::default();
        assert!(year.is_empty());
        assert_eq!(year.season(Season::Winter).len(), DAYS_PER_SEASON as usize);
    }
}
