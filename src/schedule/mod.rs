//! Schedule store: the sparse, year-indexed collection of day buckets.
//!
//! Years are materialized on first write and pruned again once they hold no
//! events, so an untouched year and a fully emptied one compare equal.
//! Every lookup that decides merge-vs-append or which event to reduce goes
//! through `StoredCropEvent::merge_key`, keeping placement and removal
//! symmetric.

use crate::shared::*;

impl PlantingSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.years.values().all(YearSchedule::is_empty)
    }

    pub fn year(&self, year: u32) -> Option<&YearSchedule> {
        self.years.get(&year)
    }

    pub fn season(&self, year: u32, season: Season) -> Option<&SeasonSchedule> {
        self.year(year).map(|y| y.season(season))
    }

    pub fn day(&self, date: CalendarDate) -> Option<&DaySchedule> {
        self.season(date.year, date.season)?
            .get(date.day as usize)?
            .as_ref()
    }

    /// The stored event in `date`'s bucket sharing `event`'s merge key.
    pub fn find(
        &self,
        date: CalendarDate,
        kind: CropEventKind,
        event: &StoredCropEvent,
    ) -> Option<&StoredCropEvent> {
        let key = event.merge_key(kind);
        self.day(date)?
            .events(kind)
            .iter()
            .find(|stored| stored.merge_key(kind) == key)
    }

    /// Every non-empty bucket in calendar order.
    pub fn days(&self) -> impl Iterator<Item = (CalendarDate, &DaySchedule)> {
        self.years.iter().flat_map(|(&year, year_schedule)| {
            Season::ALL.into_iter().flat_map(move |season| {
                year_schedule
                    .season(season)
                    .iter()
                    .enumerate()
                    .filter_map(move |(day, bucket)| {
                        bucket
                            .as_ref()
                            .map(|b| (CalendarDate::new(day as u8, season, year), b))
                    })
            })
        })
    }

    /// Adds `event` to `date`'s bucket, merging amounts with an existing event
    /// of the same identity. Returns `false` for a date whose day lies past
    /// the end of its season, leaving the schedule untouched.
    pub fn insert(
        &mut self,
        date: CalendarDate,
        kind: CropEventKind,
        event: StoredCropEvent,
    ) -> bool {
        debug_assert!(event.amount > 0, "stored events always have a positive amount");
        if !date.is_valid() {
            return false;
        }

        let slot = &mut self
            .years
            .entry(date.year)
            .or_default()
            .season_mut(date.season)[date.day as usize];
        let events = slot.get_or_insert_with(DaySchedule::default).events_mut(kind);

        let key = event.merge_key(kind);
        match events.iter().position(|stored| stored.merge_key(kind) == key) {
            Some(index) => {
                events[index].amount = events[index].amount.saturating_add(event.amount);
            }
            None => events.push(event),
        }
        true
    }

    /// Takes `amount` units away from the event matching `event`'s identity.
    ///
    /// An event whose amount reaches zero is removed; an emptied bucket becomes
    /// absent and an emptied year is dropped. Returns `false` when nothing
    /// matched, leaving the schedule untouched.
    pub fn reduce(
        &mut self,
        date: CalendarDate,
        kind: CropEventKind,
        event: &StoredCropEvent,
        amount: u32,
    ) -> bool {
        let Some(year_schedule) = self.years.get_mut(&date.year) else {
            return false;
        };

        let Some(slot) = year_schedule.season_mut(date.season).get_mut(date.day as usize) else {
            return false;
        };
        let Some(bucket) = slot.as_mut() else {
            return false;
        };

        let key = event.merge_key(kind);
        let events = bucket.events_mut(kind);
        let Some(index) = events.iter().position(|stored| stored.merge_key(kind) == key) else {
            return false;
        };

        let remaining = events[index].amount.saturating_sub(amount);
        if remaining == 0 {
            events.remove(index);
        } else {
            events[index].amount = remaining;
        }

        if bucket.is_empty() {
            *slot = None;
        }
        if year_schedule.is_empty() {
            self.years.remove(&date.year);
        }
        true
    }

    pub fn clear_season(&mut self, year: u32, season: Season) {
        let Some(year_schedule) = self.years.get_mut(&year) else {
            return;
        };
        *year_schedule.season_mut(season) = Default::default();
        if year_schedule.is_empty() {
            self.years.remove(&year);
        }
    }

    pub fn clear_year(&mut self, year: u32) {
        self.years.remove(&year);
    }

    pub fn reset(&mut self) {
        self.years.clear();
    }
}
