//! Calendar domain: date arithmetic for the perpetual 28-day-season calendar.
//!
//! Responsible for:
//! - Advancing a date by a day offset across season and year boundaries
//! - Stepping to the adjacent season (navigation only, never event placement)
//! - Counting inclusive day spans between two dates
//! - Moving the viewed season when a NavigateSeasonEvent arrives
//!
//! Years are unbounded going forward; nothing exists before Spring of year 0.

use bevy::prelude::*;

use crate::shared::*;

pub struct CalendarPlugin;

impl Plugin for CalendarPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            navigate_season.run_if(in_state(PlannerState::Ready)),
        );
    }
}

// ─── Arithmetic ───────────────────────────────────────────────────────────────

impl CalendarDate {
    /// The date `offset_days` later. Always normalizes `day` back into
    /// `0..DAYS_PER_SEASON`. Returns `None` past the last representable year.
    pub fn advance(self, offset_days: u32) -> Option<Self> {
        let days_per_season = DAYS_PER_SEASON as u32;
        let mut day = (self.day as u32).checked_add(offset_days)?;
        let mut season = self.season;
        let mut year = self.year;

        while day >= days_per_season {
            day -= days_per_season;
            if season.is_last() {
                year = year.checked_add(1)?;
            }
            season = season.next();
        }

        Some(Self {
            day: day as u8,
            season,
            year,
        })
    }

    /// Same day-of-season in the adjacent season. Returns `None` when stepping
    /// backward from Spring of year 0 or forward from Winter of the last year.
    pub fn step(self, backward: bool) -> Option<Self> {
        if backward {
            if self.season.is_first() {
                let year = self.year.checked_sub(1)?;
                return Some(Self {
                    season: Season::Winter,
                    year,
                    ..self
                });
            }
            Some(Self {
                season: self.season.previous(),
                ..self
            })
        } else {
            let year = if self.season.is_last() {
                self.year.checked_add(1)?
            } else {
                self.year
            };
            Some(Self {
                season: self.season.next(),
                year,
                ..self
            })
        }
    }

    /// Every season from this date's season through `end`'s season, inclusive.
    /// Empty when `end` lies in an earlier season.
    pub fn seasons_through(self, end: CalendarDate) -> impl Iterator<Item = Season> {
        let per_year = SEASONS_PER_YEAR as u64;
        let start = self.year as u64 * per_year + self.season.index() as u64;
        let stop = end.year as u64 * per_year + end.season.index() as u64;
        (start..=stop).map(move |i| Season::ALL[(i % per_year) as usize])
    }
}

/// Number of calendar days covered by `start..=end`, in either order.
pub fn days_spanned_inclusive(start: CalendarDate, end: CalendarDate) -> u64 {
    start.ordinal().abs_diff(end.ordinal()) + 1
}

// ─── Systems ──────────────────────────────────────────────────────────────────

fn navigate_season(
    mut events: EventReader<NavigateSeasonEvent>,
    mut viewed: ResMut<ViewedSeason>,
) {
    for event in events.read() {
        match viewed.date.step(event.backward) {
            Some(date) => {
                viewed.date = date;
                info!("[Calendar] Viewing {:?} Year {}", date.season, date.year as u64 + 1);
            }
            None => {
                info!(
                    "[Calendar] No season {} {:?} Year {}",
                    if event.backward { "before" } else { "after" },
                    viewed.date.season,
                    viewed.date.year as u64 + 1
                );
            }
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u8, season: Season, year: u32) -> CalendarDate {
        CalendarDate::new(day, season, year)
    }

    #[test]
    fn test_advance_within_season() {
        assert_eq!(
            date(0, Season::Summer, 0).advance(5),
            Some(date(5, Season::Summer, 0))
        );
    }

    #[test]
    fn test_advance_zero_is_identity() {
        let d = date(27, Season::Fall, 3);
        assert_eq!(d.advance(0), Some(d));
    }

    #[test]
    fn test_advance_rolls_into_next_season() {
        assert_eq!(
            date(26, Season::Summer, 0).advance(5),
            Some(date(3, Season::Fall, 0))
        );
    }

    #[test]
    fn test_advance_rolls_winter_into_next_year() {
        assert_eq!(
            date(27, Season::Winter, 1).advance(1),
            Some(date(0, Season::Spring, 2))
        );
    }

    #[test]
    fn test_advance_never_emits_day_28() {
        let start = date(0, Season::Spring, 0);
        for offset in 0..500 {
            let d = start.advance(offset).unwrap();
            assert!(d.day < DAYS_PER_SEASON, "offset {} produced day {}", offset, d.day);
            assert_eq!(d.ordinal(), start.ordinal() + offset as u64);
        }
    }

    #[test]
    fn test_advance_spans_multiple_years() {
        assert_eq!(
            date(10, Season::Fall, 0).advance(DAYS_PER_YEAR * 2),
            Some(date(10, Season::Fall, 2))
        );
    }

    #[test]
    fn test_step_forward_wraps_year() {
        assert_eq!(
            date(4, Season::Winter, 0).step(false),
            Some(date(4, Season::Spring, 1))
        );
        assert_eq!(
            date(4, Season::Spring, 0).step(false),
            Some(date(4, Season::Summer, 0))
        );
    }

    #[test]
    fn test_step_backward() {
        assert_eq!(
            date(9, Season::Spring, 1).step(true),
            Some(date(9, Season::Winter, 0))
        );
        assert_eq!(
            date(9, Season::Fall, 1).step(true),
            Some(date(9, Season::Summer, 1))
        );
    }

    #[test]
    fn test_step_backward_before_time_begins() {
        assert_eq!(date(0, Season::Spring, 0).step(true), None);
    }

    #[test]
    fn test_last_year_does_not_wrap() {
        let last = date(27, Season::Winter, u32::MAX);
        assert_eq!(last.advance(1), None);
        assert_eq!(last.step(false), None);
        assert_eq!(
            date(27, Season::Fall, u32::MAX).advance(1),
            Some(date(0, Season::Winter, u32::MAX))
        );
        assert_eq!(
            last.step(true),
            Some(date(27, Season::Fall, u32::MAX))
        );
    }

    #[test]
    fn test_seasons_through_crosses_year() {
        let seasons: Vec<Season> = date(20, Season::Fall, 0)
            .seasons_through(date(2, Season::Spring, 1))
            .collect();
        assert_eq!(seasons, vec![Season::Fall, Season::Winter, Season::Spring]);
    }

    #[test]
    fn test_seasons_through_same_season() {
        let seasons: Vec<Season> = date(1, Season::Summer, 0)
            .seasons_through(date(20, Season::Summer, 0))
            .collect();
        assert_eq!(seasons, vec![Season::Summer]);
    }

    #[test]
    fn test_days_spanned_inclusive() {
        let a = date(0, Season::Summer, 0);
        assert_eq!(days_spanned_inclusive(a, a), 1);
        assert_eq!(days_spanned_inclusive(a, date(26, Season::Summer, 0)), 27);
        assert_eq!(days_spanned_inclusive(date(26, Season::Summer, 0), a), 27);
        assert_eq!(days_spanned_inclusive(a, date(0, Season::Fall, 0)), 29);
    }
}
