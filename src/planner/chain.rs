//! Generation chains: the successive (plant, harvest) pairs one planting
//! produces through regrowth or auto-replanting.

use crate::shared::*;

/// Where a generation planted on `plant_date` is harvested `offset` days
/// later, or `None` when it never gets there.
///
/// The crop has to be able to grow in every season from planting through
/// harvest, and the harvest may land at most `LOOKAHEAD_YEARS` past the
/// chain's original planting year.
pub fn harvest_date(
    crop: &Crop,
    plant_date: CalendarDate,
    offset: u32,
    origin_year: u32,
) -> Option<CalendarDate> {
    let harvest = plant_date.advance(offset)?;
    if harvest.year > origin_year.saturating_add(LOOKAHEAD_YEARS) {
        return None;
    }
    if !plant_date.seasons_through(harvest).all(|season| crop.grows_in(season)) {
        return None;
    }
    Some(harvest)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation {
    pub plant_date: CalendarDate,
    pub harvest_date: CalendarDate,
}

/// Yields the first generation as given, then every following generation
/// spaced by `Crop::chain_offset`, until `harvest_date` rejects one.
///
/// Crops that neither regrow nor auto-replant stop after the first.
#[derive(Debug, Clone)]
pub struct GenerationChain<'a> {
    crop: &'a Crop,
    origin_year: u32,
    continues: bool,
    upcoming: Option<Generation>,
}

impl<'a> GenerationChain<'a> {
    pub fn new(
        crop: &'a Crop,
        origin: CalendarDate,
        first_harvest: CalendarDate,
        autoplant: bool,
    ) -> Self {
        Self {
            crop,
            origin_year: origin.year,
            continues: (crop.regrows() || autoplant) && crop.chain_offset() > 0,
            upcoming: Some(Generation {
                plant_date: origin,
                harvest_date: first_harvest,
            }),
        }
    }
}

impl Iterator for GenerationChain<'_> {
    type Item = Generation;

    fn next(&mut self) -> Option<Generation> {
        let current = self.upcoming.take()?;
        if self.continues {
            self.upcoming = harvest_date(
                self.crop,
                current.harvest_date,
                self.crop.chain_offset(),
                self.origin_year,
            )
            .map(|harvest_date| Generation {
                plant_date: current.harvest_date,
                harvest_date,
            });
        }
        Some(current)
    }
}
