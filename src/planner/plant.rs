//! Event placement: installs a planting and its whole generation chain.

use crate::error::PlannerError;
use crate::shared::*;

use super::chain::{harvest_date, Generation, GenerationChain};

/// What a successful `plant` placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub first_harvest: CalendarDate,
    /// Every generation, in order. Harvest events exist at each harvest date.
    pub generations: Vec<Generation>,
    /// Dates that received an auto-replant plant event.
    pub replants: Vec<CalendarDate>,
}

/// Places `fields` as planted on `date`.
///
/// The first harvest is `growth_day_override` days out when given, otherwise
/// `days_to_grow`. If that first harvest is impossible nothing is written and
/// `NoHarvestBeforeSeasonEnd` is returned. Later generations end silently the
/// first time one cannot be harvested.
pub fn plant(
    schedule: &mut PlantingSchedule,
    crops: &CropRegistry,
    date: CalendarDate,
    fields: &PlantFormFields,
) -> Result<Placement, PlannerError> {
    let crop = crops
        .get(&fields.crop_id)
        .ok_or_else(|| PlannerError::CropNotFound {
            crop_id: fields.crop_id.clone(),
        })?;

    if !date.is_valid() {
        return Err(PlannerError::InvalidDate { day: date.day });
    }
    if fields.amount == 0 {
        return Err(PlannerError::InvalidAmount);
    }

    let offset = fields
        .growth_day_override
        .map(u32::from)
        .unwrap_or(crop.days_to_grow as u32);
    let first_harvest =
        harvest_date(crop, date, offset, date.year).ok_or_else(|| {
            PlannerError::NoHarvestBeforeSeasonEnd {
                crop_id: crop.id.clone(),
            }
        })?;

    let mut placement = Placement {
        first_harvest,
        generations: Vec::new(),
        replants: Vec::new(),
    };

    let harvest = StoredCropEvent::harvest(crop.id.clone(), fields.amount, crop.sell_price);
    for (index, generation) in
        GenerationChain::new(crop, date, first_harvest, fields.autoplant).enumerate()
    {
        schedule.insert(generation.harvest_date, CropEventKind::Harvest, harvest.clone());

        if index == 0 {
            schedule.insert(
                date,
                CropEventKind::Plant,
                StoredCropEvent::plant(
                    crop.id.clone(),
                    fields.amount,
                    fields.seed_price,
                    fields.autoplant,
                    first_harvest,
                ),
            );
        } else if fields.autoplant {
            schedule.insert(
                generation.plant_date,
                CropEventKind::Plant,
                StoredCropEvent::plant(
                    crop.id.clone(),
                    fields.amount,
                    fields.seed_price,
                    true,
                    generation.harvest_date,
                ),
            );
            placement.replants.push(generation.plant_date);
        }

        placement.generations.push(generation);
    }

    Ok(placement)
}
