//! Event removal: walks a planting's generation chain and takes back
//! everything `plant` put there.

use crate::error::PlannerError;
use crate::shared::*;

use super::chain::GenerationChain;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Removal {
    pub harvests_removed: usize,
    pub replants_removed: usize,
}

/// Removes the plant event `event` stored on `date` together with every
/// harvest and auto-replant its chain produced.
///
/// Buckets are reduced by `event.amount`, not cleared, so other plantings
/// merged into the same buckets keep their share. The walk stops at the
/// first harvest date with nothing left to reduce. For auto-replant chains
/// it also stops where the next replant is missing, since `plant` only
/// writes a replant for a generation it placed.
pub fn unplant(
    schedule: &mut PlantingSchedule,
    crops: &CropRegistry,
    date: CalendarDate,
    event: &StoredCropEvent,
) -> Result<Removal, PlannerError> {
    let Some(first_harvest) = event.first_harvest_date else {
        return Err(PlannerError::HarvestNotRemovable);
    };

    for d in [date, first_harvest] {
        if !d.is_valid() {
            return Err(PlannerError::InvalidDate { day: d.day });
        }
    }

    let crop = crops
        .get(&event.crop_id)
        .ok_or_else(|| PlannerError::CropNotFound {
            crop_id: event.crop_id.clone(),
        })?;

    if schedule.find(date, CropEventKind::Plant, event).is_none() {
        return Err(PlannerError::PlantEventNotFound {
            crop_id: event.crop_id.clone(),
        });
    }

    let mut removal = Removal::default();
    let harvest = StoredCropEvent::harvest(crop.id.clone(), event.amount, crop.sell_price);

    for (index, generation) in
        GenerationChain::new(crop, date, first_harvest, event.autoplant).enumerate()
    {
        if index > 0 && event.autoplant {
            let replant = StoredCropEvent::plant(
                crop.id.clone(),
                event.amount,
                event.price,
                true,
                generation.harvest_date,
            );
            if !schedule.reduce(
                generation.plant_date,
                CropEventKind::Plant,
                &replant,
                event.amount,
            ) {
                break;
            }
            removal.replants_removed += 1;
        }

        if !schedule.reduce(
            generation.harvest_date,
            CropEventKind::Harvest,
            &harvest,
            event.amount,
        ) {
            break;
        }
        removal.harvests_removed += 1;
    }

    schedule.reduce(date, CropEventKind::Plant, event, event.amount);
    Ok(removal)
}
