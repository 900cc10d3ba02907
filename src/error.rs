use thiserror::Error;

use crate::shared::CropId;

/// Why a planner operation was rejected. A rejected operation never mutates
/// the schedule it was given.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    /// The crop id is not in the reference table. Indicates a caller bug.
    #[error("Crop '{crop_id}' is invalid.")]
    CropNotFound { crop_id: CropId },

    #[error("This crop cannot be harvested before the end of its season.")]
    NoHarvestBeforeSeasonEnd { crop_id: CropId },

    #[error("You cannot remove a harvest event directly.")]
    HarvestNotRemovable,

    #[error("No matching '{crop_id}' plant event exists on that day.")]
    PlantEventNotFound { crop_id: CropId },

    #[error("At least one crop must be planted.")]
    InvalidAmount,

    /// A hand-built date whose day lies past the end of its season.
    #[error("Day index {day} is past the end of its season.")]
    InvalidDate { day: u8 },
}

impl PlannerError {
    /// User-correctable rejections, as opposed to contract violations by the
    /// caller.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PlannerError::NoHarvestBeforeSeasonEnd { .. }
                | PlannerError::HarvestNotRemovable
                | PlannerError::InvalidAmount
        )
    }
}
