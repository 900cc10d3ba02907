use crate::shared::*;

/// The built-in crop reference table.
///
/// Kept as RON so hosts can ship their own table in the same format and load
/// it with `CropRegistry::from_ron`.
pub const BUILTIN_CROPS_RON: &str = include_str!("../../assets/data/crops.ron");

impl CropRegistry {
    /// Parses a RON list of `Crop` definitions, keyed by id.
    pub fn from_ron(source: &str) -> Result<Self, ron::error::SpannedError> {
        let crops: Vec<Crop> = ron::from_str(source)?;
        let mut registry = CropRegistry::default();
        for crop in crops {
            registry.crops.insert(crop.id.clone(), crop);
        }
        Ok(registry)
    }
}

/// Populate the CropRegistry with the built-in crop definitions.
pub fn populate_crops(registry: &mut CropRegistry) -> Result<(), ron::error::SpannedError> {
    let builtin = CropRegistry::from_ron(BUILTIN_CROPS_RON)?;
    registry.crops.extend(builtin.crops);
    Ok(())
}
