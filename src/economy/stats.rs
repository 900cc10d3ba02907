use serde::{Deserialize, Serialize};

use crate::calendar::days_spanned_inclusive;
use crate::planner::{harvest_date, GenerationChain};
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// EVENT TOTALS
// ═══════════════════════════════════════════════════════════════════════

/// Sum of `amount` over `events`.
pub fn total_amount<'a>(events: impl IntoIterator<Item = &'a StoredCropEvent>) -> u32 {
    events
        .into_iter()
        .fold(0u32, |total, event| total.saturating_add(event.amount))
}

/// Sum of `price × amount` over `events`: the cost of plant events or the
/// profit of harvest events.
pub fn total_revenue<'a>(events: impl IntoIterator<Item = &'a StoredCropEvent>) -> u64 {
    events
        .into_iter()
        .fold(0u64, |total, event| total.saturating_add(event.value()))
}

// ═══════════════════════════════════════════════════════════════════════
// SEASON / DAY STATS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonStats {
    pub num_planted: u32,
    pub num_harvested: u32,
    pub cost: u64,
    pub profit: u64,
    /// `profit - cost`.
    pub revenue: i64,
}

pub fn season_stats(buckets: &[Option<DaySchedule>]) -> SeasonStats {
    let days = || buckets.iter().flatten();
    let plants = || days().flat_map(|day| day.plants.iter());
    let harvests = || days().flat_map(|day| day.harvests.iter());

    let cost = total_revenue(plants());
    let profit = total_revenue(harvests());
    SeasonStats {
        num_planted: total_amount(plants()),
        num_harvested: total_amount(harvests()),
        cost,
        profit,
        revenue: signed_difference(profit, cost),
    }
}

/// Harvest profit minus planting cost for a single day bucket.
pub fn day_revenue(day: &DaySchedule) -> i64 {
    signed_difference(total_revenue(&day.harvests), total_revenue(&day.plants))
}

fn signed_difference(profit: u64, cost: u64) -> i64 {
    (profit as i128 - cost as i128).clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

/// `total_revenue` spread over every day of `start..=end`.
pub fn revenue_per_day(total_revenue: i64, start: CalendarDate, end: CalendarDate) -> f32 {
    total_revenue as f32 / days_spanned_inclusive(start, end) as f32
}

/// `None` for zero, `+120t` for gains, `-300t` for losses.
pub fn format_signed(revenue: i64) -> Option<String> {
    match revenue {
        0 => None,
        r if r > 0 => Some(format!("+{}{}", r, CURRENCY_SUFFIX)),
        r => Some(format!("{}{}", r, CURRENCY_SUFFIX)),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CHAIN PROJECTION
// ═══════════════════════════════════════════════════════════════════════

/// What one stored planting is expected to earn over its whole chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainProjection {
    pub generations: usize,
    pub last_harvest: CalendarDate,
    /// Net result for a single seed, replants included.
    pub revenue_per_unit: i64,
    pub total_revenue: i64,
    pub revenue_per_day: f32,
}

/// Projects `event` (a plant event stored on `date`) forward through its
/// generation chain. Returns `None` for harvest events.
pub fn project_chain(
    date: CalendarDate,
    event: &StoredCropEvent,
    crop: &Crop,
) -> Option<ChainProjection> {
    let first_harvest = event.first_harvest_date?;
    let mut generations = 0usize;
    let mut last_harvest = first_harvest;
    for generation in GenerationChain::new(crop, date, first_harvest, event.autoplant) {
        generations += 1;
        last_harvest = generation.harvest_date;
    }

    let seeds = if event.autoplant { generations } else { 1 };
    let revenue_per_unit =
        crop.sell_price as i64 * generations as i64 - event.price as i64 * seeds as i64;
    let total_revenue = revenue_per_unit.saturating_mul(event.amount as i64);

    Some(ChainProjection {
        generations,
        last_harvest,
        revenue_per_unit,
        total_revenue,
        revenue_per_day: revenue_per_day(total_revenue, date, last_harvest),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct CropRanking {
    pub crop_id: CropId,
    pub seed_price: u32,
    pub projection: ChainProjection,
}

/// Every crop that would produce a harvest if one seed were planted on `date`
/// at its first listed buy price, best revenue per day first.
pub fn rank_crops(registry: &CropRegistry, date: CalendarDate) -> Vec<CropRanking> {
    let mut rankings: Vec<CropRanking> = registry
        .plantable_in(date.season)
        .into_iter()
        .filter_map(|crop| {
            let seed_price = crop.buy_prices.first().copied().unwrap_or(0);
            let first_harvest = harvest_date(crop, date, crop.days_to_grow as u32, date.year)?;
            let seed = StoredCropEvent::plant(crop.id.clone(), 1, seed_price, false, first_harvest);
            let projection = project_chain(date, &seed, crop)?;
            Some(CropRanking {
                crop_id: crop.id.clone(),
                seed_price,
                projection,
            })
        })
        .collect();

    rankings.sort_by(|a, b| {
        b.projection
            .revenue_per_day
            .total_cmp(&a.projection.revenue_per_day)
            .then_with(|| a.crop_id.cmp(&b.crop_id))
    });
    rankings
}
