//! Proportional need-allocation engine
//!
//! Distributes a cost item's monthly need across pledged contribution
//! units and summarizes the outcome into display-ready charge groups.
//! All arithmetic after the initial cap conversion happens in integer
//! cents, so the assigned amounts always sum to the target exactly and
//! identical inputs always produce identical output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::records::PledgeSeed;

/// Cents per whole currency unit.
const SUBUNITS_PER_UNIT: i64 = 100;

/// A display bucket of pledge units that were assigned the same amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeGroup {
    pub amount: f64,
    pub count: u32,
}

/// Outcome of distributing a need across pledge units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResult {
    /// Uniform scaling applied to every unit cap before rounding; zero when
    /// nothing was assigned. Useful for display, not authoritative for totals.
    pub factor: f64,
    /// Sum of all unit caps.
    pub sum_max: f64,
    /// Sum of the assigned amounts; never exceeds the need or `sum_max`.
    pub total_assigned: f64,
    /// Distinct assigned amounts and how many units received each,
    /// largest amount first.
    pub charge_groups: Vec<ChargeGroup>,
}

impl AllocationResult {
    /// Result for inputs where nothing can be assigned: open or zero need,
    /// no pledge units, or zero total capacity.
    fn unfunded(sum_max_cents: i64) -> Self {
        Self {
            factor: 0.0,
            sum_max: to_amount(sum_max_cents),
            total_assigned: 0.0,
            charge_groups: Vec::new(),
        }
    }
}

/// Convert a whole-currency value to integer cents, rounding half up.
///
/// The single point where real-valued input meets integer arithmetic.
/// Inputs must already be validated non-negative; out-of-range values are
/// clamped rather than propagated.
fn to_cents(value: f64) -> i64 {
    debug_assert!(value >= 0.0, "monetary inputs must be non-negative");
    (value.max(0.0) * SUBUNITS_PER_UNIT as f64).round() as i64
}

fn to_amount(cents: i64) -> f64 {
    cents as f64 / SUBUNITS_PER_UNIT as f64
}

/// Distribute `need` across the units expanded from `pledge_seeds`.
///
/// Every seed expands into `count` units capped at the seed's
/// `max_amount`. Each unit is asked for its cap scaled by
/// `min(need, total capacity) / total capacity`, rounded to cents by
/// largest-remainder apportionment: floored shares first, then one extra
/// cent each to the largest fractional remainders, ties broken by
/// expansion order. The assigned amounts therefore sum to the target
/// exactly, and no unit is shorted by more than one cent relative to its
/// exact proportional share.
///
/// A `need` of `None` means the amount is still open; together with
/// non-positive needs, empty pledge lists, and zero total capacity it
/// yields a defined zero result rather than an error.
pub fn allocate(need: Option<f64>, pledge_seeds: &[PledgeSeed]) -> AllocationResult {
    // Expansion arena: one cap per pledge unit, in seed order. Position is
    // the only identity a unit has; it breaks remainder ties.
    let caps: Vec<i64> = pledge_seeds
        .iter()
        .flat_map(|seed| std::iter::repeat(to_cents(seed.max_amount)).take(seed.count as usize))
        .collect();
    let sum_max_cents: i64 = caps.iter().sum();

    let need_cents = match need {
        Some(value) if value > 0.0 => to_cents(value),
        _ => return AllocationResult::unfunded(sum_max_cents),
    };
    if caps.is_empty() || sum_max_cents == 0 {
        return AllocationResult::unfunded(sum_max_cents);
    }

    let target_cents = need_cents.min(sum_max_cents);
    // Display-only; the assigned totals come from the integer shares below.
    let factor = target_cents as f64 / sum_max_cents as f64;

    // Exact proportional share of unit i is cap_i * target / sum_max.
    // Integer division gives the floored share, the division remainder its
    // fractional part scaled by sum_max.
    let mut assigned: Vec<i64> = Vec::with_capacity(caps.len());
    let mut fractions: Vec<i64> = Vec::with_capacity(caps.len());
    for &cap in &caps {
        let scaled = cap * target_cents;
        assigned.push(scaled / sum_max_cents);
        fractions.push(scaled % sum_max_cents);
    }
    let mut remainder = target_cents - assigned.iter().sum::<i64>();
    // Each unit's floored share misses its exact share by less than one
    // cent, so the shortfall never reaches the unit count.
    debug_assert!(
        remainder >= 0 && remainder < caps.len() as i64,
        "remainder {remainder} out of range for {} units",
        caps.len()
    );

    // Units ranked by fractional remainder, largest first; the stable sort
    // keeps expansion order between equals.
    let mut ranked: Vec<usize> = (0..caps.len()).collect();
    ranked.sort_by(|&a, &b| fractions[b].cmp(&fractions[a]));

    let mut cursor = 0;
    while remainder > 0 {
        assigned[ranked[cursor % ranked.len()]] += 1;
        cursor += 1;
        remainder -= 1;
    }

    let mut groups: BTreeMap<i64, u32> = BTreeMap::new();
    for &cents in &assigned {
        *groups.entry(cents).or_insert(0) += 1;
    }
    let charge_groups = groups
        .into_iter()
        .rev()
        .map(|(cents, count)| ChargeGroup {
            amount: to_amount(cents),
            count,
        })
        .collect();

    AllocationResult {
        factor,
        sum_max: to_amount(sum_max_cents),
        total_assigned: to_amount(target_cents),
        charge_groups,
    }
}
