//! Core pricing calculation functions.
//!
//! Pure functions for estimate math - no form access, no I/O.
//! Every input comes from the attendee list, the housing selection and an
//! injected rule version.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::models::{AgeBracket, AttendeeRecord, HousingPreference, HousingSelection, RsvpStatus};
use super::rules::PricingConfig;

/// Roommate-split scenarios shown to a lone payer: 0 through 3 extra roommates.
pub const ROOMMATE_SCENARIOS: usize = 4;

/// Round a money amount up to whole currency units.
///
/// Negative amounts clamp to zero; rule validation keeps them from occurring.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use housing_estimate::pricing::round_up_money;
///
/// assert_eq!(round_up_money(dec!(705)), 705);
/// assert_eq!(round_up_money(dec!(361.01)), 362);
/// ```
pub fn round_up_money(amount: Decimal) -> u64 {
    amount.ceil().to_u64().unwrap_or(0)
}

/// Classify a birthdate against the rule version's cutoffs.
///
/// Both comparisons are strict: a birthdate on a cutoff falls in the older
/// bracket. A missing birthdate is an adult.
pub fn age_bracket(birthdate: Option<NaiveDate>, config: &PricingConfig) -> AgeBracket {
    match birthdate {
        Some(date) if date > config.baby_cutoff => AgeBracket::Baby,
        Some(date) if date > config.kid_cutoff => AgeBracket::Child,
        _ => AgeBracket::Adult,
    }
}

/// Number of attendees whose status counts toward the paying headcount.
pub fn paying_attendee_count(attendees: &[AttendeeRecord], config: &PricingConfig) -> usize {
    attendees
        .iter()
        .filter(|a| a.rsvp.is_some_and(|s| config.headcount.contains(&s)))
        .count()
}

/// Lodging nights for the whole party.
///
/// The long-stay check runs second and overrides the short-stay value
/// whenever it matches, regardless of the two night counts.
pub fn lodging_nights(attendees: &[AttendeeRecord], config: &PricingConfig) -> u32 {
    let anyone_in = |set: &BTreeSet<RsvpStatus>| {
        attendees
            .iter()
            .any(|a| a.rsvp.is_some_and(|s| set.contains(&s)))
    };

    let mut nights = 0;
    if anyone_in(&config.short_stay) {
        nights = config.short_stay_nights;
    }
    if anyone_in(&config.long_stay) {
        nights = config.long_stay_nights;
    }
    nights
}

/// Nightly rate before any roommate split.
pub fn nightly_room_rate(
    housing: &HousingSelection,
    paying_count: usize,
    config: &PricingConfig,
) -> Decimal {
    let rate = if housing.premium_room {
        config.premium_room_rate
    } else {
        config.standard_room_rate
    };

    if paying_count == 1
        && !config.single_occupant_splits_regardless_of_preference
        && housing.preference == HousingPreference::SingleRoomRequested
    {
        return config.single_room_rate;
    }
    rate
}

/// How many ways the room rate is shared.
pub fn room_split_divisor(
    housing: &HousingSelection,
    paying_count: usize,
    additional_roommates: u8,
    config: &PricingConfig,
) -> u32 {
    if paying_count != 1 {
        return 1;
    }
    if !config.single_occupant_splits_regardless_of_preference
        && housing.preference == HousingPreference::SingleRoomRequested
    {
        return 1;
    }
    let divisor = u32::from(additional_roommates) + 1;
    debug_assert!(divisor > 0);
    divisor
}

/// Food cost summed per attendee.
///
/// The column is chosen by each attendee's own status, not the party's
/// lodging nights. Statuses without a column pay nothing.
pub fn food_cost(attendees: &[AttendeeRecord], config: &PricingConfig) -> Decimal {
    attendees
        .iter()
        .filter_map(|attendee| {
            let column = *config.food_columns.get(&attendee.rsvp?)?;
            let bracket = age_bracket(attendee.parsed_birthdate(), config);
            Some(config.food_prices.price(bracket, column))
        })
        .sum()
}

/// Incidentals: flat per-person-per-night rate times each attendee's units.
pub fn incidentals_cost(attendees: &[AttendeeRecord], config: &PricingConfig) -> Decimal {
    let units: u32 = attendees
        .iter()
        .filter_map(|a| config.incidental_nights.get(&a.rsvp?).copied())
        .sum();
    config.incidentals_per_person_per_night * Decimal::from(units)
}

/// Cost components for one roommate scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    pub paying_attendees: usize,
    pub lodging_nights: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub room_rate: Decimal,
    pub split_divisor: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub lodging: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub food: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub incidentals: Decimal,
    /// Unrounded sum of the three components.
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    pub total: u64,
}

/// Compute every cost component for one roommate scenario.
pub fn estimate_breakdown(
    attendees: &[AttendeeRecord],
    housing: &HousingSelection,
    additional_roommates: u8,
    config: &PricingConfig,
) -> CostBreakdown {
    let paying_attendees = paying_attendee_count(attendees, config);
    let nights = lodging_nights(attendees, config);
    let room_rate = nightly_room_rate(housing, paying_attendees, config);
    let split_divisor = room_split_divisor(housing, paying_attendees, additional_roommates, config);

    // Multiply before dividing so whole-number splits stay exact
    let lodging = room_rate * Decimal::from(nights) / Decimal::from(split_divisor);
    let food = food_cost(attendees, config);
    let incidentals = incidentals_cost(attendees, config);
    let subtotal = lodging + food + incidentals;
    let total = round_up_money(subtotal);

    debug!(
        rules = %config.version,
        paying_attendees,
        nights,
        %room_rate,
        split_divisor,
        %lodging,
        %food,
        %incidentals,
        total,
        "Estimated cost"
    );

    CostBreakdown {
        paying_attendees,
        lodging_nights: nights,
        room_rate,
        split_divisor,
        lodging,
        food,
        incidentals,
        subtotal,
        total,
    }
}

/// Total cost in whole currency units, rounded up.
pub fn estimate_total_cost(
    attendees: &[AttendeeRecord],
    housing: &HousingSelection,
    additional_roommates: u8,
    config: &PricingConfig,
) -> u64 {
    estimate_breakdown(attendees, housing, additional_roommates, config).total
}

/// Either one flat cost or the four roommate-split scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Estimate {
    SingleWithSplits([u64; ROOMMATE_SCENARIOS]),
    Flat(u64),
}

impl Estimate {
    /// Cost with no additional roommates.
    pub fn base_cost(&self) -> u64 {
        match self {
            Estimate::SingleWithSplits(costs) => costs[0],
            Estimate::Flat(cost) => *cost,
        }
    }
}

/// Estimate every scenario the form should show.
///
/// A lone payer who did not ask for a room to themselves sees the cost with
/// 0 through 3 additional roommates; everyone else sees one cost.
pub fn estimate_all_scenarios(
    attendees: &[AttendeeRecord],
    housing: &HousingSelection,
    config: &PricingConfig,
) -> Estimate {
    let paying = paying_attendee_count(attendees, config);

    if paying == 1 && housing.preference != HousingPreference::SingleRoomRequested {
        debug!("Single payer sharing: estimating roommate splits");
        let mut costs = [0; ROOMMATE_SCENARIOS];
        for (roommates, cost) in (0u8..).zip(costs.iter_mut()) {
            *cost = estimate_total_cost(attendees, housing, roommates, config);
        }
        Estimate::SingleWithSplits(costs)
    } else {
        Estimate::Flat(estimate_total_cost(attendees, housing, 0, config))
    }
}
