//! Versioned pricing rules.
//!
//! A `PricingConfig` is one immutable rule version: cutoff dates, rates and
//! the per-status lookup tables. Several versions can be loaded side by side;
//! the calculators never read global constants.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EstimateError, Result};

use super::models::{AgeBracket, RsvpStatus};

// Evaluated at compile time: a bad preset date fails the build.
const WEEKEND_2019_BABY_CUTOFF: NaiveDate = match NaiveDate::from_ymd_opt(2019, 7, 11) {
    Some(date) => date,
    None => panic!("invalid weekend-2019 baby cutoff"),
};
const WEEKEND_2019_KID_CUTOFF: NaiveDate = match NaiveDate::from_ymd_opt(2011, 7, 11) {
    Some(date) => date,
    None => panic!("invalid weekend-2019 kid cutoff"),
};

/// Food price table, one row per age bracket.
///
/// Columns are stay-length variants; which column an attendee uses comes
/// from `PricingConfig::food_columns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodTable {
    pub adult: Vec<Decimal>,
    pub child: Vec<Decimal>,
    pub baby: Vec<Decimal>,
}

impl FoodTable {
    pub fn row(&self, bracket: AgeBracket) -> &[Decimal] {
        match bracket {
            AgeBracket::Adult => &self.adult,
            AgeBracket::Child => &self.child,
            AgeBracket::Baby => &self.baby,
        }
    }

    /// Price for a bracket and column; out-of-range columns cost nothing.
    pub fn price(&self, bracket: AgeBracket, column: usize) -> Decimal {
        self.row(bracket).get(column).copied().unwrap_or(Decimal::ZERO)
    }

    fn shortest_row(&self) -> usize {
        self.adult.len().min(self.child.len()).min(self.baby.len())
    }
}

/// One version of the pricing rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub version: String,

    /// Born strictly after this date: baby bracket.
    pub baby_cutoff: NaiveDate,
    /// Born strictly after this date (and not a baby): child bracket.
    pub kid_cutoff: NaiveDate,

    pub standard_room_rate: Decimal,
    pub premium_room_rate: Decimal,
    pub single_room_rate: Decimal,
    pub incidentals_per_person_per_night: Decimal,

    pub short_stay_nights: u32,
    pub long_stay_nights: u32,

    /// Statuses counted toward the paying headcount.
    pub headcount: BTreeSet<RsvpStatus>,
    /// Any of these in the party sets lodging nights to `short_stay_nights`.
    pub short_stay: BTreeSet<RsvpStatus>,
    /// Any of these in the party overrides lodging nights to `long_stay_nights`.
    pub long_stay: BTreeSet<RsvpStatus>,

    /// Per-attendee food column. Statuses missing here pay no food.
    pub food_columns: BTreeMap<RsvpStatus, usize>,
    pub food_prices: FoodTable,

    /// Per-attendee incidental night units. Statuses missing here pay none.
    pub incidental_nights: BTreeMap<RsvpStatus, u32>,

    /// When true, a lone payer always splits the room rate by roommate
    /// count and the single-room rate is never applied.
    #[serde(default)]
    pub single_occupant_splits_regardless_of_preference: bool,
}

impl PricingConfig {
    /// Rules for the 2019 Thursday-Sunday weekend.
    pub fn weekend_2019() -> Self {
        let adult_dinner = dec!(15);
        let kid_dinner = dec!(10);
        let adult_food = dec!(140);
        let kid_food = dec!(63);
        let friday_lunch = dec!(10);

        Self {
            version: "weekend-2019".to_string(),
            baby_cutoff: WEEKEND_2019_BABY_CUTOFF,
            kid_cutoff: WEEKEND_2019_KID_CUTOFF,
            standard_room_rate: dec!(175),
            premium_room_rate: dec!(230),
            single_room_rate: dec!(140),
            incidentals_per_person_per_night: dec!(5),
            short_stay_nights: 2,
            long_stay_nights: 3,
            headcount: BTreeSet::from([RsvpStatus::FriSat, RsvpStatus::ThuFriSat]),
            short_stay: BTreeSet::from([RsvpStatus::FriSat, RsvpStatus::ThuFriSat]),
            long_stay: BTreeSet::from([RsvpStatus::ThuFriSat]),
            food_columns: BTreeMap::from([(RsvpStatus::FriSat, 0), (RsvpStatus::ThuFriSat, 1)]),
            food_prices: FoodTable {
                adult: vec![adult_dinner + adult_food, adult_dinner + adult_food + friday_lunch],
                child: vec![kid_dinner + kid_food, kid_dinner + kid_food + friday_lunch],
                baby: vec![Decimal::ZERO, Decimal::ZERO],
            },
            incidental_nights: BTreeMap::from([(RsvpStatus::FriSat, 2), (RsvpStatus::ThuFriSat, 3)]),
            single_occupant_splits_regardless_of_preference: false,
        }
    }

    /// Parse and validate a rule version from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a rule version from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        info!("Loaded pricing rules '{}' from {}", config.version, path.display());
        Ok(config)
    }

    /// Check the rule version for values the calculators cannot price.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        let rates = [
            ("standard_room_rate", self.standard_room_rate),
            ("premium_room_rate", self.premium_room_rate),
            ("single_room_rate", self.single_room_rate),
            ("incidentals_per_person_per_night", self.incidentals_per_person_per_night),
        ];
        for (name, rate) in rates {
            if rate < Decimal::ZERO {
                errors.push(format!("{} is negative ({})", name, rate));
            }
        }

        for (name, row) in [
            ("adult", &self.food_prices.adult),
            ("child", &self.food_prices.child),
            ("baby", &self.food_prices.baby),
        ] {
            if row.iter().any(|p| *p < Decimal::ZERO) {
                errors.push(format!("food_prices.{} has a negative price", name));
            }
        }

        if self.kid_cutoff > self.baby_cutoff {
            errors.push(format!(
                "kid_cutoff {} is newer than baby_cutoff {}",
                self.kid_cutoff, self.baby_cutoff
            ));
        }

        let columns = self.food_prices.shortest_row();
        for (status, column) in &self.food_columns {
            if *column >= columns {
                errors.push(format!(
                    "food column {} for {:?} is outside the food table ({} columns)",
                    column, status, columns
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(EstimateError::InvalidRules {
                version: self.version.clone(),
                errors,
            })
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self::weekend_2019()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekend_2019_values() {
        let config = PricingConfig::weekend_2019();
        assert_eq!(config.baby_cutoff, NaiveDate::from_ymd_opt(2019, 7, 11).unwrap());
        assert_eq!(config.kid_cutoff, NaiveDate::from_ymd_opt(2011, 7, 11).unwrap());
        assert_eq!(config.food_prices.adult, vec![dec!(155), dec!(165)]);
        assert_eq!(config.food_prices.child, vec![dec!(73), dec!(83)]);
        assert_eq!(config.food_prices.baby, vec![dec!(0), dec!(0)]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bundled_rule_file_matches_preset() {
        let config =
            PricingConfig::from_json_str(include_str!("../../rules/weekend-2019.json")).unwrap();
        assert_eq!(config, PricingConfig::weekend_2019());
    }

    #[test]
    fn test_json_round_trip_preserves_rules() {
        let config = PricingConfig::weekend_2019();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(PricingConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_policy_flag_defaults_to_false() {
        let mut value = serde_json::to_value(PricingConfig::weekend_2019()).unwrap();
        value
            .as_object_mut()
            .unwrap()
            .remove("single_occupant_splits_regardless_of_preference");
        let config = PricingConfig::from_json_str(&value.to_string()).unwrap();
        assert!(!config.single_occupant_splits_regardless_of_preference);
    }

    #[test]
    fn test_validate_rejects_negative_rate() {
        let mut config = PricingConfig::weekend_2019();
        config.single_room_rate = dec!(-1);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("single_room_rate"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_food_column() {
        let mut config = PricingConfig::weekend_2019();
        config.food_columns.insert(RsvpStatus::MealsOnly, 2);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("MealsOnly"));
    }

    #[test]
    fn test_validate_rejects_swapped_cutoffs() {
        let mut config = PricingConfig::weekend_2019();
        std::mem::swap(&mut config.baby_cutoff, &mut config.kid_cutoff);
        assert!(matches!(
            config.validate(),
            Err(EstimateError::InvalidRules { .. })
        ));
    }

    #[test]
    fn test_from_json_str_rejects_malformed_json() {
        assert!(matches!(
            PricingConfig::from_json_str("{ not json"),
            Err(EstimateError::Json(_))
        ));
    }

    #[test]
    fn test_food_table_out_of_range_is_free() {
        let table = PricingConfig::weekend_2019().food_prices;
        assert_eq!(table.price(AgeBracket::Adult, 1), dec!(165));
        assert_eq!(table.price(AgeBracket::Adult, 9), Decimal::ZERO);
    }
}
