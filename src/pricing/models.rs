//! Domain models for RSVP and housing pricing.
//!
//! These are the form-independent types the calculators work on. Form tokens
//! are parsed into them permissively: anything unrecognised becomes "absent"
//! rather than an error.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// RSVP status as stored on an invitation.
///
/// The integer form codes are stable and match the order below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RsvpStatus {
    No,
    Maybe,
    FriSat,
    ThuFriSat,
    SatSun,
    FriSatSun,
    FriSatPlusEither,
    WeddingOnly,
    Fri,
    Sat,
    MealsOnly,
}

impl RsvpStatus {
    pub const ALL: [RsvpStatus; 11] = [
        RsvpStatus::No,
        RsvpStatus::Maybe,
        RsvpStatus::FriSat,
        RsvpStatus::ThuFriSat,
        RsvpStatus::SatSun,
        RsvpStatus::FriSatSun,
        RsvpStatus::FriSatPlusEither,
        RsvpStatus::WeddingOnly,
        RsvpStatus::Fri,
        RsvpStatus::Sat,
        RsvpStatus::MealsOnly,
    ];

    /// Integer code used by the RSVP form select.
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Parse a form token: either the integer code or the short description.
    pub fn from_form_token(token: &str) -> Option<Self> {
        let token = token.trim();
        if let Ok(code) = token.parse::<u8>() {
            return Self::from_code(code);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.short_description().eq_ignore_ascii_case(token))
    }

    pub fn short_description(self) -> &'static str {
        match self {
            RsvpStatus::No => "No",
            RsvpStatus::Maybe => "Maybe",
            RsvpStatus::FriSat => "FriSat",
            RsvpStatus::ThuFriSat => "ThuFriSat",
            RsvpStatus::SatSun => "SatSun",
            RsvpStatus::FriSatSun => "FriSatSun",
            RsvpStatus::FriSatPlusEither => "FriSatPlusEither",
            RsvpStatus::WeddingOnly => "WeddingOnly",
            RsvpStatus::Fri => "Fri",
            RsvpStatus::Sat => "Sat",
            RsvpStatus::MealsOnly => "Meals",
        }
    }

    pub fn long_description(self) -> &'static str {
        match self {
            RsvpStatus::No => "Will not attend",
            RsvpStatus::Maybe => "Undecided",
            RsvpStatus::FriSat => "Will attend: Friday - Sunday",
            RsvpStatus::ThuFriSat => "Will attend: Thursday - Sunday",
            RsvpStatus::SatSun => "Will attend: Saturday - Sunday",
            RsvpStatus::FriSatSun => "Will attend: Friday - Sunday",
            RsvpStatus::FriSatPlusEither => {
                "Will attend: Friday - Sunday, plus either Thursday or Sunday nights"
            }
            RsvpStatus::WeddingOnly => "Will attend: Wedding Only (no overnights)",
            RsvpStatus::Fri => "Will attend: Friday - Saturday",
            RsvpStatus::Sat => "Will attend: Saturday - Sunday",
            RsvpStatus::MealsOnly => "Will need meals but not lodging",
        }
    }

    pub fn is_attending(self) -> bool {
        !matches!(self, RsvpStatus::No | RsvpStatus::Maybe)
    }

    pub fn is_undecided(self) -> bool {
        self == RsvpStatus::Maybe
    }

    /// Attending without an overnight stay.
    pub fn needs_no_lodging(self) -> bool {
        matches!(self, RsvpStatus::WeddingOnly | RsvpStatus::MealsOnly)
    }
}

/// Age bracket derived from a birthdate and the rule version's cutoffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBracket {
    Adult,
    Child,
    Baby,
}

/// Rooming preference as selected on the housing form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HousingPreference {
    #[default]
    RoommateRequested,
    SingleRoomRequested,
}

impl HousingPreference {
    /// Form code 1 is "I need a room to myself"; every other code
    /// (not set, specific, known or any roommates) shares.
    pub fn from_form_code(code: &str) -> Self {
        match code.trim() {
            "1" => HousingPreference::SingleRoomRequested,
            _ => HousingPreference::RoommateRequested,
        }
    }
}

/// Party-wide housing selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HousingSelection {
    pub preference: HousingPreference,
    #[serde(default)]
    pub premium_room: bool,
}

/// One attendee row of the RSVP form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttendeeRecord {
    /// `None` when the form token did not name a known status.
    pub rsvp: Option<RsvpStatus>,
    /// Raw `month/day/year` text as entered.
    #[serde(default)]
    pub birthdate: Option<String>,
}

impl AttendeeRecord {
    pub fn new(rsvp: Option<RsvpStatus>, birthdate: Option<&str>) -> Self {
        Self {
            rsvp,
            birthdate: birthdate.map(str::to_string),
        }
    }

    /// Parsed birthdate, if the text is a usable date.
    pub fn parsed_birthdate(&self) -> Option<NaiveDate> {
        self.birthdate.as_deref().and_then(parse_birthdate)
    }
}

/// Everything the estimator reads from the form in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub attendees: Vec<AttendeeRecord>,
    pub housing: HousingSelection,
}

/// Parse a `month/day/year` birthdate.
///
/// Anything other than exactly three numeric components yields `None`.
/// Out-of-range months and days roll over into the neighbouring year or
/// month, so `2/30/2015` is 2015-03-02 and `13/1/2019` is 2020-01-01.
pub fn parse_birthdate(text: &str) -> Option<NaiveDate> {
    let pieces: Vec<&str> = text.trim().split('/').collect();
    if pieces.len() != 3 {
        return None;
    }
    let month = pieces[0].trim().parse::<i64>().ok()?;
    let day = pieces[1].trim().parse::<i64>().ok()?;
    let year = pieces[2].trim().parse::<i64>().ok()?;

    let month_index = year.checked_mul(12)?.checked_add(month.checked_sub(1)?)?;
    let first_of_month = NaiveDate::from_ymd_opt(
        i32::try_from(month_index.div_euclid(12)).ok()?,
        u32::try_from(month_index.rem_euclid(12) + 1).ok()?,
        1,
    )?;

    let offset = day.checked_sub(1)?;
    if offset >= 0 {
        first_of_month.checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        first_of_month.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}
