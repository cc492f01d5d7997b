//! Request DTOs for raw form state.
//!
//! Field values arrive as the strings the form holds; conversion into the
//! domain models never fails.

use serde::Deserialize;
use tracing::warn;

use super::models::{AttendeeRecord, FormState, HousingPreference, HousingSelection, RsvpStatus};

/// Form boolean value for "willing to pay for a more expensive room".
pub const PREMIUM_ROOM_BOOLEAN: &str = "7";

/// One attendee row as submitted
#[derive(Debug, Clone, Deserialize)]
pub struct AttendeeRequest {
    #[serde(default)]
    pub rsvp: String,
    #[serde(default)]
    pub birthdate: Option<String>,
}

/// Whole form as submitted
#[derive(Debug, Clone, Deserialize)]
pub struct FormStateRequest {
    #[serde(default)]
    pub attendees: Vec<AttendeeRequest>,
    #[serde(default)]
    pub housing_preference: String,
    /// Checked housing preference booleans.
    #[serde(default)]
    pub housing_preference_booleans: Vec<String>,
}

impl From<AttendeeRequest> for AttendeeRecord {
    fn from(req: AttendeeRequest) -> Self {
        let rsvp = RsvpStatus::from_form_token(&req.rsvp);
        if rsvp.is_none() && !req.rsvp.trim().is_empty() {
            warn!("Unrecognized RSVP token '{}', treating as not billable", req.rsvp);
        }
        let birthdate = req.birthdate.filter(|b| !b.trim().is_empty());
        AttendeeRecord { rsvp, birthdate }
    }
}

impl From<FormStateRequest> for FormState {
    fn from(req: FormStateRequest) -> Self {
        let premium_room = req
            .housing_preference_booleans
            .iter()
            .any(|b| b.trim() == PREMIUM_ROOM_BOOLEAN);

        FormState {
            attendees: req.attendees.into_iter().map(AttendeeRecord::from).collect(),
            housing: HousingSelection {
                preference: HousingPreference::from_form_code(&req.housing_preference),
                premium_room,
            },
        }
    }
}
