//! Pricing engine module for RSVP housing estimates.
//!
//! Turns the attendees and housing choices on an RSVP form into a dollar
//! estimate under a versioned set of pricing rules.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod rules;
pub mod services;

// Re-export commonly used items
pub use calculators::{
    estimate_all_scenarios, estimate_breakdown, estimate_total_cost, round_up_money,
    CostBreakdown, Estimate,
};
pub use models::{AttendeeRecord, FormState, HousingPreference, HousingSelection, RsvpStatus};
pub use responses::{DisplayMode, EstimateDisplay};
pub use rules::PricingConfig;
pub use services::{compute_cost, FormDataSource, JsonFormSource, ResultSink, WriterSink};
