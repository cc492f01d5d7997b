//! Estimate service functions over the form collaborators.
//!
//! The form is reached only through `FormDataSource` (read) and `ResultSink`
//! (write), so the pricing math stays independent of any presentation layer.

use std::io::{Read, Write};

use tracing::{debug, info};

use crate::error::Result;

use super::calculators::{estimate_all_scenarios, Estimate};
use super::models::FormState;
use super::requests::FormStateRequest;
use super::responses::EstimateDisplay;
use super::rules::PricingConfig;

/// Supplies the current form state on demand.
pub trait FormDataSource {
    fn read_form(&self) -> Result<FormState>;
}

/// Receives each formatted estimate. The last write wins.
pub trait ResultSink {
    fn display(&mut self, display: &EstimateDisplay) -> Result<()>;
}

impl FormDataSource for FormState {
    fn read_form(&self) -> Result<FormState> {
        Ok(self.clone())
    }
}

/// Form state held as a JSON document
#[derive(Debug, Clone)]
pub struct JsonFormSource {
    json: String,
}

impl JsonFormSource {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Ok(Self { json })
    }
}

impl FormDataSource for JsonFormSource {
    fn read_form(&self) -> Result<FormState> {
        let request: FormStateRequest = serde_json::from_str(&self.json)?;
        Ok(request.into())
    }
}

/// Writes each display as text lines to any writer
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResultSink for WriterSink<W> {
    fn display(&mut self, display: &EstimateDisplay) -> Result<()> {
        match display {
            EstimateDisplay::OnlyCost { cost } => {
                writeln!(self.writer, "Estimated cost: {}", cost)?;
            }
            EstimateDisplay::RoommateCosts { costs } => {
                for (roommates, cost) in costs.iter().enumerate() {
                    writeln!(
                        self.writer,
                        "Estimated cost with {} additional roommate(s): {}",
                        roommates, cost
                    )?;
                }
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Read the form, estimate every scenario and hand the result to the sink.
///
/// Returns the raw estimate so callers can log or inspect it.
pub fn compute_cost(
    source: &impl FormDataSource,
    config: &PricingConfig,
    sink: &mut impl ResultSink,
) -> Result<Estimate> {
    let form = source.read_form()?;
    debug!(
        attendees = form.attendees.len(),
        preference = ?form.housing.preference,
        premium_room = form.housing.premium_room,
        "Read form state"
    );

    let estimate = estimate_all_scenarios(&form.attendees, &form.housing, config);
    let shown = EstimateDisplay::from(estimate);
    sink.display(&shown)?;

    let mode = shown.mode();
    info!(
        rules = %config.version,
        ?mode,
        base_cost = estimate.base_cost(),
        "Displayed estimate"
    );
    Ok(estimate)
}
