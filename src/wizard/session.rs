//! Explicit wizard session and its step transitions.

use serde::Serialize;
use tracing::debug;

use super::bill::BillLimits;
use super::contact::Contact;
use crate::calc::projection::ProjectionConfig;
use crate::calc::{AuditInput, AuditResult, Calculator, PropertyType};
use crate::error::WizardError;
use crate::region::RegionParameters;
use crate::report::AuditReport;

/// Wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    /// Pick a region.
    Location,
    /// Enter the monthly bill.
    Bill,
    /// Pick the property type.
    Property,
    /// Audit is ready to be computed.
    Loading,
    /// Teaser shown; contact details requested.
    Contact,
    /// Full report unlocked.
    Result,
}

/// Answers collected so far and where the user is.
///
/// Transitions borrow the session and return the next one, so a rejected
/// transition leaves the caller's session untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WizardSession {
    step: WizardStep,
    input: AuditInput,
    region: Option<RegionParameters>,
    result: Option<AuditResult>,
    contact: Option<Contact>,
}

impl WizardSession {
    /// Fresh session at the location step with the default bill.
    pub fn new(limits: &BillLimits) -> Self {
        Self {
            step: WizardStep::Location,
            input: AuditInput {
                region_id: String::new(),
                monthly_bill: limits.default_bill,
                property_type: PropertyType::Unknown,
            },
            region: None,
            result: None,
            contact: None,
        }
    }

    /// Current step.
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Answers collected so far.
    pub fn input(&self) -> &AuditInput {
        &self.input
    }

    /// Region selected at the location step.
    pub fn region(&self) -> Option<&RegionParameters> {
        self.region.as_ref()
    }

    /// Contact details, once submitted.
    pub fn contact(&self) -> Option<&Contact> {
        self.contact.as_ref()
    }

    /// Whether the lead is qualified (apartments are not).
    pub fn is_qualified(&self) -> bool {
        self.input.property_type.is_qualified()
    }

    fn expect_step(&self, expected: WizardStep) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    fn advance(&self, step: WizardStep) -> Self {
        debug!(from = ?self.step, to = ?step, "wizard step");
        Self {
            step,
            ..self.clone()
        }
    }

    /// Location → Bill. Stores the region for immediate display.
    ///
    /// # Errors
    ///
    /// `WrongStep`, or `Region` if the id is not in the table.
    pub fn select_location(
        &self,
        calculator: &Calculator,
        region_id: &str,
    ) -> Result<Self, WizardError> {
        self.expect_step(WizardStep::Location)?;
        let region = calculator.lookup_region(region_id)?.clone();
        let mut next = self.advance(WizardStep::Bill);
        next.input.region_id = region_id.to_string();
        next.region = Some(region);
        Ok(next)
    }

    /// Bill → Property.
    ///
    /// # Errors
    ///
    /// `WrongStep`, or `BillOutOfRange` if `bill` is outside `limits`.
    pub fn set_bill(&self, bill: f64, limits: &BillLimits) -> Result<Self, WizardError> {
        self.expect_step(WizardStep::Bill)?;
        if !limits.accepts(bill) {
            return Err(WizardError::BillOutOfRange {
                bill,
                min: limits.bill_min,
                max: limits.bill_max,
            });
        }
        let mut next = self.advance(WizardStep::Property);
        next.input.monthly_bill = bill;
        Ok(next)
    }

    /// Property → Loading. Apartments continue but are not qualified.
    ///
    /// # Errors
    ///
    /// `WrongStep`.
    pub fn select_property(&self, property_type: PropertyType) -> Result<Self, WizardError> {
        self.expect_step(WizardStep::Property)?;
        let mut next = self.advance(WizardStep::Loading);
        next.input.property_type = property_type;
        Ok(next)
    }

    /// Loading → Contact. Runs the audit on the collected bill and region.
    ///
    /// # Errors
    ///
    /// `WrongStep`, or `Region` if `calculator` does not know the region.
    pub fn run_analysis(&self, calculator: &Calculator) -> Result<Self, WizardError> {
        self.expect_step(WizardStep::Loading)?;
        let result = self.input.audit(calculator)?;
        let mut next = self.advance(WizardStep::Contact);
        next.result = Some(result);
        Ok(next)
    }

    /// Annual savings shown before the contact form; 0 without a result.
    pub fn teaser_savings(&self) -> i64 {
        self.result.as_ref().map_or(0, |r| r.annual_savings)
    }

    /// Contact → Result.
    ///
    /// # Errors
    ///
    /// `WrongStep`, or `InvalidContact`.
    pub fn submit_contact(&self, name: &str, email: &str) -> Result<Self, WizardError> {
        self.expect_step(WizardStep::Contact)?;
        let contact = Contact::new(name, email)?;
        let mut next = self.advance(WizardStep::Result);
        next.contact = Some(contact);
        Ok(next)
    }

    /// Bill → Location, Property → Bill. Answers are kept.
    ///
    /// # Errors
    ///
    /// `NoPreviousStep` from any other step.
    pub fn back(&self) -> Result<Self, WizardError> {
        match self.step {
            WizardStep::Bill => Ok(self.advance(WizardStep::Location)),
            WizardStep::Property => Ok(self.advance(WizardStep::Bill)),
            other => Err(WizardError::NoPreviousStep(other)),
        }
    }

    /// Discards all answers.
    pub fn reset(&self, limits: &BillLimits) -> Self {
        Self::new(limits)
    }

    /// Full report, available only once contact details are in.
    pub fn report(&self, projection: &ProjectionConfig) -> Option<AuditReport> {
        if self.step != WizardStep::Result {
            return None;
        }
        let region = self.region.clone()?;
        let result = self.result.clone()?;
        Some(AuditReport::new(region, self.input.clone(), result, projection))
    }
}
