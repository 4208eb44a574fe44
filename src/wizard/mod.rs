//! Lead-capture wizard as an explicit session value.
//!
//! The calculator never sees the session: [`WizardSession::run_analysis`]
//! hands it only the bill and region id.

pub mod bill;
pub mod contact;
mod session;

pub use bill::{BillLimits, BillReaction};
pub use contact::Contact;
pub use session::{WizardSession, WizardStep};
