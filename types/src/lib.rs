//! Core domain types for the churn form.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies:
//! the field catalog, typed raw inputs, the feature encoder, and classifier output types.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod choice;
mod field;
mod inputs;
mod probability;
mod record;

pub use choice::{ChoiceKind, ChoiceParseError, ContractType, PaymentMethod, YesNo};
pub use field::{
    FIELD_COUNT, FIELDS, FieldDomain, FieldError, FieldId, FieldSpec, FieldValue, FloatBounds,
    IntegerBounds, Section, StepDirection, StepSize, ValueKind, Widget,
};
pub use inputs::RawInputs;
pub use probability::{ChurnProbability, ClassProbabilities, ProbabilityError, SUM_TOLERANCE};
pub use record::{FeatureRecord, FeatureValue, encode};
