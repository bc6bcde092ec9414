//! Field catalog: schema order, column names, bounds, defaults, and form layout.

use std::fmt;

use thiserror::Error;

use crate::choice::{ChoiceKind, ContractType, PaymentMethod, YesNo};

pub const FIELD_COUNT: usize = 20;

/// Input fields in the order the classifier was trained on.
///
/// The discriminant is the column index in [`crate::FeatureRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    AccountLength = 0,
    LocalCalls = 1,
    LocalMins = 2,
    IntlCalls = 3,
    IntlMins = 4,
    IntlActive = 5,
    IntlPlan = 6,
    ExtraIntlCharges = 7,
    CustomerServiceCalls = 8,
    AvgMonthlyGbDownload = 9,
    UnlimitedDataPlan = 10,
    ExtraDataCharges = 11,
    Age = 12,
    Group = 13,
    NumCustomersInGroup = 14,
    DeviceProtection = 15,
    ContractType = 16,
    PaymentMethod = 17,
    MonthlyCharge = 18,
    TotalCharges = 19,
}

impl FieldId {
    /// Schema order.
    pub const ALL: [FieldId; FIELD_COUNT] = [
        FieldId::AccountLength,
        FieldId::LocalCalls,
        FieldId::LocalMins,
        FieldId::IntlCalls,
        FieldId::IntlMins,
        FieldId::IntlActive,
        FieldId::IntlPlan,
        FieldId::ExtraIntlCharges,
        FieldId::CustomerServiceCalls,
        FieldId::AvgMonthlyGbDownload,
        FieldId::UnlimitedDataPlan,
        FieldId::ExtraDataCharges,
        FieldId::Age,
        FieldId::Group,
        FieldId::NumCustomersInGroup,
        FieldId::DeviceProtection,
        FieldId::ContractType,
        FieldId::PaymentMethod,
        FieldId::MonthlyCharge,
        FieldId::TotalCharges,
    ];

    /// Display order: sidebar sliders, then account inputs, then plan selects.
    pub const FORM_ORDER: [FieldId; FIELD_COUNT] = [
        FieldId::LocalCalls,
        FieldId::LocalMins,
        FieldId::IntlMins,
        FieldId::ExtraIntlCharges,
        FieldId::MonthlyCharge,
        FieldId::TotalCharges,
        FieldId::AccountLength,
        FieldId::IntlCalls,
        FieldId::CustomerServiceCalls,
        FieldId::AvgMonthlyGbDownload,
        FieldId::Age,
        FieldId::NumCustomersInGroup,
        FieldId::ExtraDataCharges,
        FieldId::IntlActive,
        FieldId::IntlPlan,
        FieldId::UnlimitedDataPlan,
        FieldId::Group,
        FieldId::DeviceProtection,
        FieldId::ContractType,
        FieldId::PaymentMethod,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn spec(self) -> &'static FieldSpec {
        &FIELDS[self.index()]
    }

    #[must_use]
    pub fn column(self) -> &'static str {
        self.spec().column
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        self.spec().label
    }

    #[must_use]
    pub fn domain(self) -> FieldDomain {
        self.spec().domain
    }

    #[must_use]
    pub fn section(self) -> Section {
        self.spec().section
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    CallDetails,
    AccountInformation,
    PlanAndService,
}

impl Section {
    pub const ALL: [Section; 3] = [
        Section::CallDetails,
        Section::AccountInformation,
        Section::PlanAndService,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Section::CallDetails => "Call Details",
            Section::AccountInformation => "Account Information",
            Section::PlanAndService => "Plan and Service Options",
        }
    }

    pub fn fields(self) -> impl Iterator<Item = FieldId> {
        FieldId::FORM_ORDER
            .into_iter()
            .filter(move |field| field.section() == self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    Slider,
    NumberInput,
    Select,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegerBounds {
    pub min: i64,
    pub max: Option<i64>,
    pub default: i64,
}

impl IntegerBounds {
    pub const FINE_STEP: i64 = 1;
    pub const COARSE_STEP: i64 = 10;

    #[must_use]
    pub fn clamp(self, value: i64) -> i64 {
        let value = value.max(self.min);
        match self.max {
            Some(max) => value.min(max),
            None => value,
        }
    }

    #[must_use]
    pub fn step(self, value: i64, direction: StepDirection, size: StepSize) -> i64 {
        let delta = match size {
            StepSize::Fine => Self::FINE_STEP,
            StepSize::Coarse => Self::COARSE_STEP,
        };
        let next = match direction {
            StepDirection::Up => value.saturating_add(delta),
            StepDirection::Down => value.saturating_sub(delta),
        };
        self.clamp(next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatBounds {
    pub min: f64,
    pub max: Option<f64>,
    pub default: f64,
}

impl FloatBounds {
    pub const FINE_STEP: f64 = 0.01;
    pub const COARSE_STEP: f64 = 1.0;

    /// Returns `None` for NaN and infinities; those are rejected, not clamped.
    #[must_use]
    pub fn clamp(self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let value = value.max(self.min);
        Some(match self.max {
            Some(max) => value.min(max),
            None => value,
        })
    }

    #[must_use]
    pub fn step(self, value: f64, direction: StepDirection, size: StepSize) -> f64 {
        let delta = match size {
            StepSize::Fine => Self::FINE_STEP,
            StepSize::Coarse => Self::COARSE_STEP,
        };
        let next = match direction {
            StepDirection::Up => value + delta,
            StepDirection::Down => value - delta,
        };
        // Keep repeated 0.01 steps from accumulating binary noise.
        let next = (next * 100.0).round() / 100.0;
        self.clamp(next).unwrap_or(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepSize {
    Fine,
    Coarse,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDomain {
    Integer(IntegerBounds),
    Float(FloatBounds),
    Choice(ChoiceKind),
}

impl FieldDomain {
    #[must_use]
    pub const fn value_kind(self) -> ValueKind {
        match self {
            FieldDomain::Integer(_) => ValueKind::Integer,
            FieldDomain::Float(_) => ValueKind::Float,
            FieldDomain::Choice(kind) => ValueKind::Choice(kind),
        }
    }

    #[must_use]
    pub fn default_value(self) -> FieldValue {
        match self {
            FieldDomain::Integer(bounds) => FieldValue::Integer(bounds.default),
            FieldDomain::Float(bounds) => FieldValue::Float(bounds.default),
            FieldDomain::Choice(ChoiceKind::YesNo) => FieldValue::Flag(YesNo::default()),
            FieldDomain::Choice(ChoiceKind::ContractType) => {
                FieldValue::Contract(ContractType::default())
            }
            FieldDomain::Choice(ChoiceKind::PaymentMethod) => {
                FieldValue::Payment(PaymentMethod::default())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Float,
    Choice(ChoiceKind),
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Integer => f.write_str("integer"),
            ValueKind::Float => f.write_str("float"),
            ValueKind::Choice(kind) => write!(f, "{kind} choice"),
        }
    }
}

/// A typed value for one field, as held by the form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Flag(YesNo),
    Contract(ContractType),
    Payment(PaymentMethod),
}

impl FieldValue {
    #[must_use]
    pub const fn kind(self) -> ValueKind {
        match self {
            FieldValue::Integer(_) => ValueKind::Integer,
            FieldValue::Float(_) => ValueKind::Float,
            FieldValue::Flag(_) => ValueKind::Choice(ChoiceKind::YesNo),
            FieldValue::Contract(_) => ValueKind::Choice(ChoiceKind::ContractType),
            FieldValue::Payment(_) => ValueKind::Choice(ChoiceKind::PaymentMethod),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => write!(f, "{v}"),
            FieldValue::Float(v) => write!(f, "{v:.2}"),
            FieldValue::Flag(v) => f.write_str(v.label()),
            FieldValue::Contract(v) => f.write_str(v.label()),
            FieldValue::Payment(v) => f.write_str(v.label()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{field} expects a {expected} value, got {actual}")]
    KindMismatch {
        field: FieldId,
        expected: ValueKind,
        actual: ValueKind,
    },
    #[error("{field} must be a finite number")]
    NonFinite { field: FieldId },
    #[error("'{raw}' is not a valid {expected} for {field}")]
    Unparsable {
        field: FieldId,
        expected: ValueKind,
        raw: String,
    },
}

/// Static description of one input field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub id: FieldId,
    /// Column name in the trained schema.
    pub column: &'static str,
    pub label: &'static str,
    pub help: Option<&'static str>,
    pub section: Section,
    pub widget: Widget,
    pub domain: FieldDomain,
}

const fn int(min: i64, max: Option<i64>, default: i64) -> FieldDomain {
    FieldDomain::Integer(IntegerBounds { min, max, default })
}

const fn float(min: f64, max: Option<f64>, default: f64) -> FieldDomain {
    FieldDomain::Float(FloatBounds { min, max, default })
}

const YES_NO: FieldDomain = FieldDomain::Choice(ChoiceKind::YesNo);

/// Indexed by [`FieldId::index`].
pub static FIELDS: [FieldSpec; FIELD_COUNT] = [
    FieldSpec {
        id: FieldId::AccountLength,
        column: "account length (in months)",
        label: "Account Age (in months)",
        help: None,
        section: Section::AccountInformation,
        widget: Widget::NumberInput,
        domain: int(1, Some(100), 12),
    },
    FieldSpec {
        id: FieldId::LocalCalls,
        column: "local calls",
        label: "Local Calls Made",
        help: None,
        section: Section::CallDetails,
        widget: Widget::Slider,
        domain: int(0, Some(2000), 100),
    },
    FieldSpec {
        id: FieldId::LocalMins,
        column: "local mins",
        label: "Total Local Call Minutes",
        help: None,
        section: Section::CallDetails,
        widget: Widget::Slider,
        domain: float(0.0, Some(5000.0), 1000.0),
    },
    FieldSpec {
        id: FieldId::IntlCalls,
        column: "intl calls",
        label: "International Calls Made",
        help: None,
        section: Section::AccountInformation,
        widget: Widget::NumberInput,
        domain: int(0, None, 10),
    },
    FieldSpec {
        id: FieldId::IntlMins,
        column: "intl mins",
        label: "Total International Call Minutes",
        help: None,
        section: Section::CallDetails,
        widget: Widget::Slider,
        domain: float(0.0, Some(2000.0), 100.0),
    },
    FieldSpec {
        id: FieldId::IntlActive,
        column: "intl active",
        label: "Are International Calls Active?",
        help: Some("Specify if international calls are active."),
        section: Section::PlanAndService,
        widget: Widget::Select,
        domain: YES_NO,
    },
    FieldSpec {
        id: FieldId::IntlPlan,
        column: "intl plan",
        label: "Is there a Premium International Plan?",
        help: Some("Does the customer have a premium international plan?"),
        section: Section::PlanAndService,
        widget: Widget::Select,
        domain: YES_NO,
    },
    FieldSpec {
        id: FieldId::ExtraIntlCharges,
        column: "extra international charges",
        label: "Extra International Charges ($)",
        help: None,
        section: Section::CallDetails,
        widget: Widget::Slider,
        domain: float(0.0, Some(1000.0), 50.0),
    },
    FieldSpec {
        id: FieldId::CustomerServiceCalls,
        column: "customer service calls",
        label: "Customer Service Calls",
        help: None,
        section: Section::AccountInformation,
        widget: Widget::NumberInput,
        domain: int(0, None, 2),
    },
    FieldSpec {
        id: FieldId::AvgMonthlyGbDownload,
        column: "avg monthly gb download",
        label: "Average Monthly GB Download",
        help: None,
        section: Section::AccountInformation,
        widget: Widget::NumberInput,
        domain: float(0.0, None, 10.0),
    },
    FieldSpec {
        id: FieldId::UnlimitedDataPlan,
        column: "unlimited data plan",
        label: "Unlimited Data Plan?",
        help: Some("Is the customer on an unlimited data plan?"),
        section: Section::PlanAndService,
        widget: Widget::Select,
        domain: YES_NO,
    },
    FieldSpec {
        id: FieldId::ExtraDataCharges,
        column: "extra data charges",
        label: "Extra Data Charges ($)",
        help: None,
        section: Section::AccountInformation,
        widget: Widget::NumberInput,
        domain: float(0.0, None, 5.0),
    },
    FieldSpec {
        id: FieldId::Age,
        column: "age",
        label: "Customer Age",
        help: None,
        section: Section::AccountInformation,
        widget: Widget::NumberInput,
        domain: int(18, Some(100), 35),
    },
    FieldSpec {
        id: FieldId::Group,
        column: "group",
        label: "Does the Customer Belong to a Group?",
        help: Some("Is the customer part of a group plan?"),
        section: Section::PlanAndService,
        widget: Widget::Select,
        domain: YES_NO,
    },
    FieldSpec {
        id: FieldId::NumCustomersInGroup,
        column: "number of customers in group",
        label: "Number of Customers in Group",
        help: None,
        section: Section::AccountInformation,
        widget: Widget::NumberInput,
        domain: int(1, None, 1),
    },
    FieldSpec {
        id: FieldId::DeviceProtection,
        column: "device protection & online backup",
        label: "Device Protection & Online Backup?",
        help: Some("Does the customer have device protection?"),
        section: Section::PlanAndService,
        widget: Widget::Select,
        domain: YES_NO,
    },
    FieldSpec {
        id: FieldId::ContractType,
        column: "contract type",
        label: "Contract Type",
        help: None,
        section: Section::PlanAndService,
        widget: Widget::Select,
        domain: FieldDomain::Choice(ChoiceKind::ContractType),
    },
    FieldSpec {
        id: FieldId::PaymentMethod,
        column: "payment method",
        label: "Payment Method",
        help: None,
        section: Section::PlanAndService,
        widget: Widget::Select,
        domain: FieldDomain::Choice(ChoiceKind::PaymentMethod),
    },
    FieldSpec {
        id: FieldId::MonthlyCharge,
        column: "monthly charge",
        label: "Monthly Charge ($)",
        help: None,
        section: Section::CallDetails,
        widget: Widget::Slider,
        domain: float(0.0, Some(90.0), 45.0),
    },
    FieldSpec {
        id: FieldId::TotalCharges,
        column: "total charges",
        label: "Total Charges ($)",
        help: None,
        section: Section::CallDetails,
        widget: Widget::Slider,
        domain: float(0.0, Some(8000.0), 1000.0),
    },
];
