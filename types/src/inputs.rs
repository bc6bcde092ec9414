//! Raw, typed form inputs prior to encoding.

use serde::{Deserialize, Serialize};

use crate::choice::{ContractType, PaymentMethod, YesNo};
use crate::field::{FieldDomain, FieldError, FieldId, FieldValue};

/// One value per form field, before categorical encoding.
///
/// Deserializing from JSON/TOML with an unknown categorical label fails; there
/// is no catch-all category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawInputs {
    pub account_length: i64,
    pub local_calls: i64,
    pub local_mins: f64,
    pub intl_calls: i64,
    pub intl_mins: f64,
    pub intl_active: YesNo,
    pub intl_plan: YesNo,
    pub extra_intl_charges: f64,
    pub customer_service_calls: i64,
    pub avg_monthly_gb_download: f64,
    pub unlimited_data_plan: YesNo,
    pub extra_data_charges: f64,
    pub age: i64,
    pub group: YesNo,
    pub num_customers_in_group: i64,
    pub device_protection: YesNo,
    pub contract_type: ContractType,
    pub payment_method: PaymentMethod,
    pub monthly_charge: f64,
    pub total_charges: f64,
}

impl Default for RawInputs {
    /// The values a fresh form shows before any interaction.
    fn default() -> Self {
        let mut inputs = Self {
            account_length: 0,
            local_calls: 0,
            local_mins: 0.0,
            intl_calls: 0,
            intl_mins: 0.0,
            intl_active: YesNo::default(),
            intl_plan: YesNo::default(),
            extra_intl_charges: 0.0,
            customer_service_calls: 0,
            avg_monthly_gb_download: 0.0,
            unlimited_data_plan: YesNo::default(),
            extra_data_charges: 0.0,
            age: 0,
            group: YesNo::default(),
            num_customers_in_group: 0,
            device_protection: YesNo::default(),
            contract_type: ContractType::default(),
            payment_method: PaymentMethod::default(),
            monthly_charge: 0.0,
            total_charges: 0.0,
        };
        for field in FieldId::ALL {
            let seeded = inputs.set(field, field.domain().default_value());
            debug_assert!(seeded.is_ok(), "catalog default for {field} has the wrong kind");
        }
        inputs
    }
}

impl RawInputs {
    #[must_use]
    pub fn get(&self, field: FieldId) -> FieldValue {
        match field {
            FieldId::AccountLength => FieldValue::Integer(self.account_length),
            FieldId::LocalCalls => FieldValue::Integer(self.local_calls),
            FieldId::LocalMins => FieldValue::Float(self.local_mins),
            FieldId::IntlCalls => FieldValue::Integer(self.intl_calls),
            FieldId::IntlMins => FieldValue::Float(self.intl_mins),
            FieldId::IntlActive => FieldValue::Flag(self.intl_active),
            FieldId::IntlPlan => FieldValue::Flag(self.intl_plan),
            FieldId::ExtraIntlCharges => FieldValue::Float(self.extra_intl_charges),
            FieldId::CustomerServiceCalls => FieldValue::Integer(self.customer_service_calls),
            FieldId::AvgMonthlyGbDownload => FieldValue::Float(self.avg_monthly_gb_download),
            FieldId::UnlimitedDataPlan => FieldValue::Flag(self.unlimited_data_plan),
            FieldId::ExtraDataCharges => FieldValue::Float(self.extra_data_charges),
            FieldId::Age => FieldValue::Integer(self.age),
            FieldId::Group => FieldValue::Flag(self.group),
            FieldId::NumCustomersInGroup => FieldValue::Integer(self.num_customers_in_group),
            FieldId::DeviceProtection => FieldValue::Flag(self.device_protection),
            FieldId::ContractType => FieldValue::Contract(self.contract_type),
            FieldId::PaymentMethod => FieldValue::Payment(self.payment_method),
            FieldId::MonthlyCharge => FieldValue::Float(self.monthly_charge),
            FieldId::TotalCharges => FieldValue::Float(self.total_charges),
        }
    }

    /// Store `value` as-is. Bounds are the collector's job; only the kind is checked.
    pub fn set(&mut self, field: FieldId, value: FieldValue) -> Result<(), FieldError> {
        let mismatch = || FieldError::KindMismatch {
            field,
            expected: field.domain().value_kind(),
            actual: value.kind(),
        };
        match (field, value) {
            (FieldId::AccountLength, FieldValue::Integer(v)) => self.account_length = v,
            (FieldId::LocalCalls, FieldValue::Integer(v)) => self.local_calls = v,
            (FieldId::LocalMins, FieldValue::Float(v)) => self.local_mins = v,
            (FieldId::IntlCalls, FieldValue::Integer(v)) => self.intl_calls = v,
            (FieldId::IntlMins, FieldValue::Float(v)) => self.intl_mins = v,
            (FieldId::IntlActive, FieldValue::Flag(v)) => self.intl_active = v,
            (FieldId::IntlPlan, FieldValue::Flag(v)) => self.intl_plan = v,
            (FieldId::ExtraIntlCharges, FieldValue::Float(v)) => self.extra_intl_charges = v,
            (FieldId::CustomerServiceCalls, FieldValue::Integer(v)) => {
                self.customer_service_calls = v;
            }
            (FieldId::AvgMonthlyGbDownload, FieldValue::Float(v)) => {
                self.avg_monthly_gb_download = v;
            }
            (FieldId::UnlimitedDataPlan, FieldValue::Flag(v)) => self.unlimited_data_plan = v,
            (FieldId::ExtraDataCharges, FieldValue::Float(v)) => self.extra_data_charges = v,
            (FieldId::Age, FieldValue::Integer(v)) => self.age = v,
            (FieldId::Group, FieldValue::Flag(v)) => self.group = v,
            (FieldId::NumCustomersInGroup, FieldValue::Integer(v)) => {
                self.num_customers_in_group = v;
            }
            (FieldId::DeviceProtection, FieldValue::Flag(v)) => self.device_protection = v,
            (FieldId::ContractType, FieldValue::Contract(v)) => self.contract_type = v,
            (FieldId::PaymentMethod, FieldValue::Payment(v)) => self.payment_method = v,
            (FieldId::MonthlyCharge, FieldValue::Float(v)) => self.monthly_charge = v,
            (FieldId::TotalCharges, FieldValue::Float(v)) => self.total_charges = v,
            _ => return Err(mismatch()),
        }
        Ok(())
    }

    /// True when every numeric value already lies within its declared bounds.
    #[must_use]
    pub fn is_within_bounds(&self) -> bool {
        FieldId::ALL
            .into_iter()
            .all(|field| match (field.domain(), self.get(field)) {
                (FieldDomain::Integer(bounds), FieldValue::Integer(v)) => bounds.clamp(v) == v,
                (FieldDomain::Float(bounds), FieldValue::Float(v)) => bounds.clamp(v) == Some(v),
                (FieldDomain::Choice(_), _) => true,
                _ => false,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::RawInputs;
    use crate::choice::{ContractType, PaymentMethod, YesNo};
    use crate::field::{FieldError, FieldId, FieldValue};

    #[test]
    fn default_matches_catalog_defaults() {
        let inputs = RawInputs::default();
        assert_eq!(inputs.account_length, 12);
        assert_eq!(inputs.local_calls, 100);
        assert_eq!(inputs.local_mins, 1000.0);
        assert_eq!(inputs.age, 35);
        assert_eq!(inputs.num_customers_in_group, 1);
        assert_eq!(inputs.intl_active, YesNo::Yes);
        assert_eq!(inputs.contract_type, ContractType::MonthToMonth);
        assert_eq!(inputs.payment_method, PaymentMethod::PaperCheck);
        assert!(inputs.is_within_bounds());
    }

    #[test]
    fn get_after_set_returns_value() {
        let mut inputs = RawInputs::default();
        for field in FieldId::ALL {
            let value = inputs.get(field);
            inputs.set(field, value).unwrap();
            assert_eq!(inputs.get(field), value);
        }
        inputs
            .set(FieldId::PaymentMethod, FieldValue::Payment(PaymentMethod::CreditCard))
            .unwrap();
        assert_eq!(inputs.payment_method, PaymentMethod::CreditCard);
    }

    #[test]
    fn set_rejects_kind_mismatch() {
        let mut inputs = RawInputs::default();
        let err = inputs
            .set(FieldId::Age, FieldValue::Float(35.0))
            .unwrap_err();
        assert!(matches!(
            err,
            FieldError::KindMismatch {
                field: FieldId::Age,
                ..
            }
        ));
        assert_eq!(err.to_string(), "age expects a integer value, got float");
    }

    #[test]
    fn deserialize_rejects_unknown_category() {
        let mut json = serde_json::to_value(RawInputs::default()).unwrap();
        json["contract_type"] = "Lifetime".into();
        let parsed: Result<RawInputs, _> = serde_json::from_value(json);
        let err = parsed.unwrap_err().to_string();
        assert!(err.contains("Lifetime"), "unexpected error: {err}");
    }

    #[test]
    fn out_of_bounds_inputs_are_detected() {
        let inputs = RawInputs {
            monthly_charge: 95.0,
            ..RawInputs::default()
        };
        assert!(!inputs.is_within_bounds());
    }
}
