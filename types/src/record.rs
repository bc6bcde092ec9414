//! The fixed-schema feature record and the encoder that builds it.

use std::fmt;

use serde::Serialize;

use crate::field::{FIELD_COUNT, FieldId};
use crate::inputs::RawInputs;

/// One scalar cell of a [`FeatureRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Integer(i64),
    Float(f64),
}

impl FeatureValue {
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            FeatureValue::Integer(v) => v as f64,
            FeatureValue::Float(v) => v,
        }
    }

    #[must_use]
    pub fn as_f32(self) -> f32 {
        match self {
            FeatureValue::Integer(v) => v as f32,
            FeatureValue::Float(v) => v as f32,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Integer(v) => write!(f, "{v}"),
            // Debug keeps the trailing ".0" on whole floats.
            FeatureValue::Float(v) => write!(f, "{v:?}"),
        }
    }
}

/// Ordered feature row in the classifier's training schema.
///
/// Built fresh per submission by [`encode`]; the column order is fixed by
/// [`FieldId::ALL`] and cannot be rearranged by callers.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    values: [FeatureValue; FIELD_COUNT],
}

impl FeatureRecord {
    /// Column names in schema order.
    #[must_use]
    pub fn columns() -> [&'static str; FIELD_COUNT] {
        FieldId::ALL.map(FieldId::column)
    }

    #[must_use]
    pub fn values(&self) -> &[FeatureValue; FIELD_COUNT] {
        &self.values
    }

    #[must_use]
    pub fn get(&self, field: FieldId) -> FeatureValue {
        self.values[field.index()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Row as single-precision floats, the representation tree models split on.
    #[must_use]
    pub fn to_f32_row(&self) -> [f32; FIELD_COUNT] {
        self.values.map(FeatureValue::as_f32)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FeatureValue)> + '_ {
        FieldId::ALL
            .into_iter()
            .map(|field| (field.column(), self.values[field.index()]))
    }
}

impl fmt::Display for FeatureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (idx, value) in self.values.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str(")")
    }
}

impl Serialize for FeatureRecord {
    /// Serializes as a map of column name to value, in schema order.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(FIELD_COUNT))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, &value)?;
        }
        map.end()
    }
}

/// Encode raw inputs into the classifier's feature row.
///
/// Pure and total: every categorical is a closed enum, so there is no
/// unrecognized-value branch to fall through.
#[must_use]
pub fn encode(inputs: &RawInputs) -> FeatureRecord {
    use FeatureValue::{Float, Integer};

    FeatureRecord {
        values: [
            Integer(inputs.account_length),
            Integer(inputs.local_calls),
            Float(inputs.local_mins),
            Integer(inputs.intl_calls),
            Float(inputs.intl_mins),
            Integer(inputs.intl_active.code()),
            Integer(inputs.intl_plan.code()),
            Float(inputs.extra_intl_charges),
            Integer(inputs.customer_service_calls),
            Float(inputs.avg_monthly_gb_download),
            Integer(inputs.unlimited_data_plan.code()),
            Float(inputs.extra_data_charges),
            Integer(inputs.age),
            Integer(inputs.group.code()),
            Integer(inputs.num_customers_in_group),
            Integer(inputs.device_protection.code()),
            Integer(inputs.contract_type.code()),
            Integer(inputs.payment_method.code()),
            Float(inputs.monthly_charge),
            Float(inputs.total_charges),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::{FeatureRecord, FeatureValue, encode};
    use crate::choice::{ContractType, PaymentMethod, YesNo};
    use crate::field::{FIELD_COUNT, FieldId, FieldValue};
    use crate::inputs::RawInputs;

    fn reference_inputs() -> RawInputs {
        RawInputs {
            account_length: 12,
            local_calls: 100,
            local_mins: 1000.0,
            intl_calls: 10,
            intl_mins: 100.0,
            intl_active: "Yes".parse().unwrap(),
            intl_plan: "No".parse().unwrap(),
            extra_intl_charges: 50.0,
            customer_service_calls: 2,
            avg_monthly_gb_download: 10.0,
            unlimited_data_plan: "Yes".parse().unwrap(),
            extra_data_charges: 5.0,
            age: 35,
            group: "No".parse().unwrap(),
            num_customers_in_group: 1,
            device_protection: "No".parse().unwrap(),
            contract_type: "Month-to-Month".parse().unwrap(),
            payment_method: "Paper Check".parse().unwrap(),
            monthly_charge: 45.0,
            total_charges: 1000.0,
        }
    }

    #[test]
    fn reference_example_encodes_to_expected_row() {
        let record = encode(&reference_inputs());
        insta::assert_snapshot!(
            record.to_string(),
            @"(12, 100, 1000.0, 10, 100.0, 1, 0, 50.0, 2, 10.0, 1, 5.0, 35, 0, 1, 0, 0, 0, 45.0, 1000.0)"
        );
    }

    #[test]
    fn reference_example_numeric_row() {
        let record = encode(&reference_inputs());
        let expected = [
            12.0, 100.0, 1000.0, 10.0, 100.0, 1.0, 0.0, 50.0, 2.0, 10.0, 1.0, 5.0, 35.0, 0.0, 1.0,
            0.0, 0.0, 0.0, 45.0, 1000.0,
        ];
        let actual: Vec<f64> = record.values().iter().map(|v| v.as_f64()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn encode_is_deterministic() {
        let inputs = reference_inputs();
        assert_eq!(encode(&inputs), encode(&inputs));
        assert_eq!(encode(&inputs).to_string(), encode(&inputs).to_string());
    }

    #[test]
    fn schema_has_twenty_named_columns_in_training_order() {
        let columns = FeatureRecord::columns();
        assert_eq!(columns.len(), FIELD_COUNT);
        assert_eq!(
            columns,
            [
                "account length (in months)",
                "local calls",
                "local mins",
                "intl calls",
                "intl mins",
                "intl active",
                "intl plan",
                "extra international charges",
                "customer service calls",
                "avg monthly gb download",
                "unlimited data plan",
                "extra data charges",
                "age",
                "group",
                "number of customers in group",
                "device protection & online backup",
                "contract type",
                "payment method",
                "monthly charge",
                "total charges",
            ]
        );
    }

    #[test]
    fn every_boolean_field_encodes_yes_as_one_and_no_as_zero() {
        let flags = [
            FieldId::IntlActive,
            FieldId::IntlPlan,
            FieldId::UnlimitedDataPlan,
            FieldId::Group,
            FieldId::DeviceProtection,
        ];
        for field in flags {
            for (choice, code) in [(YesNo::Yes, 1), (YesNo::No, 0)] {
                let mut inputs = reference_inputs();
                inputs.set(field, FieldValue::Flag(choice)).unwrap();
                assert_eq!(
                    encode(&inputs).get(field),
                    FeatureValue::Integer(code),
                    "{field} = {choice}"
                );
            }
        }
    }

    #[test]
    fn categoricals_encode_to_their_codes() {
        for (choice, code) in ContractType::ALL.into_iter().zip(0..) {
            let inputs = RawInputs {
                contract_type: choice,
                ..reference_inputs()
            };
            assert_eq!(
                encode(&inputs).get(FieldId::ContractType),
                FeatureValue::Integer(code)
            );
        }
        for (choice, code) in PaymentMethod::ALL.into_iter().zip(0..) {
            let inputs = RawInputs {
                payment_method: choice,
                ..reference_inputs()
            };
            assert_eq!(
                encode(&inputs).get(FieldId::PaymentMethod),
                FeatureValue::Integer(code)
            );
        }
    }

    #[test]
    fn entered_numeric_values_pass_through_unchanged() {
        let inputs = RawInputs {
            local_mins: 1234.56,
            total_charges: 7999.99,
            ..reference_inputs()
        };
        let record = encode(&inputs);
        assert_eq!(record.get(FieldId::LocalMins), FeatureValue::Float(1234.56));
        assert_eq!(record.get(FieldId::TotalCharges), FeatureValue::Float(7999.99));
    }

    #[test]
    fn serializes_as_named_columns() {
        let json = serde_json::to_value(encode(&reference_inputs())).unwrap();
        assert_eq!(json["account length (in months)"], 12);
        assert_eq!(json["device protection & online backup"], 0);
        assert_eq!(json["total charges"], 1000.0);
    }
}
