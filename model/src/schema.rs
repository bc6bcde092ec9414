//! Load-time check that a model's feature schema matches the encoder.

use churn_types::{FIELD_COUNT, FeatureRecord};

use crate::ModelError;

/// Compare declared feature names (if any) and the feature count against
/// [`FeatureRecord::columns`].
///
/// Name comparison is exact: order and spelling both matter, since a column
/// swap would otherwise produce silently wrong predictions.
pub fn check_schema(names: Option<&[String]>, num_feature: usize) -> Result<(), ModelError> {
    if num_feature != FIELD_COUNT {
        return Err(ModelError::FeatureCount {
            expected: FIELD_COUNT,
            found: num_feature,
        });
    }

    let Some(names) = names.filter(|names| !names.is_empty()) else {
        tracing::debug!("Model carries no feature names; checked feature count only");
        return Ok(());
    };

    if names.len() != FIELD_COUNT {
        return Err(ModelError::FeatureCount {
            expected: FIELD_COUNT,
            found: names.len(),
        });
    }

    let columns = FeatureRecord::columns();
    if let Some((index, (expected, found))) = columns
        .iter()
        .zip(names)
        .enumerate()
        .find(|(_, (expected, found))| **expected != found.as_str())
    {
        return Err(ModelError::SchemaMismatch {
            index,
            expected: *expected,
            found: found.clone(),
        });
    }

    Ok(())
}
