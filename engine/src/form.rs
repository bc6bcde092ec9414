//! Input collector: per-field accessors with clamping and a numeric edit buffer.

use std::num::IntErrorKind;

use churn_types::{
    FieldDomain, FieldError, FieldId, FieldValue, RawInputs, StepDirection, StepSize, ValueKind,
};

/// Text typed into a numeric field that has not been committed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberDraft {
    field: FieldId,
    text: String,
}

impl NumberDraft {
    #[must_use]
    pub fn field(&self) -> FieldId {
        self.field
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Current form values. Every stored numeric value is within its field's bounds.
#[derive(Debug, Clone, Default)]
pub struct Form {
    inputs: RawInputs,
    draft: Option<NumberDraft>,
}

impl Form {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn value(&self, field: FieldId) -> FieldValue {
        self.inputs.get(field)
    }

    #[must_use]
    pub fn raw_inputs(&self) -> RawInputs {
        self.inputs
    }

    /// Store `clamp(value)` and return what was stored.
    pub fn set_integer(&mut self, field: FieldId, value: i64) -> Result<i64, FieldError> {
        let FieldDomain::Integer(bounds) = field.domain() else {
            return Err(kind_mismatch(field, ValueKind::Integer));
        };
        let clamped = bounds.clamp(value);
        self.inputs.set(field, FieldValue::Integer(clamped))?;
        Ok(clamped)
    }

    /// Store `clamp(value)` and return what was stored. NaN and infinities are rejected.
    pub fn set_float(&mut self, field: FieldId, value: f64) -> Result<f64, FieldError> {
        let FieldDomain::Float(bounds) = field.domain() else {
            return Err(kind_mismatch(field, ValueKind::Float));
        };
        let clamped = bounds
            .clamp(value)
            .ok_or(FieldError::NonFinite { field })?;
        self.inputs.set(field, FieldValue::Float(clamped))?;
        Ok(clamped)
    }

    /// Store a categorical value. Numeric fields reject it.
    pub fn set_choice(&mut self, field: FieldId, value: FieldValue) -> Result<(), FieldError> {
        if !matches!(field.domain(), FieldDomain::Choice(_)) {
            return Err(kind_mismatch(field, value.kind()));
        }
        self.inputs.set(field, value)
    }

    pub fn increment(&mut self, field: FieldId, size: StepSize) {
        self.step(field, StepDirection::Up, size);
    }

    pub fn decrement(&mut self, field: FieldId, size: StepSize) {
        self.step(field, StepDirection::Down, size);
    }

    fn step(&mut self, field: FieldId, direction: StepDirection, size: StepSize) {
        let next = match (field.domain(), self.value(field)) {
            (FieldDomain::Integer(bounds), FieldValue::Integer(v)) => {
                FieldValue::Integer(bounds.step(v, direction, size))
            }
            (FieldDomain::Float(bounds), FieldValue::Float(v)) => {
                FieldValue::Float(bounds.step(v, direction, size))
            }
            (FieldDomain::Choice(_), _) => {
                self.cycle_choice(field, direction == StepDirection::Up);
                return;
            }
            _ => return,
        };
        // Kinds come from the same catalog entry, so this cannot mismatch.
        let stored = self.inputs.set(field, next);
        debug_assert!(stored.is_ok(), "step produced the wrong kind for {field}");
    }

    /// Move a select to its next (or previous) option, wrapping around.
    /// Numeric fields are left unchanged.
    pub fn cycle_choice(&mut self, field: FieldId, forward: bool) {
        let next = match self.value(field) {
            FieldValue::Flag(v) => FieldValue::Flag(v.cycled(forward)),
            FieldValue::Contract(v) => FieldValue::Contract(v.cycled(forward)),
            FieldValue::Payment(v) => FieldValue::Payment(v.cycled(forward)),
            FieldValue::Integer(_) | FieldValue::Float(_) => return,
        };
        let stored = self.inputs.set(field, next);
        debug_assert!(stored.is_ok(), "cycled option has the wrong kind for {field}");
    }

    /// Restore every field to its catalog default and drop any pending edit.
    pub fn reset(&mut self) {
        self.inputs = RawInputs::default();
        self.draft = None;
    }

    #[must_use]
    pub fn draft(&self) -> Option<&NumberDraft> {
        self.draft.as_ref()
    }

    /// Append a typed character to `field`'s edit buffer.
    ///
    /// Digits are accepted on every numeric field; a single `.` only on float
    /// fields. Returns whether the character was taken.
    pub fn push_char(&mut self, field: FieldId, ch: char) -> bool {
        let kind = field.domain().value_kind();
        let allowed = match kind {
            ValueKind::Integer => ch.is_ascii_digit(),
            ValueKind::Float => ch.is_ascii_digit() || ch == '.',
            ValueKind::Choice(_) => false,
        };
        if !allowed {
            return false;
        }

        if self.draft.as_ref().is_some_and(|d| d.field != field) {
            self.draft = None;
        }
        let draft = self.draft.get_or_insert_with(|| NumberDraft {
            field,
            text: String::new(),
        });
        if ch == '.' && draft.text.contains('.') {
            return false;
        }
        draft.text.push(ch);
        true
    }

    /// Remove the last character of the edit buffer. An emptied buffer is dropped.
    pub fn backspace(&mut self, field: FieldId) {
        let Some(draft) = self.draft.as_mut().filter(|d| d.field == field) else {
            return;
        };
        draft.text.pop();
        if draft.text.is_empty() {
            self.draft = None;
        }
    }

    pub fn cancel_draft(&mut self) {
        self.draft = None;
    }

    /// Parse, clamp, and store the edit buffer.
    ///
    /// Returns the stored value, or `Ok(None)` when there was nothing to commit.
    /// On a parse failure the buffer is discarded and the previous value stays.
    pub fn commit_draft(&mut self) -> Result<Option<FieldValue>, FieldError> {
        let Some(NumberDraft { field, text }) = self.draft.take() else {
            return Ok(None);
        };
        let unparsable = |expected| FieldError::Unparsable {
            field,
            expected,
            raw: text.clone(),
        };
        match field.domain() {
            FieldDomain::Integer(_) => {
                // The buffer only holds digits, so overflow means "very large".
                let parsed = match text.parse::<i64>() {
                    Ok(v) => v,
                    Err(e) if *e.kind() == IntErrorKind::PosOverflow => i64::MAX,
                    Err(_) => return Err(unparsable(ValueKind::Integer)),
                };
                self.set_integer(field, parsed).map(|v| Some(FieldValue::Integer(v)))
            }
            FieldDomain::Float(_) => {
                let parsed: f64 = text.parse().map_err(|_| unparsable(ValueKind::Float))?;
                self.set_float(field, parsed).map(|v| Some(FieldValue::Float(v)))
            }
            FieldDomain::Choice(kind) => Err(unparsable(ValueKind::Choice(kind))),
        }
    }
}

fn kind_mismatch(field: FieldId, actual: ValueKind) -> FieldError {
    FieldError::KindMismatch {
        field,
        expected: field.domain().value_kind(),
        actual,
    }
}
