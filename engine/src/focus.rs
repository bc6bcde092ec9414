use churn_types::{FIELD_COUNT, FieldId};

/// Which control has keyboard focus: a form field or the Predict button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FieldId),
    Predict,
}

impl Default for Focus {
    fn default() -> Self {
        Focus::Field(FieldId::FORM_ORDER[0])
    }
}

impl Focus {
    const STOPS: usize = FIELD_COUNT + 1;

    fn position(self) -> usize {
        match self {
            Focus::Field(field) => FieldId::FORM_ORDER
                .iter()
                .position(|f| *f == field)
                .unwrap_or(0),
            Focus::Predict => FIELD_COUNT,
        }
    }

    fn at(position: usize) -> Self {
        FieldId::FORM_ORDER
            .get(position)
            .copied()
            .map_or(Focus::Predict, Focus::Field)
    }

    /// Next stop in form order, wrapping from the Predict button to the first field.
    #[must_use]
    pub fn next(self) -> Self {
        Self::at((self.position() + 1) % Self::STOPS)
    }

    #[must_use]
    pub fn prev(self) -> Self {
        Self::at((self.position() + Self::STOPS - 1) % Self::STOPS)
    }

    #[must_use]
    pub fn field(self) -> Option<FieldId> {
        match self {
            Focus::Field(field) => Some(field),
            Focus::Predict => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use churn_types::FieldId;

    use super::Focus;

    #[test]
    fn starts_on_first_slider() {
        assert_eq!(Focus::default(), Focus::Field(FieldId::LocalCalls));
    }

    #[test]
    fn walks_form_order_then_predict() {
        let mut focus = Focus::default();
        let mut seen = Vec::new();
        for _ in 0..21 {
            seen.push(focus);
            focus = focus.next();
        }
        assert_eq!(seen[20], Focus::Predict);
        assert_eq!(seen[19], Focus::Field(FieldId::PaymentMethod));
        assert_eq!(focus, Focus::default());
    }

    #[test]
    fn prev_wraps_to_predict() {
        assert_eq!(Focus::default().prev(), Focus::Predict);
        assert_eq!(
            Focus::Predict.prev(),
            Focus::Field(FieldId::PaymentMethod)
        );
    }
}
