//! End-to-end scoring: form state → encoder → XGBoost evaluator → result line.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use churn_engine::{App, Focus, Outcome, RESULT_PREFIX};
use churn_types::{ContractType, FieldId, FieldValue, RawInputs, encode};

use crate::common::{app_with, load_fixture_classifier};

fn press(app: &mut App, code: KeyCode) {
    churn_tui::apply_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
}

fn scored_message(app: &App) -> String {
    match app.outcome() {
        Some(Outcome::Scored(prediction)) => prediction.message(),
        other => panic!("expected a prediction, got {other:?}"),
    }
}

#[test]
fn default_form_scores_through_fixture_model() {
    let mut app = app_with(load_fixture_classifier());
    app.submit();
    assert_eq!(
        scored_message(&app),
        format!("{RESULT_PREFIX}64.57%")
    );
}

#[test]
fn keyboard_edits_change_the_score() {
    let mut app = app_with(load_fixture_classifier());

    // Month-to-Month → One Year moves tree 0 to its right leaf.
    app.set_focus(Focus::Field(FieldId::ContractType));
    press(&mut app, KeyCode::Right);
    assert_eq!(
        app.value(FieldId::ContractType),
        FieldValue::Contract(ContractType::OneYear)
    );

    press(&mut app, KeyCode::Char('p'));
    assert_eq!(
        scored_message(&app),
        "The customer is likely to churn with a probability of: 31.00%"
    );
}

#[test]
fn typed_monthly_charge_is_committed_before_scoring() {
    let mut app = app_with(load_fixture_classifier());

    app.set_focus(Focus::Field(FieldId::MonthlyCharge));
    for ch in "80".chars() {
        press(&mut app, KeyCode::Char(ch));
    }
    app.set_focus(Focus::Predict);
    press(&mut app, KeyCode::Enter);

    // 0.8 + 0.3 = 1.1 → 75.03%
    assert_eq!(app.value(FieldId::MonthlyCharge), FieldValue::Float(80.0));
    assert!(scored_message(&app).ends_with("75.03%"));
}

#[test]
fn submissions_are_independent() {
    let mut app = app_with(load_fixture_classifier());

    app.submit();
    let first = scored_message(&app);

    app.set_focus(Focus::Field(FieldId::ContractType));
    press(&mut app, KeyCode::Right);
    app.submit();
    assert_ne!(scored_message(&app), first);

    press(&mut app, KeyCode::Char('r'));
    app.submit();
    assert_eq!(scored_message(&app), first);
}

#[test]
fn prediction_keeps_the_encoded_record() {
    let mut app = app_with(load_fixture_classifier());
    app.submit();
    let Some(Outcome::Scored(prediction)) = app.outcome() else {
        panic!("expected a prediction");
    };
    assert_eq!(prediction.record(), &encode(&RawInputs::default()));
    let (no, yes) = prediction.probabilities().as_pair();
    assert!((no + yes - 1.0).abs() <= 1e-9);
}
