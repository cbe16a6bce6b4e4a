use keydash::core::form::{self, SubmitOutcome, REQUIRED_FIELDS_MESSAGE};
use keydash::domain::model::{Form, FormField, Severity};
use keydash::SharedAlerts;

fn key_form(key: &str, module: &str) -> Form {
    Form::new(vec![
        FormField::required("key", key),
        FormField::required("module", module),
        FormField::optional("note", ""),
    ])
}

#[test]
fn test_empty_required_field_blocks_submission() {
    let alerts = SharedAlerts::default();
    let mut form = key_form("VX-1", "   ");

    let outcome = form::validate_submission(&mut form, &alerts);

    assert_eq!(
        outcome,
        SubmitOutcome::Blocked {
            invalid: vec!["module".to_string()]
        }
    );
    let invalid: Vec<_> = form
        .fields
        .iter()
        .filter(|f| f.invalid)
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(invalid, vec!["module"]);

    let shown = alerts.snapshot();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].message, REQUIRED_FIELDS_MESSAGE);
    assert_eq!(shown[0].severity, Severity::Danger);
}

#[test]
fn test_filling_field_and_resubmitting_proceeds() {
    let alerts = SharedAlerts::default();
    let mut form = key_form("", "");

    assert!(form::validate_submission(&mut form, &alerts).is_blocked());
    assert!(form.field("key").unwrap().invalid);

    form::on_input(&mut form, "key", "VX-7");
    assert!(!form.field("key").unwrap().invalid);
    assert!(form.field("module").unwrap().invalid);

    form::on_input(&mut form, "module", "voice");
    assert_eq!(form::validate_submission(&mut form, &alerts), SubmitOutcome::Proceed);
    assert!(form.fields.iter().all(|f| !f.invalid));
    assert_eq!(alerts.snapshot().len(), 1);
}

#[test]
fn test_passing_validation_clears_stale_markers() {
    let alerts = SharedAlerts::default();
    let mut form = key_form("VX-1", "image");
    form.field_mut("module").unwrap().invalid = true;

    assert_eq!(form::validate_submission(&mut form, &alerts), SubmitOutcome::Proceed);
    assert!(!form.field("module").unwrap().invalid);
    assert!(alerts.snapshot().is_empty());
}
