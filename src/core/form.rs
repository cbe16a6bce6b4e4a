use crate::domain::model::{Form, Severity};
use crate::domain::ports::{Confirmer, Notifier};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields!";
pub const CONFIRM_DESTRUCTIVE_MESSAGE: &str = "Are you sure you want to perform this action?";
pub const LOADING_LABEL: &str = "Processing...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Proceed,
    /// 被擋下的提交，附上未填寫的欄位名稱
    Blocked { invalid: Vec<String> },
}

impl SubmitOutcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, SubmitOutcome::Blocked { .. })
    }
}

/// Checks every required field on submit.
///
/// Failing fields get their invalid marker, passing ones lose it. Any failure
/// blocks the submission and shows one aggregate danger banner.
pub fn validate_submission(form: &mut Form, notifier: &dyn Notifier) -> SubmitOutcome {
    let mut invalid = Vec::new();

    for field in form.fields.iter_mut().filter(|f| f.required) {
        field.invalid = field.value.trim().is_empty();
        if field.invalid {
            invalid.push(field.name.clone());
        }
    }

    if invalid.is_empty() {
        return SubmitOutcome::Proceed;
    }

    tracing::debug!(fields = ?invalid, "form submission blocked");
    notifier.notify(REQUIRED_FIELDS_MESSAGE, Severity::Danger);
    SubmitOutcome::Blocked { invalid }
}

/// Updates a field's value as the user types and clears its invalid marker.
pub fn on_input(form: &mut Form, name: &str, value: &str) -> bool {
    match form.field_mut(name) {
        Some(field) => {
            field.value = value.to_string();
            field.invalid = false;
            true
        }
        None => false,
    }
}

/// Asks before a destructive action; `false` cancels it.
pub fn confirm_destructive(confirmer: &dyn Confirmer) -> bool {
    let confirmed = confirmer.confirm(CONFIRM_DESTRUCTIVE_MESSAGE);
    if !confirmed {
        tracing::debug!("destructive action cancelled");
    }
    confirmed
}

/// A submit button that can show a busy state while a request runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingButton {
    pub label: String,
    pub disabled: bool,
    original_label: Option<String>,
}

impl LoadingButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
            original_label: None,
        }
    }

    pub fn show_loading(&mut self) {
        if self.original_label.is_none() {
            self.original_label = Some(std::mem::replace(
                &mut self.label,
                LOADING_LABEL.to_string(),
            ));
        }
        self.disabled = true;
    }

    pub fn hide_loading(&mut self) {
        if let Some(original) = self.original_label.take() {
            self.label = original;
        }
        self.disabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FormField;

    struct Answer(bool);

    impl Confirmer for Answer {
        fn confirm(&self, question: &str) -> bool {
            assert_eq!(question, CONFIRM_DESTRUCTIVE_MESSAGE);
            self.0
        }
    }

    #[test]
    fn test_on_input_clears_marker() {
        let mut form = Form::new(vec![FormField::required("name", "")]);
        form.fields[0].invalid = true;

        assert!(on_input(&mut form, "name", "a"));
        assert!(!form.fields[0].invalid);
        assert_eq!(form.fields[0].value, "a");
        assert!(!on_input(&mut form, "missing", "a"));
    }

    #[test]
    fn test_confirm_destructive() {
        assert!(confirm_destructive(&Answer(true)));
        assert!(!confirm_destructive(&Answer(false)));
    }

    #[test]
    fn test_loading_button_restores_label() {
        let mut button = LoadingButton::new("Save");
        button.show_loading();
        button.show_loading();
        assert_eq!(button.label, LOADING_LABEL);
        assert!(button.disabled);

        button.hide_loading();
        assert_eq!(button.label, "Save");
        assert!(!button.disabled);
    }
}
