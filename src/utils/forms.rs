use std::collections::{BTreeMap, HashMap};

use axum::body::Bytes;
use serde::Serialize;

pub const REQUIRED: &str = "This field is required.";

/// Field name to error messages, `__all__` for errors not tied to a field.
#[derive(Debug, Default, Serialize)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    pub const NON_FIELD: &'static str = "__all__";

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(value)` when nothing was reported
    pub fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// A form with its current values and the errors to show next to them.
#[derive(Serialize)]
pub struct FormContext<F> {
    pub form: F,
    pub errors: FormErrors,
}

impl<F> FormContext<F> {
    pub fn blank(form: F) -> Self {
        Self {
            form,
            errors: FormErrors::default(),
        }
    }
}

pub struct UploadedFile {
    pub file_name: String,
    pub content: Bytes,
}

/// Submitted fields and files, as sent by the browser.
#[derive(Default)]
pub struct RawForm {
    pub fields: HashMap<String, String>,
    pub files: HashMap<String, UploadedFile>,
}

impl RawForm {
    /// Trimmed value of a text field, empty when absent
    pub fn value(&self, name: &str) -> String {
        self.fields
            .get(name)
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }

    /// A checkbox is only sent when ticked
    pub fn checkbox(&self, name: &str) -> bool {
        match self.fields.get(name) {
            Some(value) => !matches!(value.to_lowercase().as_str(), "" | "false" | "0" | "off"),
            None => false,
        }
    }

    /// Non-empty uploaded file, browsers send an empty part for an untouched input
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files
            .remove(name)
            .filter(|file| !file.file_name.is_empty() && !file.content.is_empty())
    }
}

/// Checks a required text field against a maximum length in characters.
pub fn check_text(errors: &mut FormErrors, field: &'static str, value: &str, max_length: Option<usize>) {
    if value.is_empty() {
        errors.add(field, REQUIRED);
        return;
    }
    check_max_length(errors, field, value, max_length);
}

pub fn check_max_length(errors: &mut FormErrors, field: &'static str, value: &str, max_length: Option<usize>) {
    if let Some(max_length) = max_length {
        let length = value.chars().count();
        if length > max_length {
            errors.add(
                field,
                format!("Ensure this value has at most {max_length} characters (it has {length})."),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> RawForm {
        RawForm {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            files: HashMap::new(),
        }
    }

    #[test]
    fn values_are_trimmed() {
        let form = form(&[("title", "  Hello  ")]);
        assert_eq!(form.value("title"), "Hello");
        assert_eq!(form.value("missing"), "");
    }

    #[test]
    fn checkbox_follows_browser_semantics() {
        let form = form(&[("a", "on"), ("b", "false"), ("c", "")]);
        assert!(form.checkbox("a"));
        assert!(!form.checkbox("b"));
        assert!(!form.checkbox("c"));
        assert!(!form.checkbox("d"));
    }

    #[test]
    fn empty_upload_is_ignored() {
        let mut form = RawForm::default();
        form.files.insert(
            "image".to_string(),
            UploadedFile {
                file_name: String::new(),
                content: Bytes::new(),
            },
        );
        assert!(form.take_file("image").is_none());
    }

    #[test]
    fn length_is_counted_in_characters() {
        let mut errors = FormErrors::default();
        check_text(&mut errors, "title", "ééé", Some(3));
        assert!(errors.is_empty());

        check_text(&mut errors, "title", "éééé", Some(3));
        assert_eq!(
            errors.0["title"],
            ["Ensure this value has at most 3 characters (it has 4)."]
        );

        check_text(&mut errors, "text", "", None);
        assert_eq!(errors.0["text"], [REQUIRED]);
    }
}
