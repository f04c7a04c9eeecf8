use crate::structs::comment_form::CommentForm;

use super::forms::{check_text, FormErrors};

/// The comment text, once checked
pub fn check_comment_form(form: &CommentForm) -> Result<&str, FormErrors> {
    let mut errors = FormErrors::default();
    check_text(&mut errors, "text", &form.text, None);
    errors.into_result(form.text.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_comment_is_rejected() {
        let form = CommentForm { text: String::new() };
        assert!(check_comment_form(&form).is_err());

        let form = CommentForm {
            text: "Nice trip".to_string(),
        };
        assert_eq!(check_comment_form(&form).ok(), Some("Nice trip"));
    }
}
