use serde::Serialize;

use crate::utils::forms::RawForm;

#[derive(Serialize, Default)]
pub struct LoginForm {
    pub username: String,
    #[serde(skip)]
    pub password: String,
    /// Where to go once logged in
    pub next: Option<String>,
}

impl LoginForm {
    pub fn from_raw(raw: &RawForm) -> Self {
        let next = raw.value("next");
        Self {
            username: raw.value("username"),
            password: raw.fields.get("password").cloned().unwrap_or_default(),
            next: (!next.is_empty()).then_some(next),
        }
    }
}
