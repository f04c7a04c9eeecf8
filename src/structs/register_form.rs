use serde::Serialize;

use crate::utils::forms::RawForm;

#[derive(Serialize, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    #[serde(skip)]
    pub password1: String,
    #[serde(skip)]
    pub password2: String,
}

impl RegisterForm {
    pub fn from_raw(raw: &RawForm) -> Self {
        Self {
            username: raw.value("username"),
            email: raw.value("email"),
            // Passwords are taken as typed
            password1: raw.fields.get("password1").cloned().unwrap_or_default(),
            password2: raw.fields.get("password2").cloned().unwrap_or_default(),
        }
    }
}
