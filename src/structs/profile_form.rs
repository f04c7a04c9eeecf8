use serde::Serialize;

use crate::models::user::User;
use crate::utils::forms::RawForm;

#[derive(Serialize, Default)]
pub struct ProfileForm {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl ProfileForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }

    pub fn from_raw(raw: &RawForm) -> Self {
        Self {
            username: raw.value("username"),
            first_name: raw.value("first_name"),
            last_name: raw.value("last_name"),
            email: raw.value("email"),
        }
    }
}
