use tracing::warn;

use crate::store::{BlogStore, StoreResult};
use crate::structs::profile_form::ProfileForm;

use super::forms::{check_max_length, FormErrors};
use super::register::{check_email_address, check_username, USERNAME_MAX_LENGTH};

/// Validates the profile of `user_id`. The username may stay the same but
/// not collide with another user's.
pub async fn check_profile_form(
    store: &dyn BlogStore,
    user_id: i64,
    form: &ProfileForm,
) -> StoreResult<Result<(), FormErrors>> {
    let mut errors = FormErrors::default();

    match check_username(&form.username) {
        Ok(()) => {
            if let Some(other) = store.find_user_by_username(&form.username).await? {
                if other.id != user_id {
                    warn!("User {user_id} tried to take the username `{}`", form.username);
                    errors.add("username", "A user with that username already exists.");
                }
            }
        }
        Err(e) => errors.add("username", e),
    }

    check_max_length(&mut errors, "first_name", &form.first_name, Some(USERNAME_MAX_LENGTH));
    check_max_length(&mut errors, "last_name", &form.last_name, Some(USERNAME_MAX_LENGTH));

    if let Err(e) = check_email_address(&form.email) {
        errors.add("email", e);
    }

    Ok(errors.into_result(()))
}
