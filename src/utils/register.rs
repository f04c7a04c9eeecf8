use email_address::EmailAddress;
use rand::RngCore;
use sha2::{Digest, Sha512};
use tracing::warn;

use crate::models::user::NewUser;
use crate::store::{BlogStore, StoreResult};
use crate::structs::register_form::RegisterForm;

use super::forms::{FormErrors, REQUIRED};

pub const USERNAME_MAX_LENGTH: usize = 150;
pub const EMAIL_MAX_LENGTH: usize = 254;
pub const PASSWORD_MIN_LENGTH: usize = 8;

pub fn check_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err(REQUIRED.to_string());
    }

    let length = username.chars().count();
    if length > USERNAME_MAX_LENGTH {
        warn!("Username too long : {length}/{USERNAME_MAX_LENGTH}");
        return Err(format!(
            "Ensure this value has at most {USERNAME_MAX_LENGTH} characters (it has {length})."
        ));
    }

    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        warn!("Invalid characters in username `{username}`");
        return Err(
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
                .to_string(),
        );
    }

    Ok(())
}

/// The email is optional, an empty value passes
pub fn check_email_address(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Ok(());
    }
    if email.chars().count() > EMAIL_MAX_LENGTH || !EmailAddress::is_valid(email) {
        warn!("Invalid email `{email}`");
        return Err("Enter a valid email address.".to_string());
    }
    Ok(())
}

pub fn check_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err(REQUIRED.to_string());
    }
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(format!(
            "This password is too short. It must contain at least {PASSWORD_MIN_LENGTH} characters."
        ));
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err("This password is entirely numeric.".to_string());
    }
    Ok(())
}

/// Validates a registration, including username uniqueness.
pub async fn check_register_form(
    store: &dyn BlogStore,
    form: &RegisterForm,
) -> StoreResult<Result<NewUser, FormErrors>> {
    let mut errors = FormErrors::default();

    match check_username(&form.username) {
        Ok(()) => {
            if store.find_user_by_username(&form.username).await?.is_some() {
                warn!("Username `{}` already used", form.username);
                errors.add("username", "A user with that username already exists.");
            }
        }
        Err(e) => errors.add("username", e),
    }

    if let Err(e) = check_email_address(&form.email) {
        errors.add("email", e);
    }

    if form.password2.is_empty() {
        errors.add("password2", REQUIRED);
    }
    if let Err(e) = check_password(&form.password1) {
        errors.add("password1", e);
    } else if !form.password2.is_empty() && form.password1 != form.password2 {
        errors.add("password2", "The two password fields didn’t match.");
    }

    Ok(errors.into_result(NewUser {
        username: form.username.clone(),
        email: form.email.clone(),
        password: hash_password(&form.password1),
    }))
}

fn hash_with_salt(salt: &str, password: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(salt);
    hasher.update(password);
    format!("{:x}", hasher.finalize())
}

/// `<salt>$<sha512 hex>`
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);
    let salt: String = salt.iter().map(|b| format!("{b:02x}")).collect();
    let hash = hash_with_salt(&salt, password);
    format!("{salt}${hash}")
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, hash)) => super::token::tokens_match(hash, &hash_with_salt(salt, password)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules() {
        assert!(check_username("jane.doe+blog@home").is_ok());
        assert!(check_username("").is_err());
        assert!(check_username("jane doe").is_err());
        assert!(check_username(&"a".repeat(USERNAME_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn email_is_optional_but_checked() {
        assert!(check_email_address("").is_ok());
        assert!(check_email_address("jane@example.com").is_ok());
        assert!(check_email_address("jane@").is_err());
    }

    #[test]
    fn password_rules() {
        assert!(check_password("correct horse").is_ok());
        assert!(check_password("short").is_err());
        assert!(check_password("12345678901").is_err());
    }

    #[test]
    fn hashed_password_verifies() {
        let stored = hash_password("correct horse");
        assert!(verify_password("correct horse", &stored));
        assert!(!verify_password("wrong horse", &stored));
        assert_ne!(stored, hash_password("correct horse"));
        assert!(!verify_password("correct horse", "not-a-hash"));
    }
}
