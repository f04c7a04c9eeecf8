use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Salted hash, see `utils::register::hash_password`
    #[serde(skip)]
    pub password: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date_joined: OffsetDateTime,
}

pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}
