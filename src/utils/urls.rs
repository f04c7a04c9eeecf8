pub const INDEX_URL: &str = "/";
pub const LOGIN_URL: &str = "/auth/login/";

pub fn post_detail_url(post_id: i64) -> String {
    format!("/posts/{post_id}/")
}

pub fn profile_url(username: &str) -> String {
    format!("/profile/{}/", urlencoding::encode(username))
}

pub fn login_url(next: &str) -> String {
    format!("{LOGIN_URL}?next={}", urlencoding::encode(next))
}

/// Only local absolute paths are followed after login
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(next) if next.starts_with('/') && !next.starts_with("//") && !next.contains('\\') => next,
        _ => INDEX_URL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_url_keeps_next_path() {
        assert_eq!(login_url("/posts/create/"), "/auth/login/?next=%2Fposts%2Fcreate%2F");
    }

    #[test]
    fn profile_url_encodes_username() {
        assert_eq!(profile_url("jane doe"), "/profile/jane%20doe/");
        assert_eq!(profile_url("jane"), "/profile/jane/");
    }

    #[test]
    fn safe_next_rejects_foreign_targets() {
        assert_eq!(safe_next(Some("/profile/jane/")), "/profile/jane/");
        assert_eq!(safe_next(Some("https://evil.example")), INDEX_URL);
        assert_eq!(safe_next(Some("//evil.example")), INDEX_URL);
        assert_eq!(safe_next(None), INDEX_URL);
    }
}
