pub mod comment_form;
pub mod login_form;
pub mod post_form;
pub mod profile_form;
pub mod register_form;
