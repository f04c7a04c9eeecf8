pub mod add_comment_route;
pub mod category_posts_route;
pub mod create_post_route;
pub mod delete_comment_route;
pub mod delete_post_route;
pub mod edit_comment_route;
pub mod edit_post_route;
pub mod edit_profile_route;
pub mod error_pages;
pub mod index_route;
pub mod login_route;
pub mod logout_route;
pub mod post_detail_route;
pub mod profile_route;
pub mod register_route;
