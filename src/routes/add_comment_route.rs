use std::sync::Arc;

use axum::{
    extract::State,
    response::Redirect,
};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::{
    extractors::{auth_extractor::LoginRequired, form_data::FormData, path_extractor::Path},
    structs::comment_form::CommentForm,
    utils::{
        app_error::AppError, comment::check_comment_form, service::find_visible_post,
        urls::post_detail_url,
    },
    AppState,
};

/// Invalid comments are dropped, the requester lands back on the post
/// either way.
pub async fn add_comment_route(
    State(app_state): State<Arc<AppState>>,
    LoginRequired(auth_user): LoginRequired,
    Path(post_id): Path<i64>,
    FormData(form): FormData,
) -> Result<Redirect, AppError> {
    let now = OffsetDateTime::now_utc();
    let post = find_visible_post(app_state.store.as_ref(), Some(auth_user.as_ref()), post_id, now).await?;

    let form = CommentForm::from_raw(&form.unwrap_or_default());
    match check_comment_form(&form) {
        Ok(text) => {
            let comment = app_state
                .store
                .create_comment(post.id, auth_user.id, text, now)
                .await?;
            info!("User {} commented post {post_id} ({})", auth_user.id, comment.id);
        }
        Err(errors) => {
            warn!("User {} sent an invalid comment on post {post_id} : {errors:?}", auth_user.id);
        }
    }

    Ok(Redirect::to(&post_detail_url(post_id)))
}
