use time::{format_description::FormatItem, macros::format_description, OffsetDateTime, PrimitiveDateTime};
use tracing::warn;

use crate::models::post::NewPost;
use crate::store::{BlogStore, StoreResult};
use crate::structs::post_form::PostForm;

use super::forms::{check_text, FormErrors, REQUIRED};
use super::media::image_extension;

pub const TITLE_MAX_LENGTH: usize = 256;

const DATETIME_LOCAL: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");

const INPUT_FORMATS: &[&[FormatItem<'static>]] = &[
    DATETIME_LOCAL,
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
];

/// Value for a `datetime-local` input, in UTC
pub fn format_pub_date(date: OffsetDateTime) -> String {
    date.format(DATETIME_LOCAL).unwrap_or_default()
}

/// Dates are typed in UTC
pub fn parse_pub_date(value: &str) -> Option<OffsetDateTime> {
    INPUT_FORMATS
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(value, *format).ok())
        .map(PrimitiveDateTime::assume_utc)
}

/// Optional reference given as an id. `Err` when it is not a number.
fn parse_reference(value: &str) -> Result<Option<i64>, ()> {
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|_| ())
}

const INVALID_CHOICE: &str = "Select a valid choice. That choice is not one of the available choices.";

/// Validates a post form. The returned post carries no image: uploads are
/// saved once everything else is valid.
pub async fn check_post_form(
    store: &dyn BlogStore,
    form: &PostForm,
) -> StoreResult<Result<NewPost, FormErrors>> {
    let mut errors = FormErrors::default();

    check_text(&mut errors, "title", &form.title, Some(TITLE_MAX_LENGTH));
    check_text(&mut errors, "text", &form.text, None);

    let pub_date = if form.pub_date.is_empty() {
        errors.add("pub_date", REQUIRED);
        None
    } else {
        let pub_date = parse_pub_date(&form.pub_date);
        if pub_date.is_none() {
            warn!("Invalid publication date `{}`", form.pub_date);
            errors.add("pub_date", "Enter a valid date/time.");
        }
        pub_date
    };

    let location_id = match parse_reference(&form.location) {
        Ok(Some(id)) => {
            if store.find_location(id).await?.is_none() {
                errors.add("location", INVALID_CHOICE);
                None
            } else {
                Some(id)
            }
        }
        Ok(None) => None,
        Err(()) => {
            errors.add("location", INVALID_CHOICE);
            None
        }
    };

    let category_id = match parse_reference(&form.category) {
        Ok(Some(id)) => {
            if store.find_category(id).await?.is_none() {
                errors.add("category", INVALID_CHOICE);
                None
            } else {
                Some(id)
            }
        }
        Ok(None) => None,
        Err(()) => {
            errors.add("category", INVALID_CHOICE);
            None
        }
    };

    if let Some(upload) = &form.upload {
        if image_extension(&upload.file_name).is_none() {
            warn!("Rejected upload `{}`", upload.file_name);
            errors.add(
                "image",
                "Upload a valid image. The file you uploaded was either not an image or a corrupted image.",
            );
        }
    }

    let Some(pub_date) = pub_date else {
        return Ok(Err(errors));
    };

    Ok(errors.into_result(NewPost {
        title: form.title.clone(),
        text: form.text.clone(),
        pub_date,
        is_published: form.is_published,
        location_id,
        category_id,
        image: None,
    }))
}
