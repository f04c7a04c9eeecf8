pub mod auth_extractor;
pub mod form_data;
pub mod path_extractor;
