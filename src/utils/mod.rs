pub mod app_error;
pub mod comment;
pub mod forms;
pub mod media;
pub mod pagination;
pub mod post;
pub mod profile;
pub mod register;
pub mod render;
pub mod service;
pub mod token;
pub mod urls;
