//! Application errors

mod app_error;

pub use app_error::{AppError, AppResult, ErrorResponse, INTERNAL_ERROR_MESSAGE};
