//! QuoteDesk Client
//!
//! HTTP implementation of the quote backend API.

pub mod http_api;

pub use http_api::HttpQuoteApi;
pub use quotedesk_types::{ApiError, ApiResult, QuoteApi};
