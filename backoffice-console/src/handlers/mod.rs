pub mod api;
pub mod app;
pub mod financials;
pub mod metrics;
pub mod tabs;
pub mod transactions;

use axum::{
    http::{HeaderName, HeaderValue},
    response::{Html, IntoResponse, Response},
};

use crate::error::ConsoleError;
use crate::render::{notice, NoticeLevel};

const HX_RETARGET: HeaderName = HeaderName::from_static("hx-retarget");
const HX_RESWAP: HeaderName = HeaderName::from_static("hx-reswap");

/// Error notice swapped into the notification area, leaving whatever the
/// failed action would have replaced untouched.
pub(crate) fn failure(headline: &str, err: ConsoleError) -> Response {
    (
        err.status_code(),
        [
            (HX_RETARGET, HeaderValue::from_static("#notifications")),
            (HX_RESWAP, HeaderValue::from_static("innerHTML")),
        ],
        Html(notice(NoticeLevel::Error, headline, &err.user_message())),
    )
        .into_response()
}
