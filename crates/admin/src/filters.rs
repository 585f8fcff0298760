//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// CSS modifier for a user status badge.
///
/// Usage in templates: `{{ user.status|status_class }}`
#[askama::filter_fn]
pub fn status_class(value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(match value.to_string().as_str() {
        "Active" => "badge-success",
        "Inactive" => "badge-muted",
        _ => "badge-neutral",
    })
}
