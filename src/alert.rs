//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered as HTML fragments that HTMX swaps into the
//! `#alert-container` element defined in the base page template.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

const ALERT_SUCCESS_STYLE: &str = "flex items-start gap-3 w-full p-4 mb-4 rounded-lg border \
    text-green-800 border-green-300 bg-green-50 dark:bg-gray-800 dark:text-green-400 \
    dark:border-green-800";

const ALERT_ERROR_STYLE: &str = "flex items-start gap-3 w-full p-4 mb-4 rounded-lg border \
    text-red-800 border-red-300 bg-red-50 dark:bg-gray-800 dark:text-red-400 \
    dark:border-red-800";

/// A message to display to the user in the alert container.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// An operation succeeded, headline only.
    Success {
        /// The headline of the alert.
        message: String,
    },
    /// An operation failed.
    Error {
        /// The headline of the alert.
        message: String,
        /// Extra detail shown below the headline.
        details: String,
    },
}

impl Alert {
    /// Render the alert as an HTML fragment for the alert container.
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::Success { message } => (ALERT_SUCCESS_STYLE, message, None),
            Alert::Error { message, details } => (ALERT_ERROR_STYLE, message, Some(details)),
        };

        html!(
            div role="alert" class=(style)
            {
                div class="flex-1 text-sm"
                {
                    p class="font-medium" { (message) }

                    @if let Some(details) = details {
                        @if !details.is_empty() {
                            p { (details) }
                        }
                    }
                }

                button
                    type="button"
                    class="ms-auto -mx-1.5 -my-1.5 rounded-lg p-1.5 inline-flex h-8 w-8 \
                        hover:bg-gray-200 dark:hover:bg-gray-700"
                    onclick="this.closest('[role=alert]').remove();"
                    aria-label="Close"
                {
                    "✕"
                }
            }

            // The container starts hidden, unhide it once an alert lands in it.
            script { "document.getElementById('alert-container').classList.remove('hidden');" }
        )
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        (StatusCode::OK, self.into_html()).into_response()
    }
}
