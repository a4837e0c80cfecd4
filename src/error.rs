use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Failure to fetch a current price. Never surfaced by the alert monitor.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("price source returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected page layout: {0}")]
    Layout(String),

    #[error("unparsable price {0:?}")]
    BadPrice(String),

    #[error("price source is not configured: {0}")]
    NotConfigured(&'static str),

    #[error("lookup timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Failure to reach a user with a notification.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("discord returned {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("no listeners for notification")]
    NoListeners,
}

/// Errors a bot command can answer with. `Display` is the chat reply.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("❌ Stock **{0}** doesn't exist or there may be a typo.")]
    SymbolNotFound(String),

    #[error("❌ Invalid price! Please enter a valid number.")]
    InvalidPrice(String),

    #[error("❌ Please provide a stock symbol.")]
    MissingSymbol,

    #[error("❌ Invalid user id {0:?}.")]
    InvalidUser(String),

    #[error("❌ Unknown command. Try `!setalert <stock> <price>`, `!showalerts` or `!removealert <stock>`.")]
    UnknownCommand(String),

    #[error("⚠️ Price source unavailable right now, please try again shortly.")]
    Lookup(#[from] LookupError),

    #[error("⚠️ Could not render reply.")]
    Render(#[from] handlebars::RenderError),
}

impl CommandError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::SymbolNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidPrice(_)
            | Self::MissingSymbol
            | Self::InvalidUser(_)
            | Self::UnknownCommand(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Lookup(_) => StatusCode::BAD_GATEWAY,
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::SymbolNotFound(_) => "symbol_not_found",
            Self::InvalidPrice(_) => "invalid_price",
            Self::MissingSymbol => "missing_symbol",
            Self::InvalidUser(_) => "invalid_user",
            Self::UnknownCommand(_) => "unknown_command",
            Self::Lookup(_) => "lookup_failed",
            Self::Render(_) => "render_failed",
        }
    }
}

impl IntoResponse for CommandError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.code(), "reply": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
