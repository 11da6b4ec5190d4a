use std::fmt;

/// A required element is missing from the host page. The page is
/// misconfigured; the behavior cannot start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupError {
    pub element: &'static str,
    pub selector: String,
}

impl SetupError {
    pub fn missing(element: &'static str, selector: impl Into<String>) -> Self {
        Self {
            element,
            selector: selector.into(),
        }
    }
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "required {} element not found (selector `{}`)",
            self.element, self.selector
        )
    }
}

impl std::error::Error for SetupError {}

#[cfg(not(target_arch = "wasm32"))]
pub use server_error::AppError;

#[cfg(not(target_arch = "wasm32"))]
mod server_error {
    use axum::http::StatusCode;

    #[derive(Debug)]
    pub struct AppError {
        pub status: StatusCode,
        pub message: String,
    }

    impl AppError {
        pub fn bad_request(message: impl Into<String>) -> Self {
            Self {
                status: StatusCode::BAD_REQUEST,
                message: message.into(),
            }
        }

        pub fn not_found(message: impl Into<String>) -> Self {
            Self {
                status: StatusCode::NOT_FOUND,
                message: message.into(),
            }
        }

        pub fn internal(err: impl std::error::Error) -> Self {
            Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: err.to_string(),
            }
        }
    }

    impl From<std::io::Error> for AppError {
        fn from(err: std::io::Error) -> Self {
            if err.kind() == std::io::ErrorKind::NotFound {
                Self::not_found("not found")
            } else {
                Self::internal(err)
            }
        }
    }

    impl axum::response::IntoResponse for AppError {
        fn into_response(self) -> axum::response::Response {
            (self.status, self.message).into_response()
        }
    }
}
