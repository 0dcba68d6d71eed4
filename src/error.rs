use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use sea_orm::DbErr;
use thiserror::Error;

/// Everything a request can fail with. Database details are logged but never
/// sent to the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid username or password!")]
    InvalidCredentials,

    #[error("Missing `sessionId` cookie!")]
    Unauthenticated,

    #[error("Session does not exist!")]
    SessionNotFound,

    #[error("Session expired!")]
    SessionExpired,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("The platform {0} does not exist!")]
    UnknownPlatform(String),

    #[error("The username {0} is already taken!")]
    UsernameTaken(String),

    #[error("The email {0} is already registered!")]
    EmailTaken(String),

    #[error("You already own the platform {0}!")]
    AlreadyOwned(String),

    #[error("You have to add the platform {0} before tracking games on it!")]
    PlatformNotOwned(String),

    #[error("This game is already on that list for this platform!")]
    DuplicateEntry,

    #[error("Game catalog is unavailable: {0}")]
    Upstream(String),

    #[error("Password hashing failed!")]
    Hashing,

    #[error("Database operation failed!")]
    Db(#[from] DbErr),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials
            | AppError::Unauthenticated
            | AppError::SessionNotFound => StatusCode::UNAUTHORIZED,
            AppError::SessionExpired => StatusCode::GONE,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) | AppError::UnknownPlatform(_) => StatusCode::NOT_FOUND,
            AppError::UsernameTaken(_)
            | AppError::EmailTaken(_)
            | AppError::AlreadyOwned(_)
            | AppError::PlatformNotOwned(_)
            | AppError::DuplicateEntry => StatusCode::CONFLICT,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Hashing | AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Db(err) = self {
            log::error!("database error: {}", err);
        }

        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}
