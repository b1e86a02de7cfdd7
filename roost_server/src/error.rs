use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use roost_core::Error as RoostError;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug)]
pub struct ServerError(anyhow::Error);

impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);
        let status = self.status_code();
        (status, self.to_string()).into_response()
    }
}

impl ServerError {
    fn status_code(&self) -> StatusCode {
        let err = &self.0;
        for cause in err.chain() {
            if let Some(err) = cause.downcast_ref::<RoostError>() {
                match err {
                    RoostError::InvalidRequest(_) => return StatusCode::BAD_REQUEST,
                    RoostError::NoCredentials(_) => return StatusCode::FORBIDDEN,
                    RoostError::InvalidOrExpiredToken(_) => return StatusCode::FORBIDDEN,
                    RoostError::AlreadyLoading => return StatusCode::CONFLICT,
                    RoostError::QuotaExceeded => return StatusCode::CONFLICT,
                    RoostError::UsernameNotFound(_) => return StatusCode::NOT_FOUND,
                    RoostError::Upstream(_) => return StatusCode::INTERNAL_SERVER_ERROR,
                    RoostError::Store(_) => return StatusCode::INTERNAL_SERVER_ERROR,
                }
            }
        }
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn status_for(error: RoostError) -> StatusCode {
        ServerError::from(error).status_code()
    }

    #[test]
    fn error_status_codes() {
        assert_eq!(
            status_for(RoostError::InvalidRequest("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(RoostError::NoCredentials("none".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(RoostError::InvalidOrExpiredToken("expired".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(status_for(RoostError::AlreadyLoading), StatusCode::CONFLICT);
        assert_eq!(status_for(RoostError::QuotaExceeded), StatusCode::CONFLICT);
        assert_eq!(
            status_for(RoostError::UsernameNotFound("ghost".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(RoostError::Upstream("oops".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
