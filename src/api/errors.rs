use crate::utils::{CommonError, DatabaseError};

#[derive(Responder, Debug)]
pub enum Error {
    #[response(status = 404)]
    NotFound(String),
    #[response(status = 400)]
    BadRequest(String),
    #[response(status = 401)]
    MissingAPIKey(String),
    #[response(status = 403)]
    InvalidAPIKey(String),
    #[response(status = 500)]
    InternalServer(String),
}

impl From<DatabaseError> for Error {
    fn from(e: DatabaseError) -> Self {
        tracing::error!(error = ?e, "database failure");
        Error::InternalServer("Internal Server Error".to_string())
    }
}

impl From<diesel::result::Error> for Error {
    fn from(e: diesel::result::Error) -> Self {
        DatabaseError::from(e).into()
    }
}

/// Only reached by errors a command could not turn into a reply.
impl From<CommonError> for Error {
    fn from(e: CommonError) -> Self {
        match e {
            CommonError::Database(e) => e.into(),
            e => Error::BadRequest(e.to_string()),
        }
    }
}

impl<A: std::fmt::Debug, B: std::fmt::Debug> From<rocket_db_pools::Error<A, B>> for Error {
    fn from(e: rocket_db_pools::Error<A, B>) -> Self {
        tracing::error!(error = ?e, "failed to get a database connection");
        Error::InternalServer("Internal Server Error".to_string())
    }
}
