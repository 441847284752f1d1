use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("duplicate key value violates unique constraint of {table:?}")]
    DuplicationError { table: String },
    #[error("malformed cached message {id}: {source}")]
    MalformedMessage {
        id: i64,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Query(#[from] diesel::result::Error),
}

/// Rejections of user supplied aliases and tag names.
///
/// The messages are shown to the user as-is.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Aliases cannot be empty.")]
    EmptyAlias,
    #[error("Aliases cannot be only numbers.")]
    NumericAlias,
    #[error(
        "Aliases must be at most 32 characters and can only contain alphanumeric characters, underscore, and parentheses."
    )]
    InvalidAlias,
    #[error("You already used this alias on another bookmark.")]
    DuplicatedAlias,
    #[error("Tags cannot be empty.")]
    EmptyTag,
    #[error(
        "Tags must be at most 32 characters and can only contain alphanumeric characters, underscore, and parentheses."
    )]
    InvalidTag,
}

#[derive(Error, Debug)]
pub enum CommonError {
    #[error("No results were found.")]
    EmptyResult,

    #[error("The bookmark requested does not exist.")]
    NotFound,

    #[error("The message to bookmark could not be read.")]
    MissingTarget,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<diesel::result::Error> for CommonError {
    fn from(e: diesel::result::Error) -> Self {
        CommonError::Database(e.into())
    }
}

impl CommonError {
    /// Whether the error is an expected outcome that should be told to the user
    /// instead of failing the interaction.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, CommonError::Database(_))
    }
}
