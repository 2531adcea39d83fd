use thiserror::Error;

use crate::model::{ParseIdError, QuizAnswerError, RoleParseError};
use crate::upload::UploadError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    QuizAnswer(#[from] QuizAnswerError),
    #[error(transparent)]
    Role(#[from] RoleParseError),
    #[error(transparent)]
    Id(#[from] ParseIdError),
}
