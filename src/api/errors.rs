use serde::{Deserialize, Serialize};

use crate::engine::MatchError;
use crate::infra::PersistenceError;

/// Ошибки внешнего API (то, что отдаём экрану / клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (отрицательная дельта, номер 0, битый JSON).
    BadRequest(String),

    /// Команда не может быть выполнена в текущем состоянии.
    InvalidCommand(String),

    /// Снапшот не сохранился / не загрузился. Игра при этом продолжается.
    Persistence(String),
}

impl From<MatchError> for ApiError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::InvalidArgument(msg) => ApiError::BadRequest(msg),
            MatchError::InvalidTransition(reason) => ApiError::InvalidCommand(reason.to_string()),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        ApiError::Persistence(err.to_string())
    }
}
