use std::path::PathBuf;

use fbgen_types::FbgenError;
use thiserror::Error;

pub type GenResult<T> = std::result::Result<T, GenError>;

/// Ошибки сессии генерации. Вариант указывает этап, на котором она возникла.
#[derive(Debug, Error)]
pub enum GenError {
    /// Файл конфигурации не найден или не читается
    #[error("Config file {path:?}: {reason}")]
    ConfigFile { path: PathBuf, reason: String },

    /// Содержимое конфигурации некорректно
    #[error("Config error: {0}")]
    Config(String),

    /// Недопустимый путь выходного файла или его не удалось создать
    #[error("Output path {path:?}: {reason}")]
    OutputPath { path: PathBuf, reason: String },

    /// Параметры не прошли проверку
    #[error("Validation failed: {0}")]
    Validation(#[source] FbgenError),

    /// Ошибка записи заголовка
    #[error("Header write failed: {0}")]
    HeaderWrite(#[source] FbgenError),

    /// Ошибка записи секции данных
    #[error("Data write failed: {0}")]
    DataWrite(#[source] FbgenError),
}

impl GenError {
    pub fn config<S: Into<String>>(s: S) -> Self {
        Self::Config(s.into())
    }

    /// Прервана ли запись пользователем.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GenError::DataWrite(FbgenError::Cancelled { .. }))
    }
}
