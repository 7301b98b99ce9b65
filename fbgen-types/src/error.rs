use thiserror::Error;

/// Результат для операций генератора
pub type FbgenResult<T> = std::result::Result<T, FbgenError>;

/// Типы ошибок генерации filterbank файла.
#[derive(Debug, Error)]
pub enum FbgenError {
    /// Некорректный или отсутствующий параметр дескриптора
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Диапазон каналов вне допустимых границ
    #[error("Channel range [{start}, {end}) is invalid for {channel_count} channels")]
    Range {
        start: usize,
        end: usize,
        channel_count: usize,
    },

    /// Неподдерживаемая разрядность выборки
    #[error("Unsupported sample width: {0} bits (expected 8, 16 or 32)")]
    UnsupportedWidth(u32),

    /// Некорректное поле заголовка SIGPROC
    #[error("Invalid header field: {0}")]
    HeaderField(String),

    /// Ошибки ввода/вывода (автоконвертируются из std::io::Error)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Запись прервана по флагу остановки
    #[error("Generation cancelled after {ticks_written} complete ticks")]
    Cancelled { ticks_written: u64 },
}

impl FbgenError {
    /// Удобные конструкторы
    pub fn configuration<S: Into<String>>(s: S) -> Self {
        Self::Configuration(s.into())
    }

    pub fn header_field<S: Into<String>>(s: S) -> Self {
        Self::HeaderField(s.into())
    }

    pub fn range(
        start: usize,
        end: usize,
        channel_count: usize,
    ) -> Self {
        Self::Range {
            start,
            end,
            channel_count,
        }
    }
}
