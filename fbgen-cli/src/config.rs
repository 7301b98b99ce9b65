use std::path::{Path, PathBuf};

use fbgen_core::mjd_from_iso;
use fbgen_types::{FilterbankHeader, SpectralDescriptor};
use serde::Deserialize;

use crate::{GenError, GenResult};

/// Расширение выходного файла
pub const FILTERBANK_SUFFIX: &str = "fil";

/// Разрядность по умолчанию
pub const DEFAULT_NBITS: u32 = 32;

/// Каналов в чанке по умолчанию
pub const DEFAULT_MAX_CHANS_PER_CHUNK: usize = 65_536;

/// Параметры генерации, прочитанные из файла конфигурации.
///
/// Имена ключей совпадают с именами полей заголовка SIGPROC там, где
/// такие поля есть.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Количество каналов
    pub nchans: usize,
    /// Количество временных отсчётов
    pub nsamples: u64,
    /// Частота первого канала (МГц)
    pub fch1: f64,
    /// Шаг между каналами (МГц)
    pub foff: f64,
    /// Интервал между отсчётами (секунды)
    pub tsamp: f64,
    /// Время начала в ISO-8601 (UTC)
    pub tstart_iso: String,
    /// Нижняя граница сигнала
    pub signal_low: f64,
    /// Верхняя граница сигнала
    pub signal_high: f64,
    /// Максимальная относительная амплитуда шума
    pub max_noise: f64,
    /// Разрядность: 8, 16 или 32
    #[serde(default = "default_nbits")]
    pub nbits: u32,
    /// Максимум каналов в одной операции записи
    #[serde(default = "default_max_chans_per_chunk")]
    pub max_chans_per_chunk: usize,
    /// Имя источника в заголовке
    #[serde(default = "default_source_name")]
    pub source_name: String,
    /// Зерно генератора шума (None: случайное)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_nbits() -> u32 {
    DEFAULT_NBITS
}

fn default_max_chans_per_chunk() -> usize {
    DEFAULT_MAX_CHANS_PER_CHUNK
}

fn default_source_name() -> String {
    fbgen_types::DEFAULT_SOURCE_NAME.to_string()
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl GeneratorConfig {
    /// Читает конфигурацию из TOML файла.
    pub fn from_file(path: &Path) -> GenResult<Self> {
        if !path.is_file() {
            return Err(GenError::ConfigFile {
                path: path.to_path_buf(),
                reason: "cannot access file".to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| GenError::ConfigFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_toml_str(&content).map_err(|e| GenError::ConfigFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Разбирает TOML. Ключи могут лежать в корне или в единственной
    /// секции (например, `[fbgen]`).
    pub fn from_toml_str(s: &str) -> GenResult<Self> {
        let root: toml::Table = s
            .parse()
            .map_err(|e: toml::de::Error| GenError::config(e.message().to_string()))?;

        let table = select_section(root)?;

        Self::deserialize(toml::Value::Table(table))
            .map_err(|e: toml::de::Error| GenError::config(e.message().to_string()))
    }

    /// Неизменяемый дескриптор для ядра.
    pub fn to_descriptor(&self) -> SpectralDescriptor {
        SpectralDescriptor {
            channel_count: self.nchans,
            first_channel_freq_mhz: self.fch1,
            channel_spacing_mhz: self.foff,
            sample_count: self.nsamples,
            sample_interval_s: self.tsamp,
            bits_per_sample: self.nbits,
            signal_low: self.signal_low,
            signal_high: self.signal_high,
            max_noise_fraction: self.max_noise,
            max_channels_per_chunk: self.max_chans_per_chunk,
        }
    }

    /// Заголовок SIGPROC, описывающий `descriptor`.
    pub fn header(
        &self,
        descriptor: &SpectralDescriptor,
    ) -> GenResult<FilterbankHeader> {
        let tstart = mjd_from_iso(&self.tstart_iso).map_err(GenError::Validation)?;

        let mut header =
            FilterbankHeader::for_descriptor(descriptor, tstart).map_err(GenError::Validation)?;
        header.source_name = self.source_name.clone();

        Ok(header)
    }
}

fn select_section(mut root: toml::Table) -> GenResult<toml::Table> {
    let sections: Vec<String> = root
        .iter()
        .filter(|(_, v)| v.is_table())
        .map(|(k, _)| k.clone())
        .collect();

    match sections.len() {
        0 => Ok(root),
        1 if root.len() == 1 => match root.remove(&sections[0]) {
            Some(toml::Value::Table(t)) => Ok(t),
            _ => Err(GenError::config("section vanished while reading")),
        },
        _ => Err(GenError::config(format!(
            "expected keys at top level or in a single section, found sections {sections:?}"
        ))),
    }
}

/// Проверяет, что выходной файл имеет расширение `.fil`.
pub fn check_output_path(path: &Path) -> GenResult<PathBuf> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext == FILTERBANK_SUFFIX => Ok(path.to_path_buf()),
        _ => Err(GenError::OutputPath {
            path: path.to_path_buf(),
            reason: format!("extension must be .{FILTERBANK_SUFFIX}"),
        }),
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
