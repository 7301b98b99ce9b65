use crate::{FbgenError, FbgenResult, SampleWidth};

/// Неизменяемое описание генерируемого спектрального потока.
///
/// Создаётся один раз из проверенной конфигурации и только читается
/// компонентами ядра. Производные величины (ось частот, разбиение на
/// чанки) хранятся отдельно.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralDescriptor {
    /// Количество частотных каналов
    pub channel_count: usize,
    /// Частота первого канала (МГц)
    pub first_channel_freq_mhz: f64,
    /// Шаг между каналами (МГц), может быть отрицательным
    pub channel_spacing_mhz: f64,
    /// Количество временных отсчётов
    pub sample_count: u64,
    /// Интервал между отсчётами (секунды)
    pub sample_interval_s: f64,
    /// Разрядность выборки: 8, 16 или 32
    pub bits_per_sample: u32,
    /// Нижняя граница сигнала
    pub signal_low: f64,
    /// Верхняя граница сигнала
    pub signal_high: f64,
    /// Максимальная относительная амплитуда шума
    pub max_noise_fraction: f64,
    /// Ограничение памяти: максимум каналов в одной операции записи
    pub max_channels_per_chunk: usize,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl SpectralDescriptor {
    /// Проверяет все поля. Вызывается до записи первого байта.
    pub fn validate(&self) -> FbgenResult<()> {
        if self.channel_count == 0 {
            return Err(FbgenError::configuration("channel_count must be > 0"));
        }

        if self.sample_count == 0 {
            return Err(FbgenError::configuration("sample_count must be > 0"));
        }

        // Поля заголовка nchans и nsamples имеют тип i32
        let header_max = i32::MAX as u64;
        if self.channel_count as u64 > header_max {
            return Err(FbgenError::configuration(format!(
                "channel_count must be <= {header_max}, got {}",
                self.channel_count
            )));
        }

        if self.sample_count > header_max {
            return Err(FbgenError::configuration(format!(
                "sample_count must be <= {header_max}, got {}",
                self.sample_count
            )));
        }

        if self.max_channels_per_chunk == 0 {
            return Err(FbgenError::configuration(
                "max_channels_per_chunk must be > 0",
            ));
        }

        if SampleWidth::from_bits(self.bits_per_sample).is_err() {
            return Err(FbgenError::configuration(format!(
                "bits_per_sample must be 8, 16 or 32, got {}",
                self.bits_per_sample
            )));
        }

        let floats = [
            ("first_channel_freq_mhz", self.first_channel_freq_mhz),
            ("channel_spacing_mhz", self.channel_spacing_mhz),
            ("sample_interval_s", self.sample_interval_s),
            ("signal_low", self.signal_low),
            ("signal_high", self.signal_high),
            ("max_noise_fraction", self.max_noise_fraction),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(FbgenError::configuration(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }

        if self.sample_interval_s <= 0.0 {
            return Err(FbgenError::configuration(format!(
                "sample_interval_s must be > 0, got {}",
                self.sample_interval_s
            )));
        }

        if self.signal_low > self.signal_high {
            return Err(FbgenError::configuration(format!(
                "signal_low ({}) must not exceed signal_high ({})",
                self.signal_low, self.signal_high
            )));
        }

        if self.max_noise_fraction < 0.0 {
            return Err(FbgenError::configuration(format!(
                "max_noise_fraction must be >= 0, got {}",
                self.max_noise_fraction
            )));
        }

        self.data_section_len()?;

        Ok(())
    }

    /// Разрядность выборки в типизированном виде.
    pub fn sample_width(&self) -> FbgenResult<SampleWidth> {
        SampleWidth::from_bits(self.bits_per_sample)
    }

    /// Границы полосы `(f_begin, f_end)` в МГц.
    ///
    /// При отрицательном шаге `f_begin` лежит ниже `fch1`.
    pub fn band_edges_mhz(&self) -> (f64, f64) {
        let span = self.channel_count as f64 * self.channel_spacing_mhz;

        if self.channel_spacing_mhz < 0.0 {
            (self.first_channel_freq_mhz + span, self.first_channel_freq_mhz)
        } else {
            (self.first_channel_freq_mhz, self.first_channel_freq_mhz + span)
        }
    }

    /// Ожидаемый размер секции данных в байтах.
    pub fn data_section_len(&self) -> FbgenResult<u64> {
        let width = self.sample_width()?;

        self.sample_count
            .checked_mul(self.channel_count as u64)
            .and_then(|n| n.checked_mul(width.byte_size() as u64))
            .ok_or_else(|| {
                FbgenError::configuration(format!(
                    "data section of {} x {} x {} bytes overflows u64",
                    self.sample_count,
                    self.channel_count,
                    width.byte_size()
                ))
            })
    }

    /// Момент времени отсчёта `tick` в секундах.
    pub fn elapsed_at(
        &self,
        tick: u64,
    ) -> f64 {
        tick as f64 * self.sample_interval_s
    }
}

impl Default for SpectralDescriptor {
    fn default() -> Self {
        Self {
            channel_count: 1024,
            first_channel_freq_mhz: 1420.0,
            channel_spacing_mhz: -0.001,
            sample_count: 16,
            sample_interval_s: 1.0,
            bits_per_sample: 32,
            signal_low: 0.0,
            signal_high: 10.0,
            max_noise_fraction: 0.1,
            max_channels_per_chunk: 65_536,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
