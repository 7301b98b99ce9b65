use crate::{FbgenError, FbgenResult, SkyAngle, SpectralDescriptor};

/// Имя источника по умолчанию
pub const DEFAULT_SOURCE_NAME: &str = "fbgen";

/// Прямое восхождение (J2000) фиктивного источника
pub const DEFAULT_SRC_RAJ: SkyAngle = SkyAngle {
    negative: false,
    units: 17,
    minutes: 10,
    seconds: 3.984,
};

/// Склонение (J2000) фиктивного источника
pub const DEFAULT_SRC_DEJ: SkyAngle = SkyAngle {
    negative: false,
    units: 12,
    minutes: 10,
    seconds: 58.8,
};

/// Метаданные заголовка SIGPROC filterbank файла
#[derive(Debug, Clone, PartialEq)]
pub struct FilterbankHeader {
    /// Идентификатор телескопа (0 = фиктивный)
    pub telescope_id: i32,
    /// Идентификатор бэкенда (0 = фиктивный)
    pub machine_id: i32,
    /// Тип данных (1 = filterbank)
    pub data_type: i32,
    /// Имя источника
    pub source_name: String,
    /// Исходный raw файл (нет связанного файла)
    pub rawdatafile: String,
    /// Азимут телескопа в начале скана (градусы)
    pub az_start: f64,
    /// Зенитный угол в начале скана (градусы)
    pub za_start: f64,
    /// Прямое восхождение источника
    pub src_raj: SkyAngle,
    /// Склонение источника
    pub src_dej: SkyAngle,
    /// Время начала (MJD)
    pub tstart: f64,
    /// Интервал между отсчётами (секунды)
    pub tsamp: f64,
    /// Частота первого канала (МГц)
    pub fch1: f64,
    /// Шаг между каналами (МГц)
    pub foff: f64,
    /// Количество каналов
    pub nchans: i32,
    /// Количество лучей
    pub nbeams: i32,
    /// Номер луча
    pub ibeam: i32,
    /// Количество IF (поляризаций)
    pub nifs: i32,
    /// Разрядность выборки
    pub nbits: i32,
    /// Количество временных отсчётов
    pub nsamples: i32,
}

impl FilterbankHeader {
    /// Заголовок, описывающий секцию данных `descriptor`.
    ///
    /// Один луч, одна поляризация. Размеры, не помещающиеся в i32,
    /// дают ошибку конфигурации: заголовок всегда совпадает с данными.
    pub fn for_descriptor(
        descriptor: &SpectralDescriptor,
        tstart_mjd: f64,
    ) -> FbgenResult<Self> {
        Ok(Self {
            telescope_id: 0,
            machine_id: 0,
            data_type: 1,
            source_name: DEFAULT_SOURCE_NAME.to_string(),
            rawdatafile: "N/A".to_string(),
            az_start: 0.0,
            za_start: 0.0,
            src_raj: DEFAULT_SRC_RAJ,
            src_dej: DEFAULT_SRC_DEJ,
            tstart: tstart_mjd,
            tsamp: descriptor.sample_interval_s,
            fch1: descriptor.first_channel_freq_mhz,
            foff: descriptor.channel_spacing_mhz,
            nchans: header_int("nchans", descriptor.channel_count as u64)?,
            nbeams: 1,
            ibeam: 1,
            nifs: 1,
            nbits: header_int("nbits", descriptor.bits_per_sample as u64)?,
            nsamples: header_int("nsamples", descriptor.sample_count)?,
        })
    }
}

fn header_int(
    key: &str,
    value: u64,
) -> FbgenResult<i32> {
    i32::try_from(value).map_err(|_| {
        FbgenError::configuration(format!("{key} = {value} does not fit the i32 header field"))
    })
}
