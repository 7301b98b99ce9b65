//! Заголовок SIGPROC filterbank.
//!
//! Заголовок есть последовательность пар "ключ/значение", обрамлённая
//! строками `HEADER_START` и `HEADER_END`. Ключ кодируется как строка
//! (длина i32 + байты), значение кодируется в зависимости от типа поля. Все
//! многобайтовые числа хранятся в порядке little-endian.

use std::io::Write;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::{
    binary::{write_sigproc_f64, write_sigproc_i32, write_sigproc_str},
    FbgenError, FbgenResult, FilterbankHeader,
};

/// Маркер начала заголовка
pub const HEADER_START: &str = "HEADER_START";

/// Зарезервированный маркер конца заголовка
pub const HEADER_END: &str = "HEADER_END";

/// MJD эпохи Unix (1970-01-01T00:00:00 UTC)
pub const MJD_UNIX_EPOCH: f64 = 40_587.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Типизированное значение поля заголовка
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    /// 32-битное целое со знаком
    Int(i32),
    /// 64-битное число с плавающей точкой
    Double(f64),
    /// Строка с префиксом длины
    Str(String),
    /// Пара 32-битных целых со знаком
    IntPair(i32, i32),
}

/// Сериализация [`FilterbankHeader`] в формат SIGPROC.
pub trait FilterbankHeaderExt {
    /// Поля заголовка в порядке записи.
    fn fields(&self) -> Vec<(&'static str, HeaderValue)>;

    /// Полный заголовок, от `HEADER_START` до `HEADER_END` включительно.
    fn serialize(&self) -> FbgenResult<Vec<u8>>;
}

impl FilterbankHeaderExt for FilterbankHeader {
    fn fields(&self) -> Vec<(&'static str, HeaderValue)> {
        vec![
            ("telescope_id", HeaderValue::Int(self.telescope_id)),
            ("az_start", HeaderValue::Double(self.az_start)),
            ("machine_id", HeaderValue::Int(self.machine_id)),
            ("source_name", HeaderValue::Str(self.source_name.clone())),
            ("data_type", HeaderValue::Int(self.data_type)),
            ("nchans", HeaderValue::Int(self.nchans)),
            ("ibeam", HeaderValue::Int(self.ibeam)),
            ("tsamp", HeaderValue::Double(self.tsamp)),
            ("foff", HeaderValue::Double(self.foff)),
            ("src_raj", HeaderValue::Double(self.src_raj.to_sigproc())),
            ("src_dej", HeaderValue::Double(self.src_dej.to_sigproc())),
            ("tstart", HeaderValue::Double(self.tstart)),
            ("nbeams", HeaderValue::Int(self.nbeams)),
            ("fch1", HeaderValue::Double(self.fch1)),
            ("za_start", HeaderValue::Double(self.za_start)),
            ("rawdatafile", HeaderValue::Str(self.rawdatafile.clone())),
            ("nifs", HeaderValue::Int(self.nifs)),
            ("nbits", HeaderValue::Int(self.nbits)),
            ("nsamples", HeaderValue::Int(self.nsamples)),
        ]
    }

    fn serialize(&self) -> FbgenResult<Vec<u8>> {
        encode_header(&self.fields())
    }
}

/// Кодирует одно поле: ключ, затем значение.
pub fn encode_field<W: Write>(
    w: &mut W,
    key: &str,
    value: &HeaderValue,
) -> FbgenResult<()> {
    if key.is_empty() {
        return Err(FbgenError::header_field("empty key"));
    }

    if key == HEADER_START || key == HEADER_END {
        return Err(FbgenError::header_field(format!("reserved key '{key}'")));
    }

    write_sigproc_str(w, key)?;

    match value {
        HeaderValue::Int(v) => write_sigproc_i32(w, *v),
        HeaderValue::Double(v) => write_sigproc_f64(w, *v),
        HeaderValue::Str(s) => write_sigproc_str(w, s),
        HeaderValue::IntPair(a, b) => {
            write_sigproc_i32(w, *a)?;
            write_sigproc_i32(w, *b)
        }
    }
}

/// Кодирует заголовок из набора полей.
pub fn encode_header(fields: &[(&str, HeaderValue)]) -> FbgenResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(512);

    write_sigproc_str(&mut buf, HEADER_START)?;
    for (key, value) in fields {
        encode_field(&mut buf, key, value)?;
    }
    write_sigproc_str(&mut buf, HEADER_END)?;

    Ok(buf)
}

/// Переводит метку времени ISO-8601 в модифицированную юлианскую дату.
///
/// Метка без часового пояса считается UTC. Допускается дата без времени.
pub fn mjd_from_iso(s: &str) -> FbgenResult<f64> {
    let s = s.trim();

    let utc = if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        dt.with_timezone(&Utc)
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        naive.and_utc()
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        naive.and_utc()
    } else if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        date.and_hms_opt(0, 0, 0)
            .ok_or_else(|| FbgenError::configuration(format!("invalid date '{s}'")))?
            .and_utc()
    } else {
        return Err(FbgenError::configuration(format!(
            "invalid ISO-8601 timestamp '{s}'"
        )));
    };

    let secs = utc.timestamp() as f64 + utc.timestamp_subsec_nanos() as f64 * 1e-9;

    Ok(MJD_UNIX_EPOCH + secs / SECONDS_PER_DAY)
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
