use byteorder::{ByteOrder, LittleEndian};

use crate::{FbgenResult, SampleWidth};

/// Квантует значения в байты заданной разрядности (little-endian).
pub fn quantize(
    values: &[f64],
    bits_per_sample: u32,
) -> FbgenResult<Vec<u8>> {
    let mut out = Vec::new();
    quantize_into(values, bits_per_sample, &mut out)?;
    Ok(out)
}

/// Дописывает квантованные значения в конец `out`.
///
/// - 32: `f32` IEEE-754;
/// - 16: `i16`, отсечение дробной части к нулю;
/// - 8: `i8`, отсечение дробной части к нулю.
///
/// Значения вне диапазона не ограничиваются: после отсечения к нулю число
/// сужается с переполнением по модулю 2^n. NaN даёт 0.
///
/// Разрядность проверяется при каждом вызове; при ошибке `out` не меняется.
pub fn quantize_into(
    values: &[f64],
    bits_per_sample: u32,
    out: &mut Vec<u8>,
) -> FbgenResult<()> {
    let width = SampleWidth::from_bits(bits_per_sample)?;

    let start = out.len();
    out.resize(start + values.len() * width.byte_size(), 0);
    let dst = &mut out[start..];

    match width {
        SampleWidth::Float32 => {
            for (chunk, &v) in dst.chunks_exact_mut(4).zip(values) {
                LittleEndian::write_f32(chunk, v as f32);
            }
        }
        SampleWidth::Int16 => {
            for (chunk, &v) in dst.chunks_exact_mut(2).zip(values) {
                LittleEndian::write_i16(chunk, truncate_i64(v) as i16);
            }
        }
        SampleWidth::Int8 => {
            for (byte, &v) in dst.iter_mut().zip(values) {
                *byte = (truncate_i64(v) as i8) as u8;
            }
        }
    }

    Ok(())
}

/// Отсечение дробной части к нулю. `as` насыщает на краях i64, NaN → 0.
fn truncate_i64(v: f64) -> i64 {
    v.trunc() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FbgenError;

    #[test]
    fn test_float32_bytes() {
        let bytes = quantize(&[1.5, -2.25], 32).unwrap();
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[0..4], &1.5f32.to_le_bytes());
        assert_eq!(&bytes[4..8], &(-2.25f32).to_le_bytes());
    }

    #[test]
    fn test_int16_truncates_toward_zero() {
        let bytes = quantize(&[9.99, -9.99, 0.5, -0.5, 1234.7], 16).unwrap();
        let vals: Vec<i16> = bytes
            .chunks_exact(2)
            .map(|c| i16::from_le_bytes([c[0], c[1]]))
            .collect();
        assert_eq!(vals, vec![9, -9, 0, 0, 1234]);
    }

    #[test]
    fn test_int8_truncates_toward_zero() {
        let bytes = quantize(&[7.9, -7.9, 127.99, -128.5], 8).unwrap();
        let vals: Vec<i8> = bytes.iter().map(|&b| b as i8).collect();
        assert_eq!(vals, vec![7, -7, 127, -128]);
    }

    #[test]
    fn test_overflow_wraps_instead_of_clamping() {
        let bytes = quantize(&[200.0, 70_000.0], 16).unwrap();
        let vals: Vec<i16> = bytes
            .chunks_exact(2)
            .map(|c| i16::from_le_bytes([c[0], c[1]]))
            .collect();
        assert_eq!(vals, vec![200, 4464]);

        let bytes = quantize(&[200.0, -129.0], 8).unwrap();
        assert_eq!(bytes, vec![200u8, 127u8]);
    }

    #[test]
    fn test_nan_quantizes_to_zero() {
        assert_eq!(quantize(&[f64::NAN], 8).unwrap(), vec![0]);
        assert_eq!(quantize(&[f64::NAN], 16).unwrap(), vec![0, 0]);
    }

    #[test]
    fn test_width_per_value() {
        let values = vec![1.0; 7];
        for bits in [8u32, 16, 32] {
            let bytes = quantize(&values, bits).unwrap();
            assert_eq!(bytes.len(), values.len() * (bits as usize / 8));
        }
    }

    #[test]
    fn test_unsupported_width() {
        let mut out = vec![0xAA];
        for bits in [0, 4, 24, 64] {
            let result = quantize_into(&[1.0], bits, &mut out);
            assert!(matches!(result, Err(FbgenError::UnsupportedWidth(b)) if b == bits));
        }
        assert_eq!(out, vec![0xAA], "буфер не меняется при ошибке");
    }

    #[test]
    fn test_into_appends() {
        let mut out = vec![0xFF];
        quantize_into(&[3.0], 8, &mut out).unwrap();
        assert_eq!(out, vec![0xFF, 3]);
    }
}
