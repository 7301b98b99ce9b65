use crate::{FbgenError, FbgenResult};

/// Разрядность одной выборки в секции данных
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum SampleWidth {
    /// 8-битное целое со знаком
    Int8 = 8,
    /// 16-битное целое со знаком
    Int16 = 16,
    /// 32-битное число с плавающей точкой IEEE-754
    Float32 = 32,
}

impl SampleWidth {
    pub fn from_bits(bits: u32) -> FbgenResult<Self> {
        match bits {
            8 => Ok(SampleWidth::Int8),
            16 => Ok(SampleWidth::Int16),
            32 => Ok(SampleWidth::Float32),
            _ => Err(FbgenError::UnsupportedWidth(bits)),
        }
    }

    pub fn bits(&self) -> u32 {
        *self as u32
    }

    /// Размер одной выборки в байтах
    pub fn byte_size(&self) -> usize {
        match self {
            SampleWidth::Int8 => 1,
            SampleWidth::Int16 => 2,
            SampleWidth::Float32 => 4,
        }
    }
}

impl std::fmt::Display for SampleWidth {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            SampleWidth::Int8 => write!(f, "int8"),
            SampleWidth::Int16 => write!(f, "int16"),
            SampleWidth::Float32 => write!(f, "float32"),
        }
    }
}
