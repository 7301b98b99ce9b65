use crate::{FbgenError, FbgenResult, SpectralDescriptor};

/// Построитель частотной оси.
///
/// Хранит только производные от дескриптора величины: опорную частоту
/// канала 0 и шаг в герцах. Значение канала `k` не зависит от того, в
/// какой чанк он попал.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyAxisBuilder {
    anchor_hz: f64,
    spacing_hz: f64,
    channel_count: usize,
}

impl FrequencyAxisBuilder {
    /// При отрицательном шаге опорой служит вычисленный край полосы
    /// `fch1 + nchans * foff`, иначе `fch1`.
    pub fn new(descriptor: &SpectralDescriptor) -> Self {
        let spacing_hz = descriptor.channel_spacing_mhz * 1e6;
        let fch1_hz = descriptor.first_channel_freq_mhz * 1e6;

        let anchor_hz = if spacing_hz < 0.0 {
            fch1_hz + descriptor.channel_count as f64 * spacing_hz
        } else {
            fch1_hz
        };

        Self {
            anchor_hz,
            spacing_hz,
            channel_count: descriptor.channel_count,
        }
    }

    /// Частоты каналов `[start, end)` в герцах.
    pub fn build(
        &self,
        start: usize,
        end: usize,
    ) -> FbgenResult<Vec<f64>> {
        let mut out = Vec::with_capacity(end.saturating_sub(start));
        self.build_into(start, end, &mut out)?;
        Ok(out)
    }

    /// То же, что [`build`](Self::build), но в переиспользуемый буфер.
    /// Буфер очищается перед заполнением.
    pub fn build_into(
        &self,
        start: usize,
        end: usize,
        out: &mut Vec<f64>,
    ) -> FbgenResult<()> {
        if start >= end || end > self.channel_count {
            return Err(FbgenError::range(start, end, self.channel_count));
        }

        out.clear();
        out.extend((start..end).map(|k| self.at(k)));

        Ok(())
    }

    /// Частота одного канала в герцах.
    pub fn frequency_hz(
        &self,
        channel: usize,
    ) -> FbgenResult<f64> {
        if channel >= self.channel_count {
            return Err(FbgenError::range(channel, channel + 1, self.channel_count));
        }

        Ok(self.at(channel))
    }

    pub fn anchor_hz(&self) -> f64 {
        self.anchor_hz
    }

    pub fn spacing_hz(&self) -> f64 {
        self.spacing_hz
    }

    pub fn channel_count(&self) -> usize {
        self.channel_count
    }

    fn at(
        &self,
        k: usize,
    ) -> f64 {
        self.anchor_hz + self.spacing_hz * k as f64
    }
}
