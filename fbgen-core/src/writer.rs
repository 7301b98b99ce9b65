use std::{
    io::Write,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use log::{debug, info};
use rand::Rng;

use crate::{
    axis::FrequencyAxisBuilder, quantize::quantize_into, synth::SignalSynthesizer, FbgenError,
    FbgenResult, SpectralDescriptor,
};

/// Разбиение диапазона каналов на чанки ограниченного размера.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
    pub channel_count: usize,
    pub chunk_size: usize,
    pub chunk_count: usize,
    /// Длина последнего чанка, если он неполный (0: все чанки полные)
    pub remainder: usize,
}

/// Итог одного прогона записи.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub ticks: u64,
    pub chunks: u64,
    pub bytes: u64,
}

/// Оркестрирует проход время × частота и потоковую запись секции данных.
pub struct ChunkedStreamWriter {
    descriptor: SpectralDescriptor,
    axis: FrequencyAxisBuilder,
    synth: SignalSynthesizer,
    plan: ChunkPlan,
    stop_flag: Option<Arc<AtomicBool>>,
    progress_every: u64,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl ChunkPlan {
    pub fn new(
        channel_count: usize,
        chunk_size: usize,
    ) -> FbgenResult<Self> {
        if channel_count == 0 || chunk_size == 0 {
            return Err(FbgenError::configuration(format!(
                "cannot plan {channel_count} channels in chunks of {chunk_size}"
            )));
        }

        Ok(Self {
            channel_count,
            chunk_size,
            chunk_count: channel_count.div_ceil(chunk_size),
            remainder: channel_count % chunk_size,
        })
    }

    /// Границы `[start, end)` чанка `index`.
    pub fn bounds(
        &self,
        index: usize,
    ) -> FbgenResult<(usize, usize)> {
        let start = index
            .checked_mul(self.chunk_size)
            .filter(|&s| s < self.channel_count)
            .ok_or_else(|| {
                FbgenError::range(
                    index.saturating_mul(self.chunk_size),
                    index.saturating_add(1).saturating_mul(self.chunk_size),
                    self.channel_count,
                )
            })?;
        let end = start.saturating_add(self.chunk_size).min(self.channel_count);

        Ok((start, end))
    }

    pub fn len_of(
        &self,
        index: usize,
    ) -> FbgenResult<usize> {
        let (start, end) = self.bounds(index)?;
        Ok(end - start)
    }

    /// Границы всех чанков по возрастанию номера канала.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.chunk_count).map(move |i| {
            let start = i * self.chunk_size;
            (start, start.saturating_add(self.chunk_size).min(self.channel_count))
        })
    }
}

impl ChunkedStreamWriter {
    /// Проверяет дескриптор и готовит производные компоненты. Ошибки
    /// конфигурации возникают здесь, до записи первого байта.
    pub fn new(descriptor: &SpectralDescriptor) -> FbgenResult<Self> {
        descriptor.validate()?;

        Ok(Self {
            descriptor: descriptor.clone(),
            axis: FrequencyAxisBuilder::new(descriptor),
            synth: SignalSynthesizer::from_descriptor(descriptor),
            plan: ChunkPlan::new(descriptor.channel_count, descriptor.max_channels_per_chunk)?,
            stop_flag: None,
            progress_every: 0,
        })
    }

    /// Флаг остановки. Проверяется между чанками.
    pub fn with_stop_flag(
        mut self,
        stop_flag: Arc<AtomicBool>,
    ) -> Self {
        self.stop_flag = Some(stop_flag);
        self
    }

    /// Логировать прогресс каждые `ticks` отсчётов (0: не логировать).
    pub fn with_progress_interval(
        mut self,
        ticks: u64,
    ) -> Self {
        self.progress_every = ticks;
        self
    }

    pub fn plan(&self) -> &ChunkPlan {
        &self.plan
    }

    pub fn axis(&self) -> &FrequencyAxisBuilder {
        &self.axis
    }

    /// Пишет всю секцию данных в `sink`.
    ///
    /// Предполагается, что заголовок уже записан. Каждый чанк пишется
    /// целиком сразу после вычисления; при ошибке прогон прерывается.
    pub fn run<W: Write, R: Rng + ?Sized>(
        &self,
        sink: &mut W,
        rng: &mut R,
    ) -> FbgenResult<WriteSummary> {
        let d = &self.descriptor;
        let width = d.sample_width()?;
        // Самый длинный реальный чанк, а не заявленный предел
        let chunk_cap = self.plan.chunk_size.min(self.plan.channel_count);

        let mut freqs: Vec<f64> = Vec::with_capacity(chunk_cap);
        let mut signal: Vec<f64> = Vec::with_capacity(chunk_cap);
        let mut bytes: Vec<u8> = Vec::with_capacity(chunk_cap * width.byte_size());
        let mut summary = WriteSummary::default();

        debug!(
            "Chunk plan: {} channels, {} chunks of {} (remainder {})",
            self.plan.channel_count, self.plan.chunk_count, self.plan.chunk_size, self.plan.remainder
        );

        for tick in 0..d.sample_count {
            let elapsed = d.elapsed_at(tick);

            for chunk_index in 0..self.plan.chunk_count {
                if self.stop_requested() {
                    info!("Stop signal received after {tick} ticks");
                    return Err(FbgenError::Cancelled {
                        ticks_written: summary.ticks,
                    });
                }

                let (start, end) = self.plan.bounds(chunk_index)?;

                self.axis.build_into(start, end, &mut freqs)?;
                self.synth
                    .synthesize_into(&freqs, elapsed, rng, &mut signal);

                bytes.clear();
                quantize_into(&signal, d.bits_per_sample, &mut bytes)?;

                sink.write_all(&bytes)?;

                summary.chunks += 1;
                summary.bytes += bytes.len() as u64;
            }

            summary.ticks += 1;

            if self.progress_every > 0 && summary.ticks % self.progress_every == 0 {
                info!(
                    "[ {}/{} ticks ] chunks={} bytes={}",
                    summary.ticks, d.sample_count, summary.chunks, summary.bytes
                );
            }
        }

        sink.flush()?;

        Ok(summary)
    }

    fn stop_requested(&self) -> bool {
        self.stop_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::Relaxed))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
