use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
    sync::{atomic::AtomicBool, Arc},
    time::{Duration, Instant},
};

use fbgen_core::{ChunkedStreamWriter, FbgenError, FilterbankHeaderExt, WriteSummary};
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use crate::{GenError, GenResult, GeneratorConfig};

/// Оркестрирует одну сессию генерации: проверка, заголовок, данные.
pub struct GenerationSession {
    config: GeneratorConfig,
    output_path: PathBuf,
    seed: u64,
    progress_every: Option<u64>,
    stop_flag: Arc<AtomicBool>,
}

/// Итог сессии.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub header_bytes: u64,
    pub data: WriteSummary,
    pub seed: u64,
    pub elapsed: Duration,
}

impl SessionSummary {
    pub fn total_bytes(&self) -> u64 {
        self.header_bytes + self.data.bytes
    }
}

impl GenerationSession {
    pub fn new(
        config: GeneratorConfig,
        output_path: PathBuf,
        seed: u64,
    ) -> Self {
        Self {
            config,
            output_path,
            seed,
            progress_every: None,
            stop_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Флаг остановки. Устанавливает в `true` для прерывания между чанками.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Интервал вывода прогресса в тиках. `None`: примерно 10 сообщений
    /// за прогон.
    pub fn with_progress_interval(
        mut self,
        ticks: Option<u64>,
    ) -> Self {
        self.progress_every = ticks;
        self
    }

    /// Запускает генерацию. Блокируется до завершения.
    ///
    /// Параметры проверяются до создания выходного файла. Файл закрывается
    /// на любом пути выхода; при ошибке усечённый файл остаётся на диске.
    pub fn run(self) -> GenResult<SessionSummary> {
        let started = Instant::now();
        let descriptor = self.config.to_descriptor();

        let progress_every = self
            .progress_every
            .unwrap_or_else(|| descriptor.sample_count.div_ceil(10));

        let writer = ChunkedStreamWriter::new(&descriptor)
            .map_err(GenError::Validation)?
            .with_stop_flag(self.stop_flag.clone())
            .with_progress_interval(progress_every);

        let header = self
            .config
            .header(&descriptor)?
            .serialize()
            .map_err(GenError::HeaderWrite)?;

        let (f_begin, f_end) = descriptor.band_edges_mhz();
        info!(
            "Writing data: #freqs = {}, #samples = {}, low = {:e}, high = {:e}",
            descriptor.channel_count,
            descriptor.sample_count,
            descriptor.signal_low,
            descriptor.signal_high
        );
        info!(
            "Band: {f_begin} .. {f_end} MHz, {} chunks per tick",
            writer.plan().chunk_count
        );

        let file = File::create(&self.output_path).map_err(|e| GenError::OutputPath {
            path: self.output_path.clone(),
            reason: format!("cannot create file: {e}"),
        })?;
        let mut out = BufWriter::new(file);

        out.write_all(&header)
            .map_err(|e| GenError::HeaderWrite(FbgenError::Io(e)))?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let data = writer
            .run(&mut out, &mut rng)
            .map_err(GenError::DataWrite)?;

        out.into_inner()
            .map_err(|e| GenError::DataWrite(FbgenError::Io(e.into_error())))?
            .sync_all()
            .map_err(|e| GenError::DataWrite(FbgenError::Io(e)))?;

        info!("File finalized: {:?}", self.output_path);

        Ok(SessionSummary {
            header_bytes: header.len() as u64,
            data,
            seed: self.seed,
            elapsed: started.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use fbgen_core::HEADER_END;
    use tempfile::{tempdir, NamedTempFile};

    use super::*;

    fn test_config() -> GeneratorConfig {
        GeneratorConfig {
            nchans: 100,
            nsamples: 20,
            fch1: 1420.0,
            foff: -0.01,
            tsamp: 0.001,
            tstart_iso: "2024-01-01T00:00:00".to_string(),
            signal_low: 10.0,
            signal_high: 90.0,
            max_noise: 0.2,
            nbits: 8,
            max_chans_per_chunk: 32,
            source_name: "test".to_string(),
            seed: None,
        }
    }

    #[test]
    fn test_session_writes_header_and_data() {
        let tmp = NamedTempFile::new().unwrap();
        let session = GenerationSession::new(test_config(), tmp.path().to_path_buf(), 1);

        let summary = session.run().unwrap();
        assert_eq!(summary.data.bytes, 100 * 20);
        assert_eq!(summary.data.ticks, 20);
        assert_eq!(summary.data.chunks, 20 * 4);

        let raw = std::fs::read(tmp.path()).unwrap();
        assert_eq!(raw.len() as u64, summary.total_bytes());

        let end = summary.header_bytes as usize;
        assert_eq!(&raw[end - HEADER_END.len()..end], HEADER_END.as_bytes());
    }

    #[test]
    fn test_session_is_reproducible() {
        let a = NamedTempFile::new().unwrap();
        let b = NamedTempFile::new().unwrap();

        GenerationSession::new(test_config(), a.path().to_path_buf(), 77)
            .run()
            .unwrap();
        GenerationSession::new(test_config(), b.path().to_path_buf(), 77)
            .run()
            .unwrap();

        assert_eq!(
            std::fs::read(a.path()).unwrap(),
            std::fs::read(b.path()).unwrap()
        );
    }

    #[test]
    fn test_invalid_config_creates_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.fil");

        let mut cfg = test_config();
        cfg.nbits = 24;

        let result = GenerationSession::new(cfg, path.clone(), 1).run();
        assert!(matches!(result, Err(GenError::Validation(_))));
        assert!(!path.exists(), "файл не должен создаваться");
    }

    #[test]
    fn test_stop_flag_leaves_whole_chunks() {
        let tmp = NamedTempFile::new().unwrap();
        let session = GenerationSession::new(test_config(), tmp.path().to_path_buf(), 1);
        session.stop_flag().store(true, Ordering::Relaxed);

        let err = session.run().unwrap_err();
        assert!(err.is_cancelled());

        // Только заголовок: ни одного чанка не записано
        let raw = std::fs::read(tmp.path()).unwrap();
        let header_len = test_config()
            .header(&test_config().to_descriptor())
            .unwrap()
            .serialize()
            .unwrap()
            .len();
        assert_eq!(raw.len(), header_len);
    }

    #[test]
    fn test_unwritable_output_names_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.fil");

        let err = GenerationSession::new(test_config(), path.clone(), 1)
            .run()
            .unwrap_err();

        match &err {
            GenError::OutputPath { path: p, .. } => assert_eq!(p, &path),
            other => panic!("ожидалась ошибка OutputPath, получено {other:?}"),
        }
        assert!(err.to_string().contains("out.fil"));
    }
}
