//! Ядро генератора filterbank файлов
//!
//! Синтез сигнала "синусоида + шум" по каналам и временным отсчётам,
//! квантование и потоковая запись в формате SIGPROC filterbank.
//!
//! # Быстрый старт
//!
//! ```no_run
//! use fbgen_core::{ChunkedStreamWriter, FilterbankHeaderExt};
//! use fbgen_types::{FilterbankHeader, SpectralDescriptor};
//! use rand::{rngs::StdRng, SeedableRng};
//! use std::fs::File;
//! use std::io::{BufWriter, Write};
//!
//! let descriptor = SpectralDescriptor::default();
//! let writer = ChunkedStreamWriter::new(&descriptor)?;
//!
//! let mut out = BufWriter::new(File::create("test.fil")?);
//! let header = FilterbankHeader::for_descriptor(&descriptor, 58_849.0)?;
//! out.write_all(&header.serialize()?)?;
//!
//! writer.run(&mut out, &mut StdRng::seed_from_u64(42))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod axis;
pub mod binary;
pub mod format;
pub mod quantize;
pub mod synth;
pub mod writer;

pub use axis::*;
pub use fbgen_types::*;
pub use format::*;
pub use quantize::*;
pub use synth::*;
pub use writer::*;

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
