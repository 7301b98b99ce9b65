use std::{path::PathBuf, sync::atomic::Ordering};

use clap::Parser;
use fbgen_cli::{check_output_path, GenerationSession, GeneratorConfig};
use log::{error, info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "fbgen",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate a synthetic SIGPROC filterbank (.fil) file from a config file",
    long_about = None,
)]
struct Cli {
    /// Файл конфигурации (TOML)
    config: PathBuf,
    /// Выходной файл, расширение .fil
    output: PathBuf,
    /// Зерно генератора шума (переопределяет `seed` из конфигурации)
    #[arg(short, long)]
    seed: Option<u64>,
    /// Интервал вывода прогресса (тики). По умолчанию: ~10 сообщений
    #[arg(long)]
    progress_every: Option<u64>,
    /// Тихий режим (только ошибки)
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.quiet {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_secs()
        .init();

    let output = match check_output_path(&cli.output) {
        Ok(p) => p,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let config = match GeneratorConfig::from_file(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let seed = cli
        .seed
        .or(config.seed)
        .unwrap_or_else(rand::random::<u64>);

    let descriptor = config.to_descriptor();
    let (f_begin, f_end) = descriptor.band_edges_mhz();

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  Config        : {:?}", cli.config);
    info!("  Channels      : {}", config.nchans);
    info!("  fch1 / foff   : {} MHz / {} MHz", config.fch1, config.foff);
    info!("  Band          : {f_begin} .. {f_end} MHz");
    info!("  Samples       : {} x {} s", config.nsamples, config.tsamp);
    info!("  Bits/sample   : {}", config.nbits);
    info!("  Chunk         : {} channels", config.max_chans_per_chunk);
    info!("  Seed          : {seed}");
    info!("  Output        : {:?}", output);
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let session = GenerationSession::new(config, output.clone(), seed)
        .with_progress_interval(cli.progress_every);
    let stop_flag = session.stop_flag();

    if let Err(e) = ctrlc::set_handler(move || {
        if stop_flag.swap(true, Ordering::SeqCst) {
            // Второй Ctrl+C: принудительный выход
            warn!("Force exit");
            std::process::exit(130);
        }
        warn!("Ctrl+C received, stopping after the current chunk...");
    }) {
        warn!("Failed to set Ctrl+C handler: {e}");
    }

    let summary = match session.run() {
        Ok(s) => s,
        Err(e) if e.is_cancelled() => {
            warn!("{e}. Truncated file left at {:?}", output);
            std::process::exit(1);
        }
        Err(e) => {
            error!("Generation failed: {e}");
            std::process::exit(1);
        }
    };

    info!(
        "✓ Generation complete: {:?} ({} header + {} data bytes, {} ticks, seed {})",
        output,
        summary.header_bytes,
        summary.data.bytes,
        summary.data.ticks,
        summary.seed
    );
    info!("Elapsed time = {:.1} seconds", summary.elapsed.as_secs_f64());
}
