use std::{hint::black_box, io};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fbgen_core::{quantize, ChunkedStreamWriter, SpectralDescriptor};
use rand::{rngs::StdRng, SeedableRng};

fn descriptor(
    bits: u32,
    chunk: usize,
) -> SpectralDescriptor {
    SpectralDescriptor {
        channel_count: 16_384,
        first_channel_freq_mhz: 1420.0,
        channel_spacing_mhz: -0.001,
        sample_count: 8,
        sample_interval_s: 0.001,
        bits_per_sample: bits,
        signal_low: 0.0,
        signal_high: 100.0,
        max_noise_fraction: 0.1,
        max_channels_per_chunk: chunk,
    }
}

fn bench_writer(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunked_writer");

    for bits in [8u32, 16, 32] {
        for chunk in [1_024usize, 16_384] {
            let d = descriptor(bits, chunk);
            let writer = ChunkedStreamWriter::new(&d).unwrap();
            group.throughput(Throughput::Bytes(d.data_section_len().unwrap()));

            group.bench_with_input(
                BenchmarkId::new(format!("{bits}bit"), chunk),
                &writer,
                |b, w| {
                    b.iter(|| {
                        let mut rng = StdRng::seed_from_u64(1);
                        w.run(&mut io::sink(), &mut rng).unwrap()
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_quantize(c: &mut Criterion) {
    let values: Vec<f64> = (0..65_536).map(|i| (i as f64 * 0.37).sin() * 100.0).collect();
    let mut group = c.benchmark_group("quantize");

    for bits in [8u32, 16, 32] {
        group.bench_function(format!("{bits}bit"), |b| {
            b.iter(|| quantize(black_box(&values), bits).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_writer, bench_quantize);
criterion_main!(benches);
