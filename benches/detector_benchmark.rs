use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pitch_tracker::detector::autocorrelation::AutocorrelationDetector;
use pitch_tracker::detector::config::DetectorConfig;
use pitch_tracker::detector::correlation::{
    Autocorrelation, DirectAutocorrelation, FftAutocorrelation,
};
use pitch_tracker::detector::PitchDetector;

fn complex_tone(freq: f64, config: &DetectorConfig) -> Vec<f64> {
    let period = config.sample_rate as f64 / freq;
    (0..config.block_size)
        .map(|i| {
            let x = 2.0 * std::f64::consts::PI * i as f64 / period;
            x.sin() + 0.6 * (2.0 * x).sin() + 0.3 * (3.0 * x).sin()
        })
        .collect()
}

pub fn autocorrelation_benchmark(c: &mut Criterion) {
    let config = DetectorConfig::default();
    let bounds = config.validate().unwrap();
    let signal = complex_tone(261.63, &config);
    let mut result = vec![0.0; bounds.autocorrelation_len()];

    let mut fft = FftAutocorrelation::<f64>::new(config.block_size);
    c.bench_function("fft autocorrelation", |b| {
        b.iter(|| fft.normalized_autocorrelation(black_box(&signal), 0.0, &mut result))
    });

    let mut direct = DirectAutocorrelation::<f64>::new(config.block_size);
    let mut group = c.benchmark_group("slow");
    group.sample_size(10);
    group.bench_function("direct autocorrelation", |b| {
        b.iter(|| direct.normalized_autocorrelation(black_box(&signal), 0.0, &mut result))
    });
    group.finish();
}

pub fn pitch_detect_benchmark(c: &mut Criterion) {
    let config = DetectorConfig::default();
    let signal = complex_tone(261.63, &config);
    let mut detector = AutocorrelationDetector::<f64>::new(config).unwrap();

    c.bench_function("Autocorrelation get_pitch", |b| {
        b.iter(|| detector.get_pitch(black_box(&signal)).unwrap());
    });
}

criterion_group!(benches, pitch_detect_benchmark, autocorrelation_benchmark);
criterion_main!(benches);
