use criterion::{criterion_group, BenchmarkId, Criterion, Throughput};
use rans_codec::{compress, Order};

use super::zipfian_buffer;

fn bench_compress(c: &mut Criterion) {
    let input = zipfian_buffer(0);
    let mut group = c.benchmark_group("compress");
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_with_input(BenchmarkId::new("order0", input.len()), &input, |b, input| {
        b.iter(|| compress(input, Order::Zero));
    });
    group.bench_with_input(BenchmarkId::new("order1", input.len()), &input, |b, input| {
        b.iter(|| compress(input, Order::One));
    });

    group.finish();
}

criterion_group!(encoder_benches, bench_compress);
