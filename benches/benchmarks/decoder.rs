use criterion::{criterion_group, BenchmarkId, Criterion, Throughput};
use rans_codec::{compress, uncompress, Order};

use super::zipfian_buffer;

fn bench_decompress(c: &mut Criterion) {
    let input = zipfian_buffer(1);
    let order0 = compress(&input, Order::Zero);
    let order1 = compress(&input, Order::One);

    let mut group = c.benchmark_group("decompress");
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_with_input(BenchmarkId::new("order0", input.len()), &order0, |b, c| {
        b.iter(|| uncompress(c).unwrap());
    });
    group.bench_with_input(BenchmarkId::new("order1", input.len()), &order1, |b, c| {
        b.iter(|| uncompress(c).unwrap());
    });

    group.finish();
}

criterion_group!(decoder_benches, bench_decompress);
