/*!
 * Pipe Benchmarks
 *
 * In-process payload round-trips through an anonymous pipe
 */

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use posix_demos::ipc::{Payload, PipeChannel};

fn bench_round_trip(c: &mut Criterion) {
    let (mut reader, mut writer) = PipeChannel::open().unwrap();

    c.bench_function("pipe_round_trip", |b| {
        b.iter(|| {
            writer.send(black_box(Payload::new(3))).unwrap();
            black_box(reader.receive().unwrap())
        });
    });
}

fn bench_open_close(c: &mut Criterion) {
    c.bench_function("pipe_open_close", |b| {
        b.iter(|| black_box(PipeChannel::open().unwrap()));
    });
}

criterion_group!(benches, bench_round_trip, bench_open_close);
criterion_main!(benches);
