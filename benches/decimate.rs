//! Benchmarks for the decimation engine.

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};

use mapthin::{simplify_mesh, simplify_subdivision, Point2, RingMesh, Subdivision};

/// Generates a noisy sine wave polyline.
fn generate_sine_wave(num_points: usize) -> Vec<Point2<f64>> {
    (0..num_points)
        .map(|i| {
            let t = i as f64 / num_points as f64 * 4.0 * std::f64::consts::PI;
            let noise = ((i * 17) % 100) as f64 / 1000.0; // Deterministic "noise"
            Point2::new(t, t.sin() + noise)
        })
        .collect()
}

/// Generates a random walk polyline.
fn generate_random_walk(num_points: usize, seed: u64) -> Vec<Point2<f64>> {
    let mut points = Vec::with_capacity(num_points);
    let mut x = 0.0;
    let mut y = 0.0;
    let mut state = seed;

    for _ in 0..num_points {
        points.push(Point2::new(x, y));

        // Simple xorshift for deterministic "random" steps
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;

        let angle = (state as f64 / u64::MAX as f64) * 2.0 * std::f64::consts::PI;
        x += angle.cos() * 0.1;
        y += angle.sin() * 0.1;
    }

    points
}

fn build_subdivision(points: &[Point2<f64>]) -> Subdivision<f64> {
    let mut map = Subdivision::new();
    map.insert_polyline(points).expect("valid polyline");
    map
}

/// Tiles a constrained chain between two parallel rows of apex vertices so
/// every chain vertex has a full neighbor ring.
fn build_mesh_strip(points: &[Point2<f64>]) -> RingMesh<f64> {
    let mut mesh = RingMesh::new();
    let chain: Vec<_> = points.iter().map(|&p| mesh.add_vertex(p)).collect();
    let top: Vec<_> = points
        .iter()
        .map(|&p| mesh.add_vertex(Point2::new(p.x, p.y + 3.0)))
        .collect();
    let bottom: Vec<_> = points
        .iter()
        .map(|&p| mesh.add_vertex(Point2::new(p.x, p.y - 3.0)))
        .collect();

    for i in 0..points.len() - 1 {
        mesh.add_triangle(chain[i], chain[i + 1], top[i]).unwrap();
        mesh.add_triangle(chain[i + 1], top[i + 1], top[i]).unwrap();
        mesh.add_triangle(chain[i], chain[i + 1], bottom[i]).unwrap();
        mesh.add_triangle(chain[i + 1], bottom[i + 1], bottom[i])
            .unwrap();
        mesh.constrain(chain[i], chain[i + 1]).unwrap();
    }
    mesh
}

fn bench_subdivision(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplify_subdivision");

    for size in [100, 1000, 10000] {
        let map = build_subdivision(&generate_sine_wave(size));
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("sine_wave", size), &map, |b, map| {
            b.iter_batched(
                || map.clone(),
                |mut m| simplify_subdivision(black_box(&mut m), black_box(0.05)),
                BatchSize::SmallInput,
            )
        });
    }

    for size in [1000, 10000] {
        let map = build_subdivision(&generate_random_walk(size, 12345));
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("random_walk", size), &map, |b, map| {
            b.iter_batched(
                || map.clone(),
                |mut m| simplify_subdivision(black_box(&mut m), black_box(0.05)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplify_mesh");

    for size in [100, 1000, 10000] {
        let mesh = build_mesh_strip(&generate_sine_wave(size));
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("sine_wave", size), &mesh, |b, mesh| {
            b.iter_batched(
                || mesh.clone(),
                |mut m| simplify_mesh(black_box(&mut m), black_box(0.05)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_subdivision, bench_mesh);
criterion_main!(benches);
