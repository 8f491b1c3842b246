//! Benchmarks for graph extraction, seam matching and Betti numbers.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use knitmesh::prelude::*;

fn create_grid_mesh(n: usize) -> TriMesh {
    shapes::plane(n, n).unwrap()
}

fn bench_graph_construction(c: &mut Criterion) {
    let mesh = create_grid_mesh(64);

    c.bench_function("build_graph_64x64", |b| {
        b.iter(|| {
            build_graph(
                black_box(mesh.positions()),
                black_box(mesh.faces()),
                shapes::PLANE_THRESHOLD,
            )
        })
    });

    c.bench_function("build_graph_64x64_unfiltered", |b| {
        b.iter(|| build_graph(black_box(mesh.positions()), black_box(mesh.faces()), f64::INFINITY))
    });
}

fn bench_seams(c: &mut Criterion) {
    let n = 64;
    let mesh = create_grid_mesh(n);
    let graph = build_graph(mesh.positions(), mesh.faces(), shapes::PLANE_THRESHOLD);
    let last_row = n * (n + 1);

    c.bench_function("match_seams_64x64", |b| {
        b.iter(|| {
            let mut graph = graph.clone();
            match_seams(
                &mut graph,
                VertexId::new(0),
                VertexId::new(n),
                VertexId::new(last_row),
                VertexId::new(last_row + n),
            )
            .unwrap()
        })
    });

    c.bench_function("bfs_spread_3", |b| {
        let center = VertexId::new(last_row / 2 + n / 2);
        let options = BfsOptions::default().with_max_hops(3);
        b.iter(|| bfs(&graph, black_box(center), &options))
    });
}

fn bench_betti(c: &mut Criterion) {
    let grid = create_grid_mesh(64);
    c.bench_function("betti_grid_64x64", |b| {
        b.iter(|| compute_betti(black_box(grid.positions()), black_box(grid.faces())).unwrap())
    });

    let torus = shapes::torus(2.0, 0.5, 64, 32).unwrap();
    c.bench_function("betti_torus_64x32", |b| {
        b.iter(|| compute_betti(black_box(torus.positions()), black_box(torus.faces())).unwrap())
    });

    let keys: Vec<u32> = (0..10_000).collect();
    c.bench_function("disjoint_set_chain_10k", |b| {
        b.iter(|| {
            let mut set = DisjointSet::new(keys.iter().copied());
            for k in 1..10_000u32 {
                set.union(&(k - 1), &k).unwrap();
            }
            set.component_count()
        })
    });
}

criterion_group!(benches, bench_graph_construction, bench_seams, bench_betti);
criterion_main!(benches);
