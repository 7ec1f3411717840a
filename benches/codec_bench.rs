//! Parse/write throughput on a generated scene of many grid meshes.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ac3drust::geometry::{decode, encode};
use ac3drust::io::ac::{parse, parse_many, write, WriteOptions};
use ac3drust::{Material, SceneGraph, SceneNode, Surface, SurfaceRef, Vector3};

/// `objects` poly nodes, each an `n` x `n` grid of quads
fn grid_scene(objects: usize, n: usize) -> SceneGraph {
    let mut scene = SceneGraph::new();
    scene.add_material(Material::new("grid"));
    for o in 0..objects {
        let mut node = SceneNode::polygon(format!("grid{}", o));
        node.transform.translation = Some(Vector3::new(o as f64 * 1.5, 0.0, 0.0));
        let poly = node.polygon_data_mut().expect("poly node");
        for y in 0..=n {
            for x in 0..=n {
                poly.vertices
                    .push(Vector3::new(x as f64 / n as f64, y as f64 / n as f64, 0.0));
            }
        }
        for y in 0..n {
            for x in 0..n {
                let i = y * (n + 1) + x;
                let uv = |v: usize| {
                    SurfaceRef::new(v, (v % (n + 1)) as f64 / n as f64, (v / (n + 1)) as f64 / n as f64)
                };
                poly.surfaces
                    .push(Surface::polygon(0, vec![uv(i), uv(i + 1), uv(i + n + 2), uv(i + n + 1)]));
            }
        }
        scene.root.add_child(node);
    }
    scene
}

fn bench_parse(c: &mut Criterion) {
    let bytes = write(&grid_scene(16, 32), &WriteOptions::default()).expect("write should succeed");

    c.bench_function("parse/grid_16x32", |b| {
        b.iter(|| parse(black_box(&bytes)).expect("parse should succeed"));
    });
}

fn bench_write(c: &mut Criterion) {
    let scene = grid_scene(16, 32);

    c.bench_function("write/grid_16x32", |b| {
        b.iter(|| write(black_box(&scene), &WriteOptions::default()).expect("write should succeed"));
    });
}

fn bench_parse_many(c: &mut Criterion) {
    let files: Vec<Vec<u8>> = (0..8)
        .map(|_| write(&grid_scene(4, 32), &WriteOptions::default()).expect("write should succeed"))
        .collect();
    let inputs: Vec<&[u8]> = files.iter().map(Vec::as_slice).collect();

    c.bench_function("parse_many/8_files", |b| {
        b.iter(|| parse_many(black_box(&inputs)));
    });
}

fn bench_geometry(c: &mut Criterion) {
    let scene = grid_scene(1, 64);
    let node = &scene.root.children[0];

    c.bench_function("geometry/decode_encode_64", |b| {
        b.iter(|| {
            let (mesh, _) = decode(black_box(node)).expect("decode should succeed");
            encode(&mesh).expect("encode should succeed")
        });
    });
}

criterion_group!(benches, bench_parse, bench_write, bench_parse_many, bench_geometry);
criterion_main!(benches);
