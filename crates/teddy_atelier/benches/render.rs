//! Render benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use teddy_atelier::Renderer;
use teddy_relief::{h, Node, Props};

fn table(rows: usize, label: &str) -> Node {
    h(
        "table",
        Some(Props::new().with("class", "grid")),
        (0..rows).map(|i| {
            h(
                "tr",
                None,
                [
                    h("td", None, [i.into()]),
                    h("td", None, [format!("{label} {i}").into()]),
                ],
            )
        }),
    )
}

fn benchmark_placement(c: &mut Criterion) {
    let node = table(100, "row");

    c.bench_function("place_table_100", |b| {
        b.iter(|| {
            let mut renderer = Renderer::new();
            let root = renderer.create_container("main");
            renderer.render(black_box(&node), root)
        });
    });
}

fn benchmark_update(c: &mut Criterion) {
    let first = table(100, "row");
    let second = table(100, "cell");

    let mut renderer = Renderer::new();
    let root = renderer.create_container("main");
    let _ = renderer.render(&first, root);

    c.bench_function("update_table_100_text", |b| {
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let node = if flip { &second } else { &first };
            renderer.render(black_box(node), root)
        });
    });

    c.bench_function("update_table_100_unchanged", |b| {
        b.iter(|| renderer.render(black_box(&first), root));
    });
}

criterion_group!(benches, benchmark_placement, benchmark_update);
criterion_main!(benches);
