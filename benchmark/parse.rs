use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pipemark::{ParseOptions, parse, parse_to_ast, render_html};

fn load_table_examples() -> String {
    let json = include_str!("../tests/fixtures/tables.json");
    let examples: Vec<serde_json::Value> = serde_json::from_str(json).unwrap();
    examples
        .iter()
        .map(|s| s["markdown"].as_str().unwrap())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn gen_table(rows: usize, cols: usize) -> String {
    let mut s = String::new();
    s.push('|');
    for c in 0..cols {
        s.push_str(&format!(" col{c} |"));
    }
    s.push('\n');
    s.push('|');
    for c in 0..cols {
        s.push_str(match c % 4 {
            0 => " --- |",
            1 => " :--- |",
            2 => " :---: |",
            _ => " ---: |",
        });
    }
    s.push('\n');
    for r in 0..rows {
        s.push('|');
        for c in 0..cols {
            s.push_str(&format!(" r{r}c{c} |"));
        }
        s.push('\n');
    }
    s
}

fn gen_inline_table(rows: usize) -> String {
    let mut s = String::from("Name | Value | Note\n--- | ---: | ---\n");
    for i in 0..rows {
        s.push_str(&format!(
            "**item {i}** | `{i}` | a \\| b *and* &amp; more\n"
        ));
    }
    s
}

fn gen_mixed_doc(n: usize) -> String {
    (1..=n)
        .map(|i| {
            format!(
                "# Section {i}\n\nSome *paragraph* text.\n\n> a | b\n> --- | ---\n> {i} | x\n\n{}\n",
                gen_table(5, 3)
            )
        })
        .collect()
}

fn gen_pipe_paragraphs(n: usize) -> String {
    (0..n)
        .map(|i| format!("not | a | table {i}\n-- | --\n\n"))
        .collect()
}

// --- Benchmark helper ---

fn bench_group(c: &mut Criterion, group_name: &str, input: &str) {
    let label = format!("{} bytes", input.len());
    let configs = [
        ("tables", ParseOptions::default()),
        ("commonmark", ParseOptions::commonmark()),
    ];
    let mut group = c.benchmark_group(group_name);
    for (name, opts) in &configs {
        group.bench_with_input(BenchmarkId::new(*name, &label), input, |b, input| {
            b.iter(|| parse(black_box(input), opts))
        });
    }
    group.finish();
}

// --- Benchmarks ---

fn bench_examples(c: &mut Criterion) {
    let input = load_table_examples();
    bench_group(c, "table_examples", &input);
}

fn bench_table_sizes(c: &mut Criterion) {
    for &(rows, cols) in &[(10, 3), (100, 10), (1_000, 20)] {
        let input = gen_table(rows, cols);
        bench_group(c, &format!("table_size/{rows}x{cols}"), &input);
    }
}

fn bench_block_types(c: &mut Criterion) {
    let cases: Vec<(&str, String)> = vec![
        ("inline_cells", gen_inline_table(200)),
        ("mixed", gen_mixed_doc(50)),
        ("rejected_separators", gen_pipe_paragraphs(200)),
    ];
    for (name, input) in &cases {
        bench_group(c, &format!("block_types/{name}"), input);
    }
}

fn bench_render_only(c: &mut Criterion) {
    let opts = ParseOptions::default();
    let doc = parse_to_ast(&gen_table(500, 8), &opts);
    c.bench_function("render_only/500x8", |b| {
        b.iter(|| render_html(black_box(&doc), &opts))
    });
}

criterion_group!(
    benches,
    bench_examples,
    bench_table_sizes,
    bench_block_types,
    bench_render_only,
);
criterion_main!(benches);
