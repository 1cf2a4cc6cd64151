use pipemark::{ParseOptions, parse};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Deserialize)]
struct TableExample {
    markdown: String,
    html: String,
    example: u32,
    section: String,
}

#[test]
fn pipe_table_examples() {
    let fixture_json = include_str!("./fixtures/tables.json");
    let tests: Vec<TableExample> = serde_json::from_str(fixture_json).expect("Failed to parse table fixture JSON");

    let mut pass = 0u32;
    let mut fail = 0u32;
    let mut failures = Vec::new();
    let mut section_stats: BTreeMap<String, (u32, u32)> = BTreeMap::new();
    let opts = ParseOptions::default();

    for test in &tests {
        let result = parse(&test.markdown, &opts);
        let entry = section_stats.entry(test.section.clone()).or_insert((0, 0));
        if result == test.html {
            pass += 1;
            entry.0 += 1;
        } else {
            fail += 1;
            entry.1 += 1;
            failures.push(format!(
                "FAIL example {} ({})\n  input:    {:?}\n  expected: {:?}\n  got:      {:?}",
                test.example, test.section, test.markdown, test.html, result
            ));
        }
    }

    eprintln!("\n=== Pipe table examples ===");
    eprintln!("{pass}/{} passed ({fail} failed)\n", pass + fail);

    eprintln!("Section breakdown:");
    for (section, (p, f)) in &section_stats {
        let total = p + f;
        let status = if *f == 0 { "  OK" } else { "FAIL" };
        eprintln!("  {status} {section}: {p}/{total}");
    }

    for f in &failures {
        eprintln!("{f}");
    }

    if fail > 0 {
        panic!("{fail} table examples failed (see details above)");
    }
}

#[test]
fn examples_without_tables_extension_never_emit_table() {
    let fixture_json = include_str!("./fixtures/tables.json");
    let tests: Vec<TableExample> = serde_json::from_str(fixture_json).expect("Failed to parse table fixture JSON");
    let opts = ParseOptions::commonmark();

    for test in &tests {
        let result = parse(&test.markdown, &opts);
        assert!(
            !result.contains("<table>"),
            "example {} produced a table with no extensions: {result:?}",
            test.example
        );
    }
}

#[test]
fn rendering_is_deterministic() {
    let fixture_json = include_str!("./fixtures/tables.json");
    let tests: Vec<TableExample> = serde_json::from_str(fixture_json).expect("Failed to parse table fixture JSON");
    let opts = ParseOptions::default();

    for test in &tests {
        let doc = pipemark::parse_to_ast(&test.markdown, &opts);
        let first = pipemark::render_html(&doc, &opts);
        let second = pipemark::render_html(&doc, &opts);
        assert_eq!(first, second, "example {}", test.example);
    }
}
