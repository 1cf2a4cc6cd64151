use pipemark::{Extension, ParseOptions, parse as pipemark_parse, parse_to_ast as pipemark_parse_to_ast};
use wasm_bindgen::prelude::*;

fn build_options(enable_tables: Option<bool>, hard_breaks: Option<bool>) -> ParseOptions {
    let mut extensions = Vec::new();
    if enable_tables.unwrap_or(true) {
        extensions.push(Extension::Tables);
    }
    ParseOptions {
        extensions,
        hard_breaks: hard_breaks.unwrap_or(false),
    }
}

#[wasm_bindgen]
pub fn parse(markdown: &str, enable_tables: Option<bool>, hard_breaks: Option<bool>) -> String {
    pipemark_parse(markdown, &build_options(enable_tables, hard_breaks))
}

#[wasm_bindgen(js_name = "parseToAst")]
pub fn parse_to_ast(
    markdown: &str,
    enable_tables: Option<bool>,
    hard_breaks: Option<bool>,
) -> String {
    let ast = pipemark_parse_to_ast(markdown, &build_options(enable_tables, hard_breaks));
    serde_json::to_string(&ast).unwrap_or_default()
}
