use lookbook::{
    export_tokens, hex_palette, render_declarations, run_from_figma, Config, Error, FigmaExport,
    FormatWarning, ResolutionError, TokenDocument, VariableSet,
};
use serde_json::{json, Value};

const STYLESHEET: &str = ":root {\n  @figma-variables;\n}\n";

fn alias(id: &str) -> Value {
    json!({ "type": "VARIABLE_ALIAS", "id": id })
}

fn variable(id: &str, name: &str, kind: &str, collection: &str, value: Value) -> Value {
    json!({
        "id": id,
        "name": name,
        "resolvedType": kind,
        "valuesByMode": { "1:0": value },
        "variableCollectionId": collection,
    })
}

/// Collections deliberately listed theme-first to check output ordering.
fn fixture() -> Value {
    json!({
        "collections": [
            { "id": "c3", "name": "theme" },
            { "id": "c2", "name": "semantic" },
            { "id": "c1", "name": "primitives" },
        ],
        "variables": [
            variable("v10", "surface/ring", "FLOAT", "c3", json!(2)),
            variable("v1", "color/blue-60", "COLOR", "c1", json!({ "r": 0, "g": 0, "b": 1, "a": 1 })),
            variable("v2", "color/shade", "COLOR", "c1", json!({ "r": 0, "g": 0, "b": 0, "a": 0.5 })),
            variable("v3", "spacing/spacing-3", "FLOAT", "c1", json!(12)),
            variable("v4", "type/leading-tight", "FLOAT", "c1", json!(1.25)),
            variable("v5", "type/font-weight-heading", "STRING", "c1", json!("Bold")),
            variable("v6", "color/link", "COLOR", "c2", alias("v1")),
            variable("v7", "layout/gutter", "FLOAT", "c2", alias("v3")),
            variable("v8", "misc/bad name", "STRING", "c2", json!("x")),
        ],
    })
}

fn parse(value: Value) -> FigmaExport {
    serde_json::from_value(value).unwrap()
}

fn lines(css: &str) -> Vec<&str> {
    css.lines().map(str::trim).collect()
}

#[test]
fn test_stylesheet_from_figma_export() {
    let out = run_from_figma(parse(fixture()), STYLESHEET, None, &Config::default()).unwrap();

    let body = lines(&out.css);
    assert_eq!(body.first(), Some(&":root {"));
    assert_eq!(body.last(), Some(&"}"));

    let declarations = &body[1..body.len() - 1];
    assert_eq!(declarations.len(), 8);
    assert!(declarations[0].starts_with("--color-blue-60: oklch("));
    assert!(declarations[1].starts_with("--color-shade: oklch(0 0 0 / 0.5"));
    assert_eq!(
        &declarations[2..],
        &[
            "--spacing-3: 0.75rem;",
            "--leading-tight: 1.25;",
            "--font-weight-heading: 700;",
            "--color-link: var(--color-blue-60);",
            "--gutter: var(--spacing-3);",
            "--ring: 2px;",
        ]
    );
}

#[test]
fn test_whitespace_name_is_skipped_with_warning() {
    let out = run_from_figma(parse(fixture()), STYLESHEET, None, &Config::default()).unwrap();

    assert!(!out.css.contains("bad name"));
    let warnings: Vec<&FormatWarning> = out.diagnostics.iter().collect();
    assert_eq!(
        warnings,
        vec![&FormatWarning::WhitespaceInName {
            token: "bad name".to_string()
        }]
    );
}

#[test]
fn test_missing_alias_target_fails_whole_build() {
    let mut fixture = fixture();
    fixture["variables"]
        .as_array_mut()
        .unwrap()
        .push(variable("v9", "layout/margin", "FLOAT", "c2", alias("VariableID:404")));

    let err = run_from_figma(parse(fixture), STYLESHEET, None, &Config::default()).unwrap_err();
    match err {
        Error::Resolution(ResolutionError::MissingTarget { variable, target_id }) => {
            assert_eq!(variable, "layout/margin");
            assert_eq!(target_id.as_str(), "VariableID:404");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_alias_cycle_is_reported() {
    let export = parse(json!({
        "collections": [{ "id": "c1", "name": "semantic" }],
        "variables": [
            variable("a", "x/a", "FLOAT", "c1", alias("b")),
            variable("b", "x/b", "FLOAT", "c1", alias("a")),
        ],
    }));

    let err = export_tokens(&VariableSet::new(export)).unwrap_err();
    assert!(err.to_string().contains("x/a -> x/b -> x/a"));
}

#[test]
fn test_hidden_variables_are_not_exported() {
    let mut fixture = fixture();
    fixture["variables"][1]["hiddenFromPublishing"] = json!(true);

    let document = export_tokens(&VariableSet::new(parse(fixture))).unwrap();
    let primitives = document.get("primitives").unwrap();
    assert!(primitives.iter().all(|t| t.name != "color-blue-60"));
}

#[test]
fn test_token_document_json_survives_reload() {
    let document = export_tokens(&VariableSet::new(parse(fixture()))).unwrap();
    let reloaded = TokenDocument::from_json(&document.to_json().unwrap()).unwrap();
    assert_eq!(reloaded, document);

    let config = Config::default();
    assert_eq!(
        render_declarations(&reloaded, &config),
        render_declarations(&document, &config)
    );
}

#[test]
fn test_document_keeps_collection_order_of_export() {
    let document = export_tokens(&VariableSet::new(parse(fixture()))).unwrap();
    let names: Vec<&str> = document.names().collect();
    assert_eq!(names, vec!["theme", "semantic", "primitives"]);
}

#[test]
fn test_palette_from_exported_document() {
    let document = export_tokens(&VariableSet::new(parse(fixture()))).unwrap();
    let palette = hex_palette(&document);
    let entries: Vec<(&String, &String)> = palette.iter().collect();
    assert_eq!(
        entries,
        vec![
            (&"color-blue-60".to_string(), &"#0000ff".to_string()),
            (&"color-shade".to_string(), &"#00000080".to_string()),
        ]
    );
}

#[test]
fn test_export_rounds_ties_away_from_zero() {
    let export = parse(json!({
        "collections": [{ "id": "c1", "name": "primitives" }],
        "variables": [
            variable("v1", "radius/radius-sm", "FLOAT", "c1", json!(1.0625)),
            variable("v2", "radius/radius-xs", "FLOAT", "c1", json!(-0.0625)),
        ],
    }));

    let out = run_from_figma(export, STYLESHEET, None, &Config::default()).unwrap();
    assert_eq!(
        lines(&out.css),
        vec![":root {", "--radius-sm: 1.063px;", "--radius-xs: -0.063px;", "}"]
    );
}
