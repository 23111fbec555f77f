//! Media query extraction.
//!
//! Splits top-level `@media` rules out of a stylesheet into separate sheets,
//! one per query, so that they can be loaded conditionally
//! (`<link media="...">`). Rules sharing a query are combined into a single
//! `@media` block by default.
//!
//! Each query gets a key: the name configured for it in
//! [`MediaOptions::queries`], or else the query text lower-cased with
//! whitespace runs replaced by `-`. The key names the output file through
//! [`MediaOptions::output_name`], where `[name]` and `[ext]` come from the
//! processed file's name and `[query]` is the key.
//!
//! Only top-level rules are extracted. An `@media` nested inside a style rule
//! (`.a { @media print { ... } }`) holds declarations rather than rules, so it
//! has no meaning on its own in a separate sheet; it stays where it is.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::processor::{Plugin, ProcessContext};
use super::scan::{landmarks, splice, Landmark};

/// Entry file name assumed when neither the options nor the run name one.
const UNDEFINED_ENTRY: &str = "undefined.css";

/// Options for [`extract_media_queries`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaOptions {
    /// File name used for `[name]` and `[ext]`, overriding the processed
    /// file's own name.
    pub entry: Option<String>,
    /// Output file name pattern.
    pub output_name: String,
    /// Custom keys for specific queries, by exact query text.
    pub queries: IndexMap<String, String>,
    /// Only extract queries that have a custom key.
    pub whitelist: bool,
    /// Merge all rules sharing a key into one `@media` block.
    pub combine: bool,
    /// Text prepended to every extracted sheet.
    pub prepend: Option<String>,
    /// Append the (combined) rules to the end of the stylesheet instead of
    /// producing separate sheets.
    pub merge_back: bool,
}

impl Default for MediaOptions {
    fn default() -> Self {
        Self {
            entry: None,
            output_name: "[name]-[query].[ext]".to_string(),
            queries: IndexMap::new(),
            whitelist: false,
            combine: true,
            prepend: None,
            merge_back: false,
        }
    }
}

/// A stylesheet split off the main one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSheet {
    /// The query key, e.g. `screen-and-(min-width:-768px)` or `tablet`.
    pub key: String,
    /// File name derived from [`MediaOptions::output_name`].
    pub file_name: String,
    pub css: String,
}

/// Result of [`extract_media_queries`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// The stylesheet without the extracted rules.
    pub css: String,
    pub sheets: Vec<ExtractedSheet>,
}

/// Lower-cases `query` and replaces whitespace runs with `-`.
pub fn query_key(query: &str) -> String {
    query
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Splits `(name, ext)` out of a path such as `src/app.css`.
fn entry_parts(entry: &str) -> (&str, &str) {
    let file = entry.rsplit(['/', '\\']).next().unwrap_or(entry);
    match file.split_once('.') {
        Some((name, rest)) => (name, rest.split('.').next().unwrap_or(rest)),
        None => (file, "css"),
    }
}

/// Extracts top-level `@media` rules from `css`.
///
/// `from` is the processed file's path, used for `[name]`/`[ext]` unless
/// [`MediaOptions::entry`] is set.
///
/// # Example
///
/// ```rust
/// use lookbook::css::{extract_media_queries, MediaOptions};
///
/// let css = ".a { color: red }\n@media print {\n  .a { color: black }\n}\n";
/// let extraction = extract_media_queries(css, Some("app.css"), &MediaOptions::default());
///
/// assert_eq!(extraction.css, ".a { color: red }\n");
/// assert_eq!(extraction.sheets[0].file_name, "app-print.css");
/// ```
pub fn extract_media_queries(css: &str, from: Option<&str>, options: &MediaOptions) -> Extraction {
    let entry = options
        .entry
        .as_deref()
        .or(from)
        .unwrap_or(UNDEFINED_ENTRY);
    let (name, ext) = entry_parts(entry);

    let mut media: Vec<_> = landmarks(css)
        .into_iter()
        .filter_map(|landmark| match landmark {
            Landmark::Media { span, params, body } => Some((span, params, body)),
            _ => None,
        })
        .collect();
    media.sort_by_key(|(span, _, _)| span.start);

    // key -> (params, bodies); each inner Vec becomes one @media block
    let mut groups: IndexMap<String, Vec<(String, Vec<String>)>> = IndexMap::new();
    let mut removals = Vec::new();

    for (span, params, body) in media {
        let custom = options.queries.get(&params);
        if options.whitelist && custom.is_none() {
            continue;
        }
        let key = custom.cloned().unwrap_or_else(|| query_key(&params));

        let blocks = groups.entry(key).or_default();
        match blocks.last_mut() {
            Some((_, bodies)) if options.combine => bodies.push(body),
            _ => blocks.push((params, vec![body])),
        }
        removals.push((whole_lines(css, span), String::new()));
    }

    if removals.is_empty() {
        return Extraction {
            css: css.to_string(),
            sheets: Vec::new(),
        };
    }

    let mut remaining = splice(css, removals);
    let mut sheets = Vec::new();

    for (key, blocks) in groups {
        let rendered: String = blocks
            .iter()
            .map(|(params, bodies)| render_block(params, bodies))
            .collect();

        if options.merge_back {
            remaining.push_str(&rendered);
            continue;
        }

        let file_name = options
            .output_name
            .replace("[name]", name)
            .replace("[query]", &key)
            .replace("[ext]", ext);
        let sheet = match &options.prepend {
            Some(prepend) => format!("{}\n{}", prepend, rendered),
            None => rendered,
        };
        tracing::info!(query = %key, file = %file_name, "extracted media query");
        sheets.push(ExtractedSheet {
            key,
            file_name,
            css: sheet,
        });
    }

    Extraction {
        css: remaining,
        sheets,
    }
}

fn render_block(params: &str, bodies: &[String]) -> String {
    let inner = bodies
        .iter()
        .map(|body| format!("  {}\n", body.trim()))
        .collect::<String>();
    format!("@media {} {{\n{}}}\n", params, inner)
}

/// Widens `span` to cover its whole line when nothing else shares the line.
fn whole_lines(css: &str, span: std::ops::Range<usize>) -> std::ops::Range<usize> {
    let line_start = css[..span.start].rfind('\n').map_or(0, |i| i + 1);
    let before_blank = css[line_start..span.start].trim().is_empty();

    let rest = &css[span.end..];
    let line_end = rest.find('\n').map_or(css.len(), |i| span.end + i + 1);
    let after_blank = css[span.end..line_end].trim().is_empty();

    if before_blank && after_blank {
        line_start..line_end
    } else {
        span
    }
}

/// Plugin form of [`extract_media_queries`]; extracted sheets are added to
/// [`ProcessContext::extracted`].
#[derive(Debug, Clone, Default)]
pub struct ExtractMediaQuery {
    options: MediaOptions,
}

impl ExtractMediaQuery {
    pub fn new(options: MediaOptions) -> Self {
        Self { options }
    }
}

impl Plugin for ExtractMediaQuery {
    fn name(&self) -> &str {
        "extract-media-query"
    }

    fn process(&self, css: String, ctx: &mut ProcessContext) -> String {
        let extraction = extract_media_queries(&css, ctx.from.as_deref(), &self.options);
        ctx.extracted.extend(extraction.sheets);
        extraction.css
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSS: &str = "\
.a { color: red }
@media screen and (min-width: 768px) {
  .a { color: blue }
}
.b { color: green }
@media screen and (min-width: 768px) {
  .b { color: teal }
}
@media print {
  .a { display: none }
}
";

    #[test]
    fn test_query_key() {
        assert_eq!(
            query_key("Screen and  (min-width: 768px)"),
            "screen-and-(min-width:-768px)"
        );
    }

    #[test]
    fn test_entry_parts() {
        assert_eq!(entry_parts("src/styles/app.css"), ("app", "css"));
        assert_eq!(entry_parts("C:\\styles\\app.min.css"), ("app", "min"));
        assert_eq!(entry_parts("noext"), ("noext", "css"));
    }

    #[test]
    fn test_extracts_and_combines() {
        let extraction = extract_media_queries(CSS, Some("app.css"), &MediaOptions::default());

        assert_eq!(extraction.css, ".a { color: red }\n.b { color: green }\n");
        assert_eq!(extraction.sheets.len(), 2);

        let wide = &extraction.sheets[0];
        assert_eq!(wide.file_name, "app-screen-and-(min-width:-768px).css");
        assert_eq!(
            wide.css,
            "@media screen and (min-width: 768px) {\n  .a { color: blue }\n  .b { color: teal }\n}\n"
        );

        assert_eq!(extraction.sheets[1].key, "print");
    }

    #[test]
    fn test_without_combine_keeps_blocks_apart() {
        let options = MediaOptions {
            combine: false,
            ..MediaOptions::default()
        };
        let extraction = extract_media_queries(CSS, Some("app.css"), &options);
        let wide = &extraction.sheets[0];
        assert_eq!(wide.css.matches("@media").count(), 2);
    }

    #[test]
    fn test_whitelist_only_extracts_named_queries() {
        let mut queries = IndexMap::new();
        queries.insert("print".to_string(), "paper".to_string());
        let options = MediaOptions {
            queries,
            whitelist: true,
            entry: Some("site.css".to_string()),
            ..MediaOptions::default()
        };

        let extraction = extract_media_queries(CSS, None, &options);
        assert_eq!(extraction.sheets.len(), 1);
        assert_eq!(extraction.sheets[0].file_name, "site-paper.css");
        assert!(extraction.css.contains("min-width: 768px"));
        assert!(!extraction.css.contains("print"));
    }

    #[test]
    fn test_merge_back_appends_to_stylesheet() {
        let options = MediaOptions {
            merge_back: true,
            ..MediaOptions::default()
        };
        let extraction = extract_media_queries(CSS, None, &options);
        assert!(extraction.sheets.is_empty());
        assert!(extraction.css.starts_with(".a { color: red }\n.b { color: green }\n@media"));
        assert_eq!(extraction.css.matches("@media").count(), 2);
    }

    #[test]
    fn test_prepend_and_default_entry() {
        let options = MediaOptions {
            prepend: Some("/* extracted */".to_string()),
            ..MediaOptions::default()
        };
        let extraction = extract_media_queries("@media print { .a {} }", None, &options);
        let sheet = &extraction.sheets[0];
        assert_eq!(sheet.file_name, "undefined-print.css");
        assert!(sheet.css.starts_with("/* extracted */\n@media print {"));
    }

    #[test]
    fn test_nested_media_stays_in_place() {
        let css = ".a {\n  color: red;\n  @media print { color: black }\n}\n@media print {\n  .b { display: none }\n}\n";
        let extraction = extract_media_queries(css, Some("app.css"), &MediaOptions::default());

        assert_eq!(
            extraction.css,
            ".a {\n  color: red;\n  @media print { color: black }\n}\n"
        );
        assert_eq!(extraction.sheets.len(), 1);
        assert_eq!(
            extraction.sheets[0].css,
            "@media print {\n  .b { display: none }\n}\n"
        );
    }

    #[test]
    fn test_no_media_is_unchanged() {
        let css = ".a { color: red }";
        let extraction = extract_media_queries(css, None, &MediaOptions::default());
        assert_eq!(extraction.css, css);
        assert!(extraction.sheets.is_empty());
    }
}
