//! Locating plugin landmarks in stylesheet source.
//!
//! Plugins never rebuild the stylesheet: they find byte ranges with the
//! `cssparser` tokenizer and splice text into them, so everything they don't
//! touch comes out byte-for-byte as it went in.

use std::ops::Range;

use cssparser::{ParseError, Parser, ParserInput, SourcePosition, Token};

/// At-rule replaced by token declarations.
pub const VARIABLES_MARKER: &str = "figma-variables";

/// Comment text replaced by Tailwind's layer imports.
pub const TAILWIND_MARKER: &str = "=inject-tailwind";

/// A construct one of the plugins acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Landmark {
    /// `@figma-variables;`, at any depth.
    VariablesMarker(Range<usize>),
    /// `/* =inject-tailwind */`, at any depth.
    TailwindMarker(Range<usize>),
    /// A top-level `@media` rule.
    Media {
        span: Range<usize>,
        params: String,
        body: String,
    },
}

/// Finds every landmark in `css`, in no particular order.
pub(crate) fn landmarks(css: &str) -> Vec<Landmark> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut found = Vec::new();
    if let Err(err) = scan_block(&mut parser, 0, &mut found) {
        tracing::debug!(?err, "stylesheet scan stopped early");
    }
    found
}

fn scan_block<'i, 't>(
    parser: &mut Parser<'i, 't>,
    depth: usize,
    found: &mut Vec<Landmark>,
) -> Result<(), ParseError<'i, ()>> {
    loop {
        let start = parser.position();
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => return Ok(()),
        };

        match token {
            Token::Comment(text) if text.trim() == TAILWIND_MARKER => {
                found.push(Landmark::TailwindMarker(span(start, parser.position())));
            }
            Token::AtKeyword(name) if name.eq_ignore_ascii_case(VARIABLES_MARKER) => {
                skip_statement(parser);
                found.push(Landmark::VariablesMarker(span(start, parser.position())));
            }
            Token::AtKeyword(name) if depth == 0 && name.eq_ignore_ascii_case("media") => {
                let prelude_start = parser.position();
                let Some(prelude_end) = seek_block(parser) else {
                    continue;
                };
                let params = parser.slice(prelude_start..prelude_end).trim().to_string();

                let body_start = parser.position();
                parser.parse_nested_block(|nested| scan_block(nested, depth + 1, found))?;
                let end = parser.position();

                let body = parser.slice(body_start..end);
                let body = body.strip_suffix('}').unwrap_or(body).to_string();
                found.push(Landmark::Media {
                    span: span(start, end),
                    params,
                    body,
                });
            }
            Token::CurlyBracketBlock => {
                parser.parse_nested_block(|nested| scan_block(nested, depth + 1, found))?;
            }
            _ => {}
        }
    }
}

/// Consumes tokens through the next `;` or the end of the enclosing block.
fn skip_statement(parser: &mut Parser<'_, '_>) {
    loop {
        match parser.next_including_whitespace_and_comments() {
            Ok(Token::Semicolon) | Err(_) => return,
            Ok(_) => {}
        }
    }
}

/// Consumes an at-rule prelude up to its `{` block.
///
/// Returns the position just before the block, or `None` if the rule ends
/// without one.
fn seek_block(parser: &mut Parser<'_, '_>) -> Option<SourcePosition> {
    loop {
        let before = parser.position();
        match parser.next_including_whitespace_and_comments() {
            Ok(Token::CurlyBracketBlock) => return Some(before),
            Ok(Token::Semicolon) | Err(_) => return None,
            Ok(_) => {}
        }
    }
}

fn span(start: SourcePosition, end: SourcePosition) -> Range<usize> {
    start.byte_index()..end.byte_index()
}

/// The whitespace between the start of the line and `at`, or `""` if the
/// line has other content before `at`.
pub(crate) fn indentation_before(css: &str, at: usize) -> &str {
    let line_start = css[..at].rfind('\n').map_or(0, |i| i + 1);
    let prefix = &css[line_start..at];
    if prefix.chars().all(char::is_whitespace) {
        prefix
    } else {
        ""
    }
}

/// Replaces non-overlapping byte ranges of `css`.
pub(crate) fn splice(css: &str, mut edits: Vec<(Range<usize>, String)>) -> String {
    edits.sort_by_key(|(range, _)| range.start);

    let mut out = String::with_capacity(css.len());
    let mut cursor = 0;
    for (range, replacement) in edits {
        out.push_str(&css[cursor..range.start]);
        out.push_str(&replacement);
        cursor = range.end;
    }
    out.push_str(&css[cursor..]);
    out
}
