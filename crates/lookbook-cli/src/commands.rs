//! Subcommand implementations. Each reads its inputs from disk (or stdin for
//! `-`) and hands back what `main` prints or writes.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lookbook::css::Processed;
use lookbook::palette::Palette;
use lookbook::{
    export_tokens, hex_palette, process_stylesheet, run_from_figma, typescript_declaration,
    Config, FigmaExport, TokenDocument, VariableSet,
};

const STDIN: &str = "-";

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Loads the configuration file, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let yaml = read_input(path)?;
    Config::from_yaml(&yaml).with_context(|| format!("invalid configuration in {}", path.display()))
}

fn load_tokens(path: &Path) -> Result<TokenDocument> {
    TokenDocument::from_json(&read_input(path)?)
        .with_context(|| format!("{} is not a token document", path.display()))
}

/// Token document JSON for a raw Figma export.
pub fn export(input: &Path) -> Result<String> {
    let export = FigmaExport::from_json(&read_input(input)?)
        .with_context(|| format!("{} is not a Figma variables export", input.display()))?;
    let document = export_tokens(&VariableSet::new(export))?;
    Ok(document.to_json()?)
}

/// Runs the stylesheet plugins over `input`.
pub fn css(tokens: &Path, input: &Path, from_figma: bool, config: &Config) -> Result<Processed> {
    let stylesheet = read_input(input)?;
    let from = (input.as_os_str() != STDIN).then(|| input.to_string_lossy().into_owned());

    if from_figma {
        let export = FigmaExport::from_json(&read_input(tokens)?)
            .with_context(|| format!("{} is not a Figma variables export", tokens.display()))?;
        return Ok(run_from_figma(export, &stylesheet, from.as_deref(), config)?);
    }

    let document = load_tokens(tokens)?;
    Ok(process_stylesheet(document, &stylesheet, from.as_deref(), config))
}

/// Writes the processed stylesheet to `output` (stdout when `None`) and the
/// extracted sheets beside it. Without an output file, extracted sheets go
/// next to `input`.
///
/// Returns the files written.
pub fn write_stylesheet(
    processed: &Processed,
    input: &Path,
    output: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    let dir = match output {
        Some(path) => {
            fs::write(path, &processed.css)
                .with_context(|| format!("failed to write {}", path.display()))?;
            written.push(path.to_path_buf());
            path.parent()
        }
        None => {
            print!("{}", processed.css);
            (input.as_os_str() != STDIN).then(|| input.parent()).flatten()
        }
    }
    .unwrap_or_else(|| Path::new(""));

    for sheet in &processed.extracted {
        let path = dir.join(&sheet.file_name);
        fs::write(&path, &sheet.css)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}

/// Hex palette JSON for a token document.
pub fn colors(tokens: &Path) -> Result<String> {
    let palette = hex_palette(&load_tokens(tokens)?);
    Ok(serde_json::to_string_pretty(&palette)?)
}

/// TypeScript declaration for a palette JSON file.
pub fn types(colors: &Path, module: &str) -> Result<String> {
    let palette: Palette = serde_json::from_str(&read_input(colors)?)
        .with_context(|| format!("{} is not a color palette", colors.display()))?;
    Ok(typescript_declaration(&palette, module)?)
}
