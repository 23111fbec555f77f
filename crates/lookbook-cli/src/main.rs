//! `lookbook` command line.
//!
//! ```text
//! lookbook export figma.json > tokens.json
//! lookbook css tokens.json src/app.css -o dist/app.css
//! lookbook colors tokens.json > colors.json
//! lookbook types colors.json > colors.d.ts
//! ```
//!
//! Every input path may be `-` to read stdin.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use lookbook::Diagnostics;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lookbook")]
#[command(version)]
#[command(about = "Turn Figma variables into CSS design tokens")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Build configuration (YAML). Defaults apply when omitted.
    #[arg(long, short, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log more; repeat for trace output. `RUST_LOG` takes precedence.
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Export raw Figma variables as a token document
    Export {
        /// Figma variables export (JSON)
        input: PathBuf,
    },

    /// Process a stylesheet, replacing `@figma-variables;` with tokens
    Css {
        /// Token document, or a raw Figma export with --from-figma
        tokens: PathBuf,

        /// Stylesheet to process
        input: PathBuf,

        /// Output file (stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Treat TOKENS as a raw Figma export
        #[arg(long)]
        from_figma: bool,
    },

    /// Print the primitive color palette as hex JSON
    Colors {
        /// Token document
        tokens: PathBuf,
    },

    /// Print a TypeScript declaration for a color palette
    Types {
        /// Palette JSON, as printed by `lookbook colors`
        colors: PathBuf,

        /// Module name to declare
        #[arg(long, default_value = lookbook::palette::DEFAULT_MODULE)]
        module: String,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn report(diagnostics: &Diagnostics) {
    for warning in diagnostics {
        eprintln!("{} {}", style("warning:").yellow().bold(), warning);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Export { input } => {
            println!("{}", commands::export(&input)?);
        }
        Commands::Css {
            tokens,
            input,
            output,
            from_figma,
        } => {
            let processed = commands::css(&tokens, &input, from_figma, &config)?;
            report(&processed.diagnostics);
            let written = commands::write_stylesheet(&processed, &input, output.as_deref())?;
            for path in written {
                eprintln!("{} {}", style("wrote").green(), path.display());
            }
        }
        Commands::Colors { tokens } => {
            println!("{}", commands::colors(&tokens)?);
        }
        Commands::Types { colors, module } => {
            print!("{}", commands::types(&colors, &module)?);
        }
    }

    Ok(())
}
