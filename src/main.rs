//! page-sentinel CLI: classify a saved page snapshot.

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use page_sentinel::config::ResolverConfig;
use page_sentinel::dom::PageDocument;
use page_sentinel::error::PageError;
use page_sentinel::page::PageContext;
use page_sentinel::resolver::Resolver;

#[derive(Parser)]
#[command(name = "page-sentinel", version, about = "Heuristic page-context resolver")]
struct Cli {
    /// Resolver configuration file (TOML). Built-in defaults when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a page from its URL and HTML.
    Resolve {
        /// Absolute URL the page was loaded from.
        #[arg(long)]
        url: String,

        /// HTML file to read. Reads stdin when omitted or "-".
        #[arg(long)]
        html: Option<PathBuf>,

        /// Print the page context as JSON.
        #[arg(long)]
        json: bool,

        /// Also print the first N characters of visible text.
        #[arg(long)]
        excerpt: Option<usize>,
    },

    /// Print the effective resolver configuration as TOML.
    Config,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ResolverConfig::load(path)?,
        None => ResolverConfig::default(),
    };

    match cli.command {
        Commands::Resolve {
            url,
            html,
            json,
            excerpt,
        } => {
            let markup = read_snapshot(html.as_ref())?;
            let page = PageDocument::parse_bytes(&url, &markup)?;
            let resolver = Resolver::new(&config)?;
            let ctx = resolver.resolve(&page);

            if json {
                let out = serde_json::to_string_pretty(&ctx).into_diagnostic()?;
                println!("{out}");
            } else {
                print_context(&ctx);
            }

            if let Some(max_chars) = excerpt {
                println!("\nExcerpt:\n  {}", page.excerpt(max_chars));
            }
        }

        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

/// Read the raw HTML snapshot from a file, or stdin for `None` / `-`.
///
/// Bytes are decoded later, lossily, so pages saved in legacy encodings still
/// resolve.
fn read_snapshot(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(p) if p.as_os_str() != "-" => std::fs::read(p).map_err(|e| {
            PageError::Read {
                origin: p.display().to_string(),
                source: e,
            }
            .into()
        }),
        _ => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf).map_err(|e| PageError::Read {
                origin: "stdin".into(),
                source: e,
            })?;
            Ok(buf)
        }
    }
}

fn print_context(ctx: &PageContext) {
    println!("Page type:  {}", ctx.page_type);
    println!("Confidence: {:.2}", ctx.confidence);

    if ctx.intent_signals.is_empty() {
        println!("Intent signals: none");
    } else {
        println!("Intent signals ({}):", ctx.intent_signals.len());
        for signal in &ctx.intent_signals {
            println!("  {signal}");
        }
    }

    if ctx.risk_signals.is_empty() {
        println!("Risk signals: none");
    } else {
        println!("Risk signals ({}):", ctx.risk_signals.len());
        for signal in &ctx.risk_signals {
            println!("  {signal}");
        }
    }

    if let Some(debug) = &ctx.debug {
        let ranked: Vec<String> = debug
            .scores
            .ranked()
            .iter()
            .map(|(t, s)| format!("{t}={s}"))
            .collect();
        println!("Scores: {}", ranked.join(" "));
    }
}
