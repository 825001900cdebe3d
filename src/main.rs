use book_combiner::{assemble, config, output};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "book-combiner")]
#[command(about = "Combine a chaptered markdown book into a single document")]
#[command(long_about = "\
Combine a chaptered markdown book into a single document

Book structure:

  book/
  ├── book.toml                    # Optional overrides (see gen-config)
  ├── README.md                    # Overview; text before \"## 📖 สารบัญ\" is the introduction
  ├── chapters/
  │   ├── 01-introduction/
  │   │   └── README.md            # Missing chapters are skipped
  │   └── ...
  ├── GLOSSARY.md                  # Optional
  └── QUICK_REFERENCE.md           # Optional

Output goes to nextjs-book-combined.md in the book root and is overwritten
on every run. Page breaks are written as \\newpage for pandoc.

Run 'book-combiner gen-config' to print a documented book.toml.")]
#[command(version)]
struct Cli {
    /// Book root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Write the combined document (default)
    Combine,
    /// Report which sources would be included, without writing
    Check,
    /// Print a stock book.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command.unwrap_or(Command::Combine) {
        Command::Combine => {
            let book_config = config::load_config(&cli.root)?;
            let report = assemble::assemble(&cli.root, &book_config)?;
            output::print_combine_output(&report);
        }
        Command::Check => {
            let book_config = config::load_config(&cli.root)?;
            println!("==> Checking {}", cli.root.display());
            let report = assemble::check(&cli.root, &book_config);
            output::print_check_output(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Diagnostics go to stderr so stdout carries only the report.
///
/// `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match verbose {
        0 => "book_combiner=info",
        1 => "book_combiner=debug",
        _ => "book_combiner=trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
