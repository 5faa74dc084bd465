use clap::{Parser, ValueEnum};
use responsive_images::config::{self, DEFAULT_CONFIG_FILE};
use responsive_images::imaging::RustBackend;
use responsive_images::output;
use responsive_images::process::{self, RunMode, RunOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug)]
enum ModeArg {
    /// Delete all resized images, create nothing
    Remove,
    /// Delete all resized images, then create them again
    Recreate,
}

#[derive(Parser)]
#[command(name = "responsive-images")]
#[command(about = "Generate resized image variants for responsive websites")]
#[command(long_about = "\
Generate resized image variants for responsive websites

Every image in a collection's source directory gets one resized copy per
configured size, written next to the original:

  img/slides/
  ├── lonely-cat.jpg               # Original
  ├── lonely-cat-1110x547.jpg      # width = 1110, height = 547
  ├── lonely-cat-w510.jpg          # width only
  └── lonely-cat-h400.jpg          # height only

Existing variants are skipped, so the command can be re-run at any time.
Files with a size suffix are never resized again.

Supported formats: JPEG, PNG, GIF, BMP, WebP (SVG is recognised but not
resized).

Run 'responsive-images --gen-config' to generate a documented images.toml.")]
#[command(version)]
struct Cli {
    /// `remove` deletes resized images; `recreate` deletes and regenerates them
    #[arg(value_enum)]
    modes: Vec<ModeArg>,

    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Validate the configuration and classify files without writing anything
    #[arg(long)]
    check: bool,

    /// Print a stock images.toml with all options documented
    #[arg(long)]
    gen_config: bool,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn mode(&self) -> RunMode {
        if self.check {
            return RunMode::Check;
        }
        RunMode::from_tokens(
            self.modes.contains(&ModeArg::Remove),
            self.modes.contains(&ModeArg::Recreate),
        )
    }
}

fn main() -> ExitCode {
    let started = Instant::now();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli, started) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, started: Instant) -> Result<(), Box<dyn std::error::Error>> {
    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = config::load_config(&cli.config)?;
    let options = RunOptions {
        mode: cli.mode(),
        base_dir: std::env::current_dir()?,
        started,
    };
    tracing::debug!(config = %cli.config.display(), mode = ?options.mode, "starting");

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_process_event(&event);
        }
    });
    let summary = process::run(&config, &options, &RustBackend::new(), Some(tx));
    printer.join().map_err(|_| "output thread panicked")?;

    output::print_summary(&summary);
    summary.ensure_progress()?;
    Ok(())
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` for this crate with `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "warn,responsive_images=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
