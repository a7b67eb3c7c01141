use clap::{Args, Parser, Subcommand, ValueEnum};
use orgchart::cache::{JsonFileCache, fetch_with_cache};
use orgchart::source::{DataSource, TsvSource};
use orgchart::{Record, ValidatedConfig, config, diagnostics, hierarchy, render};
use std::path::PathBuf;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "orgchart")]
#[command(about = "Classify a name/role directory into groups and emit a Graphviz org chart", long_about = None)]
struct Cli {
    /// Debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args)]
struct Input {
    /// YAML config with groups, subgroups and group order.
    #[arg(long)]
    config: PathBuf,

    /// Tab-separated `name<TAB>role` records file.
    #[arg(long)]
    records: PathBuf,

    /// Cache the records read from `--records` in this JSON file (valid one day).
    #[arg(long)]
    cache: Option<PathBuf>,

    /// Ignore an existing cache and re-read the records.
    #[arg(long, requires = "cache")]
    refresh_cache: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Dot,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit the org chart (validates config and classification first).
    Render {
        #[command(flatten)]
        input: Input,

        /// Output file; stdout when omitted.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "dot")]
        format: Format,
    },

    /// Classify only and print the resulting hierarchy.
    Check {
        #[command(flatten)]
        input: Input,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    diagnostics::init_logging(cli.verbose, cli.quiet);

    match cli.cmd {
        Commands::Render { input, out, format } => {
            let (cfg, records) = load_inputs(&input)?;

            // 3) Classify + emit. Any error stops here, before anything is written.
            let doc = orgchart::chart(&records, &cfg)?;
            let text = match format {
                Format::Dot => render::render_dot(&doc),
                Format::Json => serde_json::to_string_pretty(&doc)? + "\n",
            };

            // 4) Write.
            write_output(out.as_ref(), &text)?;
        }
        Commands::Check { input } => {
            let (cfg, records) = load_inputs(&input)?;
            let hierarchy = hierarchy::build(&records, &cfg)?;
            print!(
                "{}",
                render::render_tree(&hierarchy, &cfg.root_label, &cfg.group_order)
            );
        }
    }

    Ok(())
}

fn load_inputs(input: &Input) -> Result<(ValidatedConfig, Vec<Record>)> {
    // 1) Parse + validate config.
    let cfg = config::load_config(&input.config)?;

    // 2) Read records, through the cache when one is configured.
    let source = TsvSource::new(&input.records);
    let records = match &input.cache {
        Some(path) => {
            let cache = JsonFileCache::new(path).with_refresh(input.refresh_cache);
            fetch_with_cache(&cache, &source)?
        }
        None => source.fetch()?,
    };

    Ok((cfg, records))
}

fn write_output(out: Option<&PathBuf>, text: &str) -> Result<()> {
    use anyhow::Context;

    match out {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
            tracing::info!("wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

