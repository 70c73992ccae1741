use std::io::Read;
use std::path::PathBuf;
use std::{fs, process, str::FromStr};

use clap::{Parser, ValueEnum};
use log::{LevelFilter, debug, error, info};

use sqlerd::OutputFormat;
use sqlerd::config::{self, AppConfig};
use sqlerd::error::Error;
use sqlerd::script;

#[derive(Parser, Debug)]
#[command(name = "sqlerd", about = "Draw CREATE TABLE statements as an entity-relationship diagram")]
struct Cli {
    /// DDL file (reads from stdin if not provided)
    file: Option<PathBuf>,

    /// Event script to replay on the generated diagram
    #[arg(long, short = 's')]
    script: Option<PathBuf>,

    /// Output file (writes to stdout if not provided)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = Format::Svg)]
    format: Format,

    /// Path to configuration file (TOML)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<f64>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<f64>,

    /// Accept every delete in the script
    #[arg(long)]
    yes: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Svg,
    Text,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Svg => OutputFormat::Svg,
            Format::Text => OutputFormat::Text,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", cli.log_level);
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();
    debug!(cli:?; "Parsed arguments");

    if let Err(e) = run(&cli) {
        error!("{e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let mut app_config = config::load_config(cli.config.as_deref())?;
    apply_overrides(&mut app_config, cli);

    let ddl = match &cli.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let events = match &cli.script {
        Some(path) => script::parse_script(&fs::read_to_string(path)?)?,
        None => Vec::new(),
    };

    let mut confirm = cli.yes || app_config.interaction.confirm_deletes;
    let output = sqlerd::render_session(&ddl, &events, &mut confirm, cli.format.into(), &app_config);

    match &cli.output {
        Some(path) => {
            fs::write(path, output)?;
            info!(output_file = path.display().to_string(); "Diagram written");
        }
        None => println!("{output}"),
    }
    Ok(())
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(width) = cli.width {
        config.canvas.width = width;
    }
    if let Some(height) = cli.height {
        config.canvas.height = height;
    }
}
