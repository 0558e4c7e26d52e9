use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use tube_scout::config::{Config, ExportFormat};
use tube_scout::report::render_report;
use tube_scout::{export_run, ScoutPipeline};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let matches = Command::new("tube-scout")
        .version(env!("CARGO_PKG_VERSION"))
        .author("TigreRoll")
        .about("Find and rank educational videos for a topic")
        .arg(
            Arg::new("topic")
                .value_name("TOPIC")
                .help("Topic to search for (prompted if omitted)")
                .num_args(1..)
        )
        .arg(
            Arg::new("max-results")
                .short('n')
                .long("max-results")
                .value_name("NUM")
                .help("Number of videos to fetch")
                .value_parser(clap::value_parser!(u32))
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .value_name("DIR")
                .help("Directory for exported files")
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file")
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Export format (csv, markdown, json); repeatable")
                .action(ArgAction::Append)
                .value_parser(["csv", "markdown", "md", "json"])
        )
        .arg(
            Arg::new("no-export")
                .long("no-export")
                .help("Only print the report")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("fixture")
                .long("fixture")
                .value_name("FILE")
                .help("Serve videos from a saved videos.list JSON response instead of the API")
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(ArgAction::SetTrue)
        )
        .get_matches();

    let config_path = match matches.get_one::<String>("config") {
        Some(path) => Some(PathBuf::from(path)),
        None => Config::find_config_file(Path::new(".")),
    };
    let mut config = match &config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::from_env()?,
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(config.output.log_filter(matches.get_flag("verbose")))
        .with_writer(io::stderr)
        .init();

    match &config_path {
        Some(path) => info!("📄 Loaded configuration from: {}", path.display()),
        None => info!("📄 No config file found, using defaults and environment"),
    }

    if let Some(max_results) = matches.get_one::<u32>("max-results") {
        config.youtube.max_results = *max_results;
    }
    if let Some(output_dir) = matches.get_one::<String>("output-dir") {
        config.output.base_dir = PathBuf::from(output_dir);
    }
    if let Some(formats) = matches.get_many::<String>("format") {
        config.output.export_formats = formats
            .map(|name| ExportFormat::parse(name))
            .collect::<Result<Vec<_>>>()?;
    }
    if let Some(fixture) = matches.get_one::<String>("fixture") {
        config.youtube.provider = tube_scout::ProviderType::Fixture;
        config.youtube.fixture_path = Some(PathBuf::from(fixture));
    }

    config.validate()?;
    info!("{}", config.summary());

    let topic = match matches.get_many::<String>("topic") {
        Some(words) => words.cloned().collect::<Vec<_>>().join(" "),
        None => prompt_topic()?,
    };
    if topic.trim().is_empty() {
        anyhow::bail!("A topic is required");
    }

    let pipeline = ScoutPipeline::from_config(&config)?;
    let run = pipeline.run(topic.trim()).await?;

    print!("{}", render_report(&run, &config.display));

    if run.is_empty() {
        warn!("Nothing to export");
    } else if !matches.get_flag("no-export") {
        for path in export_run(&run, &config.output.base_dir, &config.output.export_formats)? {
            println!("📁 Saved {}", path.display());
        }
    }

    Ok(())
}

fn prompt_topic() -> Result<String> {
    print!("Enter topic to search on YouTube: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
