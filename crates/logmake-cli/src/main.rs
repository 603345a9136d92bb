use clap::Parser;
use logmake_build::{generate_cmake, scan_log, write_cmake, GeneratorConfig};
use miette::{IntoDiagnostic, Result};
use std::env;
use std::path::PathBuf;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "logmake")]
#[command(author, version, about = "Generate CMakeLists.txt from build logs")]
struct Cli {
    /// Path to the build log file to parse
    #[arg(long)]
    log: PathBuf,

    /// Output path for the generated CMakeLists.txt file
    #[arg(short, long, default_value = "CMakeLists.txt")]
    output: PathBuf,

    /// Generator configuration file (logmake.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project name, overriding the configuration file
    #[arg(long)]
    project: Option<String>,

    /// Executable target name, overriding the configuration file
    #[arg(long)]
    target: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long)]
    log_level: Option<String>,

    /// Show debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
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
    }))?;

    let cli = Cli::parse();
    init_logging(&cli);
    debug!("Arguments: {:?}", cli);

    run(&cli)
}

/// Scan the log and write the generated document.
///
/// Nothing is written unless the log was read successfully.
fn run(cli: &Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::from_file(path).into_diagnostic()?,
        None => GeneratorConfig::default(),
    };
    if let Some(project) = &cli.project {
        config = config.with_project_name(project);
    }
    if let Some(target) = &cli.target {
        config = config.with_target(target);
    }

    println!("Parsing build log: {}", cli.log.display());
    let record = scan_log(&cli.log).into_diagnostic()?;

    let stats = record.stats();
    info!(
        lines = stats.lines_read,
        gnu = stats.gnu_lines,
        msvc = stats.msvc_lines,
        skipped = stats.skipped_lines,
        "scanned build log"
    );
    if stats.recognized_lines() == 0 {
        warn!("no g++ or cl invocations found in {}", cli.log.display());
    }

    println!("Generating CMakeLists.txt content...");
    let content = generate_cmake(&record, &config);

    write_cmake(&cli.output, &content).into_diagnostic()?;
    println!("CMakeLists.txt generated successfully at: {}", cli.output.display());

    Ok(())
}

fn init_logging(cli: &Cli) {
    let level = if let Some(level_str) = &cli.log_level {
        parse_level(level_str)
    } else if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        let level_str = env::var("LOGMAKE_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());
        parse_level(&level_str)
    };

    let mut filter = EnvFilter::from_default_env();
    if env::var("RUST_LOG").is_err() {
        for krate in ["logmake", "logmake_build"] {
            if let Ok(directive) = format!("{}={}", krate, level).parse() {
                filter = filter.add_directive(directive);
            }
        }
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to WARN. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::WARN
        }
    }
}
