use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use log::{debug, info};

use nextmd_converter::config::{Config, DEFAULT_CONFIG_FILE};
use nextmd_converter::files::ConversionDirection;
use nextmd_converter::{ConversionError, convert_file};

#[derive(Parser)]
#[command(name = "nextmd")]
#[command(about = "Convert between Markdown and HTML", version)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Host override
    #[arg(long, global = true)]
    host: Option<String>,

    /// Port override
    #[arg(long, global = true, allow_hyphen_values = true)]
    port: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a file, picking the direction from the extensions
    Convert {
        /// Input file (.md, .markdown, .html, .htm)
        input: PathBuf,
        /// Output file (.html, .htm, .md, .markdown)
        output: PathBuf,
    },
    /// Convert HTML from a file or stdin to Markdown on stdout
    Html2md {
        /// Input file, stdin when omitted
        file: Option<PathBuf>,
    },
    /// Convert Markdown from a file or stdin to HTML on stdout
    Md2html {
        /// Input file, stdin when omitted
        file: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config {
        /// Also write it to the configuration file
        #[arg(long)]
        save: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let _ = {
        use log::LevelFilter::*;

        let level = if cli.verbose { Debug } else { Info };
        env_logger::builder()
            .filter_module("nextmd", level)
            .filter_module("nextmd_converter", level)
            .parse_default_env()
            .try_init()
    };

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        process::exit(i32::try_from(err.code()).unwrap_or(1));
    }
}

fn run(cli: Cli) -> Result<(), ConversionError> {
    let mut config = Config::load(&cli.config);
    config.apply_env();
    config.apply_overrides(cli.host.as_deref(), cli.port.as_deref());
    let config = config.validated();
    debug!("starting {} v{}", config.app_name, config.app_version);

    match cli.command {
        Commands::Convert { input, output } => convert_file(&input, &output),
        Commands::Html2md { file } => {
            let input = read_input(file.as_ref())?;
            println!("{}", ConversionDirection::HtmlToMarkdown.convert_bytes(&input)?);
            Ok(())
        }
        Commands::Md2html { file } => {
            let input = read_input(file.as_ref())?;
            println!("{}", ConversionDirection::MarkdownToHtml.convert_bytes(&input)?);
            Ok(())
        }
        Commands::Config { save } => {
            println!("{}", config);
            if save {
                config.save(&cli.config)?;
            } else {
                info!("deployment url: {}", config.deployment_url());
            }
            Ok(())
        }
    }
}

fn read_input(file: Option<&PathBuf>) -> Result<Vec<u8>, ConversionError> {
    match file {
        Some(path) => fs::read(path)
            .map_err(|e| ConversionError::Io(format!("failed to read {}: {}", path.display(), e))),
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}
