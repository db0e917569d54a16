use clap::{Parser, Subcommand};
use simple_border::imaging::BorderError;
use simple_border::pipeline::{self, RunContext};
use simple_border::{config, naming, output, preview};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Input file plus the border size to apply.
#[derive(clap::Args, Clone)]
struct ImageArgs {
    /// Image to add a border to (jpg, jpeg or png)
    input: PathBuf,

    /// Border size as % of the longest dimension (1-20) [default: from config, else 5]
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=20))]
    percent: Option<u32>,
}

#[derive(Parser)]
#[command(name = "simple-border")]
#[command(about = "Add white borders to your images with custom sizing")]
#[command(long_about = "\
Add white borders to your images with custom sizing

The border is a percentage of the image's longest dimension, applied
evenly on all four sides. The result keeps the original format:

  JPEG  → JPEG at quality 95, EXIF (capture date, orientation) preserved
  PNG   → PNG, text metadata preserved

Output is written next to the input as <name>_bordered.<ext>.

Run 'simple-border gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a border and write the bordered image
    Add {
        #[command(flatten)]
        image: ImageArgs,

        /// Directory to write the bordered image to [default: next to the input]
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Write a side-by-side HTML preview of the original and bordered image
    Preview {
        #[command(flatten)]
        image: ImageArgs,

        /// Preview file to write [default: <name>_preview.html next to the input]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show size, format, metadata and the border a run would add
    Inspect {
        #[command(flatten)]
        image: ImageArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run_cli(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(border_err) = e.downcast_ref::<BorderError>() {
                eprintln!("{}", output::format_error(border_err));
            } else if e.is::<config::ConfigError>() {
                eprintln!("error (config): {e}");
            } else {
                eprintln!("error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Add { image, output_dir } => {
            let tool_config = config::load_config(&cli.config)?;
            let upload = Upload::read(&image.input)?;
            let ctx = upload.context(image.percent, &tool_config);
            let result = pipeline::run(&ctx, &tool_config.encode_settings())?;

            let dir = output_dir.unwrap_or_else(|| parent_dir(&image.input));
            std::fs::create_dir_all(&dir).map_err(BorderError::Io)?;
            let out_path = dir.join(&result.artifact.file_name);
            std::fs::write(&out_path, &result.artifact.bytes).map_err(BorderError::Io)?;
            output::print_run_output(&upload.name, &result, &out_path);
        }
        Command::Preview { image, output } => {
            let tool_config = config::load_config(&cli.config)?;
            let upload = Upload::read(&image.input)?;
            let ctx = upload.context(image.percent, &tool_config);
            let result = pipeline::run(&ctx, &tool_config.encode_settings())?;

            let out_path = output.unwrap_or_else(|| {
                parent_dir(&image.input).join(naming::preview_filename(&upload.name))
            });
            let html = preview::render_preview(&ctx, &result).into_string();
            std::fs::write(&out_path, html).map_err(BorderError::Io)?;
            println!("==> Preview: {}", out_path.display());
        }
        Command::Inspect { image, json } => {
            let tool_config = config::load_config(&cli.config)?;
            let upload = Upload::read(&image.input)?;
            let report = pipeline::inspect(&upload.context(image.percent, &tool_config))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_inspection(&report);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// An input file read into memory under its bare file name.
struct Upload {
    name: String,
    bytes: Vec<u8>,
}

impl Upload {
    fn read(path: &Path) -> Result<Self, BorderError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = std::fs::read(path)?;
        log::debug!("read {} ({} bytes)", path.display(), bytes.len());
        Ok(Self { name, bytes })
    }

    /// Run context for this upload; `--percent` wins over the configured default.
    fn context(&self, percent: Option<u32>, tool_config: &config::ToolConfig) -> RunContext<'_> {
        RunContext {
            file_name: &self.name,
            bytes: &self.bytes,
            percentage: percent.unwrap_or(tool_config.border.percentage),
        }
    }
}

/// Directory an input file lives in (`.` for bare file names).
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
