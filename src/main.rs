use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use bio_converter_rs::biometric_pipeline::{
    ConverterConfig, IsoToImagePipeline, PngCompression, RequestEnvelope, ResponseEnvelope,
};
use bio_converter_rs::logger;

/// Convert ISO 19794 finger, face and iris records to JPEG or PNG.
#[derive(Parser, Debug)]
#[command(name = "bio-converter", version)]
struct Cli {
    /// Request envelope JSON file, `-` for stdin
    request: PathBuf,

    /// Where to write the response envelope (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, default_value_t = 75, value_parser = clap::value_parser!(u8).range(1..=100))]
    jpeg_quality: u8,

    /// default, fast or best
    #[arg(long, default_value_t = PngCompression::Default)]
    png_compression: PngCompression,

    /// Reject decoded images wider or taller than this
    #[arg(long, default_value_t = 20_000)]
    max_dimension: u32,

    /// Debug logging unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> ConverterConfig {
        ConverterConfig::builder()
            .jpeg_quality(self.jpeg_quality)
            .png_compression(self.png_compression)
            .max_dimension(Some(self.max_dimension))
            .build()
    }
}

fn read_request(path: &Path) -> anyhow::Result<RequestEnvelope> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading request from stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading request {}", path.display()))?
    };
    serde_json::from_str(&text).context("parsing request envelope")
}

fn write_response(response: &ResponseEnvelope, output: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(response).context("serializing response")?;
    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("writing response {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("writing response to stdout")?;
        }
    }
    Ok(())
}

fn run(cli: &Cli) -> anyhow::Result<ResponseEnvelope> {
    let envelope = read_request(&cli.request)?;
    let pipeline = IsoToImagePipeline::new(cli.config());

    info!(
        jpeg_quality = pipeline.config().jpeg_quality,
        png_compression = %pipeline.config().png_compression,
        "ISO to image pipeline initialized"
    );

    let request = envelope.request.clone().unwrap_or_default();
    let result = pipeline.convert_request(&request);
    if let Err(e) = &result {
        error!(code = e.code(), "Conversion failed: {}", e);
    }

    let response = ResponseEnvelope::from_result(&envelope, result);
    write_response(&response, cli.output.as_deref())?;
    Ok(response)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let response = run(&cli)?;
    Ok(if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
