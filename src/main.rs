//! label-verify - check label images for the required regulatory fields
//!
//! Runs the field verification engine over one submission and prints the
//! per-field result. Exits with status 0 only when every field is verified.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use label_verify::config;
use label_verify::{
    create_detector, verify_submission, ExpectedFields, Field, NetContentsUnit, OcrBackend,
    ValidationReport,
};

/// label-verify - alcohol beverage label verification
#[derive(Parser, Debug)]
#[command(name = "label-verify")]
#[command(about = "Verify that label images carry the required regulatory fields")]
struct Args {
    /// Expected brand name
    #[arg(long)]
    brand: String,

    /// Expected product class (e.g. "Kentucky Straight Bourbon Whiskey")
    #[arg(long = "class")]
    product_class: String,

    /// Expected alcohol percentage (e.g. "40" or "12.5")
    #[arg(long = "abv")]
    alcohol_content: String,

    /// Expected net contents amount (e.g. "750")
    #[arg(long = "net")]
    net_contents: String,

    /// Net contents unit: L, ml or "fl oz"
    #[arg(long = "unit", default_value = "ml")]
    net_contents_unit: String,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured OCR backend
    #[arg(long)]
    backend: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Label images, front first
    #[arg(required = true)]
    images: Vec<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let mut config = config::load_or_default(args.config.as_deref())?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(backend) = &args.backend {
        config.ocr.backend = backend.parse::<OcrBackend>()?;
    }

    // Fail on backend problems before touching any image
    let detector = create_detector(&config.ocr)?;

    let images = args
        .images
        .iter()
        .map(|path| std::fs::read(path).with_context(|| format!("Failed to read image {:?}", path)))
        .collect::<Result<Vec<_>>>()?;

    let expected = ExpectedFields {
        brand_name: args.brand,
        product_class: args.product_class,
        alcohol_content: args.alcohol_content,
        net_contents: args.net_contents,
        net_contents_unit: NetContentsUnit::parse(&args.net_contents_unit),
    };

    let report = verify_submission(detector.as_ref(), expected, images, &config.limits)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    info!("Session {} complete", report.session_id);

    Ok(if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_report(report: &ValidationReport) {
    for field in Field::ALL {
        let state = report.field(field);
        let mark = if state.verified { "found" } else { "MISSING" };
        println!("  {:<16} {:<8} {} box(es)", field.as_str(), mark, state.evidence.len());
    }
    println!(
        "{} ({} image(s) processed)",
        if report.success { "VERIFIED" } else { "NOT VERIFIED" },
        report.images_processed
    );
}
