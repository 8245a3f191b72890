//! target-score CLI — score a photographed paper target from the shell.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use target_score::{analyze, AnalyzeConfig, ZoneTable};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "target-score")]
#[command(about = "Detect bullet holes in a paper-target photo and score them against a ring table")]
#[command(version)]
struct Cli {
    /// Path to the input photo (any format the image crate decodes).
    #[arg(long)]
    image: PathBuf,

    /// Path to write the annotated copy (PNG recommended).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Path to write the score summary as JSON.
    #[arg(long)]
    json: Option<PathBuf>,

    /// Ring table preset to score against.
    #[arg(long, value_enum, default_value_t = Preset::Aqt)]
    preset: Preset,

    /// JSON file with a full AnalyzeConfig, overriding the preset.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    /// Project Appleseed AQT 5/4/3 rings with edge breaking.
    Aqt,
    /// Legacy 11-band linear table, center position only.
    Linear,
}

fn build_config(cli: &Cli) -> CliResult<AnalyzeConfig> {
    if let Some(path) = &cli.config {
        let text = fs::read_to_string(path)?;
        return Ok(serde_json::from_str(&text)?);
    }
    let mut config = AnalyzeConfig::default();
    config.scoring.table = match cli.preset {
        Preset::Aqt => ZoneTable::appleseed_aqt(),
        Preset::Linear => ZoneTable::linear_bands(),
    };
    Ok(config)
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    target_score::core::init_with_level(level)?;

    let config = build_config(&cli)?;
    config.scoring.table.validate()?;

    let img = image::ImageReader::open(&cli.image)?.decode()?.to_rgb8();
    let result = analyze(&img, &config)?;

    for (i, (hole, score)) in result.holes.iter().zip(&result.scores).enumerate() {
        println!(
            "hole {:>2}: ({:7.1}, {:7.1}) r={:5.1}  -> {} pts",
            i, hole.center.x, hole.center.y, hole.radius, score
        );
    }
    println!("total: {} pts from {} holes", result.total_score, result.holes.len());

    if let Some(out) = &cli.out {
        result.annotated.save(out)?;
        println!("annotated image written to {}", out.display());
    }
    if let Some(json) = &cli.json {
        fs::write(json, serde_json::to_string_pretty(&result.summary())?)?;
        println!("summary written to {}", json.display());
    }
    Ok(())
}
