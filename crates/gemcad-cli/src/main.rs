//! gemcad CLI - inspect and convert GemCad design files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gemcad::{identify, DesignDocument, DesignFormat};

#[derive(Parser)]
#[command(name = "gemcad")]
#[command(about = "Inspect and convert GemCad faceting designs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display a summary of a design file
    Info {
        /// Path to a .asc or .gem file
        file: PathBuf,
    },
    /// Decode a design file to JSON
    Convert {
        /// Input .asc or .gem file
        input: PathBuf,
        /// Output JSON file (stdout when omitted)
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { file } => show_info(&file),
        Commands::Convert { input, output } => convert(&input, output.as_deref()),
    }
}

fn load(path: &Path) -> Result<DesignDocument> {
    gemcad::import_path(path).with_context(|| format!("failed to decode {}", path.display()))
}

fn show_info(path: &Path) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let format = identify(&bytes)?;
    let document = gemcad::import_bytes(&bytes)?;

    let label = match format {
        DesignFormat::Text => "text (.asc)",
        DesignFormat::Binary => "binary (.gem)",
    };
    println!("{}: {}", path.display(), label);
    for line in &document.metadata.headers {
        println!("  {}", line);
    }
    println!(
        "gear {} at {}, {} fold(s){}, refractive index {}",
        document.metadata.gear,
        document.metadata.gear_location_angle,
        document.metadata.symmetry_folds,
        if document.metadata.symmetry_mirror {
            ", mirrored"
        } else {
            ""
        },
        document.metadata.refractive_index
    );
    println!("{} tier(s):", document.tiers.len());
    for tier in &document.tiers {
        println!(
            "  {:>3}{}  angle {:>8.3}  distance {:>8.3}  {} facet(s)",
            tier.number,
            if tier.is_preform { "p" } else { " " },
            tier.angle,
            tier.distance,
            tier.indices.len()
        );
    }
    for line in &document.metadata.footnotes {
        println!("  {}", line);
    }
    Ok(())
}

fn convert(input: &Path, output: Option<&Path>) -> Result<()> {
    let document = load(input)?;
    let json = document.to_json().context("failed to serialize document")?;
    match output {
        Some(path) => {
            fs::write(path, &json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
