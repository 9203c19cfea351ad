use std::{fs, io, path::PathBuf};

use anyhow::{Context, Result};
use bravais::{
    markup::{Ascii, Unicode},
    parsing::parse_onto,
    render, LatticeParameters, PlotOptions, TableSink,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "bravais")]
#[command(version, about = "Classify a 2D Bravais lattice and list its points")]
struct Cli {
    /// Lattice parameters, e.g. "a=2 b=1 angle=90deg centered n=25". Applied on top of --config.
    params: Option<String>,

    /// JSON file with parameters; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only print ASCII
    #[arg(long)]
    ascii: bool,

    /// Leave |a|, |b| and the angle out of the title
    #[arg(long)]
    no_params: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<LatticeParameters>(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => LatticeParameters::default(),
    };
    let params = match &cli.params {
        Some(s) => parse_onto(base, s)?,
        None => base,
    };
    info!(?params, "lattice parameters");

    let lattice = params.validate()?;
    let options = PlotOptions {
        show_parameters: !cli.no_params,
        ..Default::default()
    };

    let mut sink = TableSink::new(io::stdout().lock());
    if cli.ascii {
        render::<Ascii, _>(&lattice, &mut sink, options)?;
    } else {
        render::<Unicode, _>(&lattice, &mut sink, options)?;
    }

    Ok(())
}
