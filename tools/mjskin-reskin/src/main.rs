//! mjskin-reskin - MuJoCo skin reskinning tool
//!
//! Moves bone weights and texcoords from an existing .skn onto new geometry
//! from an OBJ file.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use mjskin_reskin::{AxisConvention, ReskinOptions, reskin_files};

#[derive(Parser)]
#[command(name = "mjskin-reskin")]
#[command(about = "Transfer a MuJoCo skin onto new mesh geometry")]
#[command(version)]
struct Cli {
    /// Existing .skn file providing bones, weights and texcoords
    skin: PathBuf,

    /// OBJ file providing the new vertices and faces
    mesh: PathBuf,

    /// Output .skn file
    output: PathBuf,

    /// Axis convention of the OBJ exporter
    #[arg(long, value_enum, default_value_t = AxisConvention::Blender)]
    axes: AxisConvention,

    /// Only use faces from this OBJ object or group
    #[arg(long)]
    object: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    // RUST_LOG wins over the default level
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let options = ReskinOptions {
        axes: cli.axes,
        object: cli.object,
    };
    reskin_files(&cli.skin, &cli.mesh, &cli.output, &options)?;

    tracing::info!("Done!");
    Ok(())
}
