//! Command-line converter from multi-block PLOT3D grids (plus a Neutral Map
//! File describing boundary patches) to Gmsh MSH 2.2 meshes.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use p3d2gmsh::{
    assemble, read_nmf, read_plot3d_ascii, read_plot3d_binary, write_msh, BinaryFormat, Endian,
    FloatPrecision, MeshResult, MeshSummary,
};

/// Convert PLOT3D meshes into Gmsh meshes
#[derive(Parser)]
#[command(name = "p3d2gmsh")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert PLOT3D meshes into Gmsh meshes", long_about = None)]
struct Cli {
    /// Grid files to convert
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Neutral Map File; defaults to the input path with extension `nmf`
    #[arg(short, long)]
    map_file: Option<PathBuf>,

    /// Output file; defaults to the input path with extension `msh`
    #[arg(short, long)]
    output_file: Option<PathBuf>,

    /// Read the grid as binary instead of ASCII
    #[arg(long)]
    binary: bool,

    /// Binary record layout
    #[arg(long, value_enum, default_value_t = FormatArg::Fortran)]
    format: FormatArg,

    /// Binary float width
    #[arg(long, value_enum, default_value_t = PrecisionArg::F64)]
    precision: PrecisionArg,

    /// Binary byte order
    #[arg(long, value_enum, default_value_t = EndianArg::Little)]
    endian: EndianArg,

    /// Write a JSON conversion summary to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FormatArg {
    Raw,
    Fortran,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PrecisionArg {
    F32,
    F64,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum EndianArg {
    Little,
    Big,
}

impl From<FormatArg> for BinaryFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Raw => BinaryFormat::Raw,
            FormatArg::Fortran => BinaryFormat::Fortran,
        }
    }
}

impl From<PrecisionArg> for FloatPrecision {
    fn from(arg: PrecisionArg) -> Self {
        match arg {
            PrecisionArg::F32 => FloatPrecision::F32,
            PrecisionArg::F64 => FloatPrecision::F64,
        }
    }
}

impl From<EndianArg> for Endian {
    fn from(arg: EndianArg) -> Self {
        match arg {
            EndianArg::Little => Endian::Little,
            EndianArg::Big => Endian::Big,
        }
    }
}

#[derive(Serialize)]
struct ReportEntry {
    file: String,
    output: String,
    summary: MeshSummary,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut report = Vec::new();
    for file in &cli.files {
        if !file.exists() {
            warn!("can't open {}, skipping", file.display());
            continue;
        }
        let out_path = cli
            .output_file
            .clone()
            .unwrap_or_else(|| file.with_extension("msh"));
        let summary = convert(file, &out_path, &cli)
            .with_context(|| format!("converting {}", file.display()))?;
        report.push(ReportEntry {
            file: file.display().to_string(),
            output: out_path.display().to_string(),
            summary,
        });
    }

    if let Some(path) = &cli.report {
        let w = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(w, &report)?;
        info!("report written to {}", path.display());
    }
    Ok(())
}

fn convert(file: &Path, out_path: &Path, cli: &Cli) -> MeshResult<MeshSummary> {
    let map_path = cli
        .map_file
        .clone()
        .unwrap_or_else(|| file.with_extension("nmf"));

    let blocks = if cli.binary {
        read_plot3d_binary(
            file,
            cli.format.into(),
            cli.precision.into(),
            cli.endian.into(),
        )?
    } else {
        read_plot3d_ascii(file)?
    };
    info!("{}: {} block(s)", file.display(), blocks.len());

    let records = read_nmf(&map_path)?;
    info!(
        "{}: {} boundary record(s)",
        map_path.display(),
        records.len()
    );

    let mesh = assemble(&blocks, &records)?;
    write_msh(out_path, &mesh)?;

    let summary = mesh.summary();
    info!(
        "wrote {}: {} nodes, {} hexahedra, {} quadrilaterals, {} groups",
        out_path.display(),
        summary.nodes,
        summary.hexahedra,
        summary.quadrilaterals,
        summary.groups
    );
    Ok(summary)
}
