use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use climograph::{ChartConfig, ChartData, Diagram, DrawSpaceSize, storage};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "climograph",
    version,
    about = "Compute Walter-Lieth climate diagram geometry"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the diagram geometry and write it as JSON.
    Build(BuildArgs),
    /// Write the built-in example data as a CSV template.
    Template(TemplateArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum InFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Monthly data (.csv or .json). Defaults to the built-in example.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Input format. If omitted, inferred from the --input extension.
    #[arg(long, value_enum)]
    format: Option<InFormat>,
    /// Write the diagram JSON here instead of stdout.
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Width of the chart area (default 400).
    #[arg(long, default_value_t = 400.0)]
    width: f64,
    /// Height of the chart area (default 600).
    #[arg(long, default_value_t = 600.0)]
    height: f64,
    /// Skip intervals that stay humid or dry throughout.
    #[arg(long, default_value_t = false)]
    no_full: bool,
    /// Skip intervals where the curves cross.
    #[arg(long, default_value_t = false)]
    no_partial: bool,
    /// Station name for the location label.
    #[arg(long)]
    location: Option<String>,
    /// Station elevation in metres.
    #[arg(long)]
    elevation: Option<String>,
    /// Print mean temperature and total precipitation to stderr.
    #[arg(long, default_value_t = false)]
    summary: bool,
}

#[derive(Args, Debug)]
struct TemplateArgs {
    /// Write the CSV here instead of stdout.
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Build(args) => cmd_build(args),
        Command::Template(args) => cmd_template(args),
    }
}

fn load_data(path: &Path, format: Option<&InFormat>) -> Result<ChartData> {
    let fmt = match format {
        Some(InFormat::Csv) => "csv",
        Some(InFormat::Json) => "json",
        None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
    }
    .to_ascii_lowercase();
    match fmt.as_str() {
        "csv" => storage::load_csv(path, ChartData::default()),
        "json" => storage::load_json(path),
        other => anyhow::bail!("unsupported input format: {}", other),
    }
}

fn cmd_build(args: BuildArgs) -> Result<()> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !(valid(args.width) && valid(args.height)) {
        anyhow::bail!("--width and --height must be positive and finite");
    }

    let mut data = match args.input.as_ref() {
        Some(path) => load_data(path, args.format.as_ref())?,
        None => ChartData::default(),
    };
    if let Some(name) = args.location.as_deref() {
        data.set_location(name);
    }
    if let Some(elevation) = args.elevation.as_deref() {
        data.set_elevation(elevation)?;
    }

    let config = ChartConfig {
        size: DrawSpaceSize {
            width: args.width,
            height: args.height,
        },
        draw_full: !args.no_full,
        draw_partial: !args.no_partial,
    };
    let diagram = Diagram::rebuild(&data, &config);

    match args.out.as_ref() {
        Some(path) => {
            storage::save_json(&diagram, path)?;
            eprintln!("Wrote diagram to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &diagram)?;
            writeln!(stdout)?;
        }
    }

    if args.summary {
        let s = &diagram.summary;
        if let Some(location) = s.location_label.as_deref() {
            eprintln!("{location}");
        }
        eprintln!(
            "mean temperature={}  total precipitation={}  steps={} (lowest {})",
            s.temperature_label,
            s.precipitation_label,
            diagram.scale.num_steps,
            diagram.scale.lowest_step
        );
        eprintln!(
            "humid={} dry={} very_humid={} triangles",
            diagram.meshes.humid.triangle_count(),
            diagram.meshes.dry.triangle_count(),
            diagram.meshes.very_humid.triangle_count()
        );
    }

    Ok(())
}

fn cmd_template(args: TemplateArgs) -> Result<()> {
    let data = ChartData::default();
    match args.out.as_ref() {
        Some(path) => {
            storage::save_csv(&data, path)?;
            eprintln!("Wrote template to {}", path.display());
        }
        None => storage::write_csv(&data, std::io::stdout().lock())?,
    }
    Ok(())
}
