use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use gate_schematic::config::RenderConfig;
use gate_schematic::graph::{Analysis, Analyzed};
use gate_schematic::netlist::Netlist;
use gate_schematic::svg::SvgSurface;

#[derive(Parser)]
#[command(
    name = "schematic",
    about = "Rail-and-tap schematics for gate-level netlists"
)]
struct Cli {
    /// Print debug output while laying out
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// A standalone SVG document
    Svg,
    /// The scene primitives as JSON
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Lay out a netlist and write it as SVG or scene JSON.
    Render {
        /// Netlist JSON file, a bare gate array or a simulator envelope.
        netlist: PathBuf,
        /// Output file. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Render config JSON file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Svg)]
        format: Format,
    },
    /// Print the logic depth of every wire.
    Depths {
        /// Netlist JSON file.
        netlist: PathBuf,
    },
}

fn read_netlist(path: &Path) -> Result<Netlist, Box<dyn std::error::Error>> {
    let file = fs::File::open(path)?;
    let netlist = Netlist::from_reader(std::io::BufReader::new(file))?;
    clilog::info!("read {} gates from {}", netlist.len(), path.display());
    Ok(netlist)
}

fn render(
    netlist: &Path,
    output: Option<&Path>,
    config: Option<&Path>,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let netlist = read_netlist(netlist)?;
    let config = match config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };

    let scene = gate_schematic::layout(&netlist, &config)?;
    let text = match format {
        Format::Svg => {
            let mut surface = SvgSurface::new(&config.background);
            scene.paint(&mut surface);
            surface.finish()
        }
        Format::Json => scene.to_json()?,
    };

    match output {
        Some(path) => {
            fs::write(path, text)?;
            clilog::info!("wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn depths(netlist: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let netlist = read_netlist(netlist)?;
    let analyzed = Analyzed::build(&netlist)?;
    for wire in analyzed.wires() {
        println!("{wire}\t{}\t{:?}", analyzed.depth_of(wire), analyzed.classify(wire));
    }
    println!("max depth: {}", analyzed.get_max_depth());
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    clilog::init_stderr_color_debug();
    log::set_max_level(if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });

    let result = match cli.command {
        Command::Render {
            netlist,
            output,
            config,
            format,
        } => render(&netlist, output.as_deref(), config.as_deref(), format),
        Command::Depths { netlist } => depths(&netlist),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
