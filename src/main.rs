use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use transtree::io::read_edge_table_file;
use transtree::model::SeedPolicy;
use transtree::newick::{NewickStyle, write_newick_file};
use transtree::{TransmissionError, TransmissionTreeBuilder};

/// Builds a transmission tree from an edge table and writes it as Newick.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "transtree", version)]
struct Args {
    /// Edge table with header `Parent,Child,Origin_time`
    edge_table: PathBuf,

    /// Omit branch lengths
    #[arg(long)]
    topology: bool,

    /// Write the tree to this file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
}

impl Args {
    fn style(&self) -> NewickStyle {
        if self.topology {
            NewickStyle::Topology
        } else {
            NewickStyle::WithBranchLengths
        }
    }
}

fn run(args: &Args) -> Result<(), TransmissionError> {
    let edges = read_edge_table_file(&args.edge_table, SeedPolicy::Skip)?;
    log::info!("Read {} edges from {}", edges.len(), args.edge_table.display());

    let builder = TransmissionTreeBuilder::new().with_style(args.style());
    match &args.out {
        Some(path) => {
            let forest = builder.build(&edges)?;
            write_newick_file(path, &[forest], builder.style())?;
            log::info!("Wrote tree to {}", path.display());
        }
        None => println!("{}", builder.to_newick(&edges)?),
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
