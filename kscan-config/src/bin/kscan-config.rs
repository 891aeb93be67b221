use clap::{Args, Parser, Subcommand};
use kscan_config::{boards::Board, simulate::Simulation, trace::read_trace};
use std::{io, path::PathBuf, process};

use anyhow::{anyhow, bail, Context, Result};

/// Check kscan board tables and replay matrix traces
#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the known boards
    Boards,
    /// Validate one or all board tables
    Check(CheckArgs),
    /// Print a board's scan, sense and select lines
    Show(ShowArgs),
    /// Run a raw sample trace through the debouncer
    Simulate(SimulateArgs),
}

#[derive(Args)]
struct CheckArgs {
    /// board name; all boards when omitted
    board: Option<String>,
}

#[derive(Args)]
struct ShowArgs {
    /// board name
    board: String,
}

#[derive(Args)]
struct SimulateArgs {
    /// scans of quiet required before a change is committed
    #[clap(long, short)]
    threshold: u8,
    /// number of scan lines; defaults to the widest cycle in the trace
    #[clap(long, short)]
    rows: Option<usize>,
    /// number of sense lines; defaults to the highest bit set in the trace
    #[clap(long, short)]
    cols: Option<usize>,
    /// print the state after every cycle
    #[clap(long, short)]
    verbose: bool,
    /// trace file, one cycle of raw samples per line
    file: PathBuf,
}

fn find_board(name: &str) -> Result<Board> {
    Board::find(name).ok_or_else(|| {
        let known: Vec<_> = Board::all().map(Board::name).collect();
        anyhow!("unknown board \"{name}\"; known boards: {}", known.join(", "))
    })
}

fn boards(out: &mut impl io::Write) -> Result<()> {
    for board in Board::all() {
        let (scan, sense) = board.shape();
        writeln!(out, "{:<24} {scan:2} scan x {sense:2} sense", board.name())?;
    }
    Ok(())
}

fn check(args: &CheckArgs, out: &mut impl io::Write) -> Result<()> {
    let boards = match &args.board {
        Some(name) => vec![find_board(name)?],
        None => Board::all().collect(),
    };

    let mut failed = 0;
    for board in boards {
        match board.validate() {
            Ok(()) => writeln!(out, "{}: ok", board.name())?,
            Err(err) => {
                log::warn!("{} failed validation: {err}", board.name());
                writeln!(out, "{}: {err}", board.name())?;
                failed += 1;
            }
        }
    }

    if failed != 0 {
        bail!("{failed} board(s) failed validation");
    }
    Ok(())
}

fn show(args: &ShowArgs, out: &mut impl io::Write) -> Result<()> {
    let board = find_board(&args.board)?;
    let (scan, sense) = board.shape();
    writeln!(out, "{}: {scan} scan x {sense} sense", board.name())?;
    write!(out, "{}", board.describe())?;
    Ok(())
}

fn simulate(args: &SimulateArgs, out: &mut impl io::Write) -> Result<()> {
    let trace = read_trace(&args.file)?;
    let mut sim = Simulation::for_trace(args.threshold, args.rows, args.cols, &trace)
        .context("cannot size the simulated matrix")?;

    for cycle in &trace {
        if sim.step(cycle)? {
            let commit = sim.commits().last().context("commit not recorded")?;
            write!(out, "cycle {}: commit", commit.cycle)?;
            for &(scan, sense, down) in &commit.changes {
                write!(out, " {scan}/{sense}{}", if down { '+' } else { '-' })?;
            }
            writeln!(out)?;
        }
        if args.verbose {
            writeln!(out, "{}", sim.state_line())?;
        }
    }

    writeln!(
        out,
        "{} cycles, {} commits, {}",
        sim.cycles(),
        sim.commits().len(),
        sim.state_line()
    )?;
    write!(out, "{}", sim.dump())?;
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = run(&cli);

    if let Err(err) = result {
        eprintln!("{:#}", err);
        process::exit(1);
    };
}

fn run(cli: &Cli) -> Result<()> {
    let mut out = io::stdout().lock();
    match &cli.command {
        Commands::Boards => boards(&mut out),
        Commands::Check(args) => check(args, &mut out),
        Commands::Show(args) => show(args, &mut out),
        Commands::Simulate(args) => simulate(args, &mut out),
    }
}
