use std::{fs::File, sync::Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, warn};

use crate::args::{Args, Config};
use crate::editor::Editor;
use crate::gol::{Board, Stepper};
use crate::render::{curses::Curses, Interrupted, Screen};

mod args;
mod editor;
mod gol;
mod render;
#[cfg(test)]
mod test_support;

/// Used when the terminal reports a zero dimension.
const FALLBACK_WIDTH: u32 = 120;
const FALLBACK_HEIGHT: u32 = 30;

fn initial_board<S: Screen>(screen: &mut S, cfg: &Config) -> Result<Board> {
    let (w, h) = screen.size();
    let degenerate = w == 0 || h == 0;
    if cfg.interactive {
        if !degenerate {
            return Editor::new(w, h)?.run(screen);
        }
        warn!(width = w, height = h, "terminal too small for interactive mode");
    }
    let (w, h) = if degenerate {
        warn!(
            width = w,
            height = h,
            "degenerate terminal size, using {}x{}",
            FALLBACK_WIDTH,
            FALLBACK_HEIGHT
        );
        (FALLBACK_WIDTH, FALLBACK_HEIGHT)
    } else {
        (w, h)
    };
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    Board::random(w, h, &mut rng)
}

fn simulate<S: Screen>(
    screen: &mut S,
    board: &mut Board,
    stepper: &mut Stepper,
    cfg: &Config,
) -> Result<()> {
    screen.draw(board)?;
    screen.show_cursor(None)?;
    for generation in 1..=cfg.generations {
        screen.pause(cfg.delay)?;
        stepper.step(board);
        debug!(generation, alive = board.alive(), "stepped");
        screen.draw(board)?;
    }
    Ok(())
}

/// Builds the initial board, runs every generation, then waits for a key.
fn run<S: Screen>(screen: &mut S, cfg: &Config) -> Result<Board> {
    let mut stepper = Stepper::new(cfg.threads)?;
    let mut board = initial_board(screen, cfg)?;
    info!(
        width = board.width(),
        height = board.height(),
        generations = cfg.generations,
        threads = stepper.threads(),
        alive = board.alive(),
        "simulation started"
    );
    simulate(screen, &mut board, &mut stepper, cfg)?;
    info!(alive = board.alive(), "simulation finished");
    screen.read_key()?;
    Ok(board)
}

fn init_logging(args: &Args) -> Result<()> {
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_max_level(args.log_level())
            .init();
    }
    Ok(())
}

fn try_main(args: &Args) -> Result<()> {
    init_logging(args)?;
    let cfg = args.config();
    debug!(?cfg, "configuration");
    let mut screen = Curses::open()?;
    run(&mut screen, &cfg)?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    // the curses session is dropped inside try_main, so the terminal is
    // restored before anything is printed here
    let code = match try_main(&args) {
        Ok(()) => 0,
        Err(e) if e.downcast_ref::<Interrupted>().is_some() => {
            info!("exiting after termination signal");
            1
        }
        Err(e) => {
            eprintln!("error: {:?}", e);
            1
        }
    };
    std::process::exit(code);
}
