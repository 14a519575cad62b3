use clap::{ArgAction, Parser};
use std::{convert::Infallible, path::PathBuf, time::Duration};
use tracing::Level;

pub const DEFAULT_GENERATIONS: u32 = 100;
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Conway's Game of Life in the terminal.
#[derive(Parser, Debug)]
#[command(version, args_override_self = true)]
pub struct Args {
    /// Number of generations to run (0 or omitted means 100). Non-digit
    /// characters are ignored.
    #[arg(
        short = 't',
        value_name = "N",
        value_parser = lenient_count,
        allow_hyphen_values = true
    )]
    pub generations: Option<u32>,
    /// Place live cells by hand before the run: w/a/s/d or arrows move,
    /// space toggles, z starts.
    #[arg(short = 'i')]
    pub interactive: bool,
    /// Worker threads used to compute each generation.
    #[arg(short = 'j', long)]
    pub threads: Option<u16>,
    /// Pause between generations, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,
    /// Seed for the random initial board.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Write logs to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
    /// More log detail; repeat for more.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Accumulates the decimal digits of `s`, skipping anything else.
/// Saturates instead of overflowing.
pub fn lenient_count(s: &str) -> Result<u32, Infallible> {
    Ok(s.chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0u32, |n, d| n.saturating_mul(10).saturating_add(d)))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub generations: u32,
    pub interactive: bool,
    pub threads: usize,
    pub delay: Duration,
    pub seed: Option<u64>,
}

impl Args {
    pub fn config(&self) -> Config {
        Config {
            generations: match self.generations {
                None | Some(0) => DEFAULT_GENERATIONS,
                Some(n) => n,
            },
            interactive: self.interactive,
            threads: self
                .threads
                .map(|t| t as usize)
                .unwrap_or_else(num_cpus::get)
                .max(1),
            delay: Duration::from_millis(self.delay_ms),
            seed: self.seed,
        }
    }

    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("gol-term").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_lenient_count() {
        assert_eq!(lenient_count("1a2b3"), Ok(123));
        assert_eq!(lenient_count("abc"), Ok(0));
        assert_eq!(lenient_count(""), Ok(0));
        assert_eq!(lenient_count("99999999999"), Ok(u32::MAX));
    }

    #[test]
    fn test_generations() {
        assert_eq!(parse(&["-t", "1a2b3"]).config().generations, 123);
        assert_eq!(parse(&["-t", "abc"]).config().generations, 100);
        assert_eq!(parse(&["-t0"]).config().generations, 100);
        assert_eq!(parse(&[]).config().generations, 100);
        assert_eq!(parse(&["-t", "7"]).config().generations, 7);
        assert_eq!(parse(&["-t", "-5"]).config().generations, 5);
        assert_eq!(parse(&["-t", "-x1"]).config().generations, 1);
        assert_eq!(parse(&["-t", "-", "-i"]).config().generations, 100);
    }

    #[test]
    fn test_interactive_flag_is_idempotent() {
        assert!(!parse(&[]).config().interactive);
        assert!(parse(&["-i"]).config().interactive);
        assert!(parse(&["-i", "-i", "-t", "5"]).config().interactive);
        assert!(parse(&["-ii"]).config().interactive);
    }

    #[test]
    fn test_defaults() {
        let a = parse(&[]);
        let c = a.config();
        assert_eq!(c.delay, Duration::from_millis(DEFAULT_DELAY_MS));
        assert!(c.threads >= 1);
        assert_eq!(c.seed, None);
        assert_eq!(a.log_level(), Level::WARN);
        assert!(a.log_file.is_none());
    }

    #[test]
    fn test_overrides() {
        let a = parse(&["-j", "3", "--delay-ms", "20", "--seed", "9", "-vv"]);
        let c = a.config();
        assert_eq!(c.threads, 3);
        assert_eq!(c.delay, Duration::from_millis(20));
        assert_eq!(c.seed, Some(9));
        assert_eq!(a.log_level(), Level::DEBUG);
    }
}
