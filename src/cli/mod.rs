pub mod commands;

use clap::{Args, Parser, Subcommand};

use crate::config::{ColorChoice, LabConfig, ReportFormat};

/// Banner printed before the first report in text mode.
pub const COLLECTION_BANNER: &str = "=== Brain Teasers Collection ===";

#[derive(Parser, Debug)]
#[command(name = "callscope")]
#[command(about = "Run a brain teaser and print an execution analysis of the call", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Report format
    #[arg(long = "output", value_enum, default_value_t = ReportFormat::Text, env = "CALLSCOPE_OUTPUT", global = true)]
    pub format: ReportFormat,

    /// When to colour text reports
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, env = "CALLSCOPE_COLOR", global = true)]
    pub color: ColorChoice,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to stderr as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                2 => Verbosity::Debug,
                _ => Verbosity::Trace,
            }
        }
    }

    /// The subcommand to run; `divide 10 2` when none was given.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or_default()
    }

    pub fn lab_config(&self) -> LabConfig {
        LabConfig::detect()
            .with_format(self.format)
            .with_color(self.color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Debug,
    Trace,
}

impl Verbosity {
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    pub fn to_log_level(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
            Verbosity::Trace => "trace",
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Divide two integers and print the quotient
    Divide(DivideArgs),

    /// List the first Fibonacci numbers
    Fibonacci(FibonacciArgs),

    /// Check which numbers are prime
    Primes(PrimesArgs),

    /// Split a `;`-separated string
    Parts(PartsArgs),

    /// Sum a `;`-separated list of integers
    Sum(SumArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Divide(DivideArgs { a: 10, b: 2 })
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct DivideArgs {
    /// Dividend
    #[arg(default_value_t = 10, allow_negative_numbers = true)]
    pub a: i32,

    /// Divisor
    #[arg(default_value_t = 2, allow_negative_numbers = true)]
    pub b: i32,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct FibonacciArgs {
    /// How many numbers to list
    #[arg(default_value_t = 10, value_parser = clap::value_parser!(u32).range(0..=40))]
    pub count: u32,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PrimesArgs {
    /// Numbers to check
    #[arg(default_values_t = [2u64, 3, 4, 17, 25, 29, 100])]
    pub numbers: Vec<u64>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PartsArgs {
    /// Input to split; omit it to see the missing-input failure
    pub input: Option<String>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SumArgs {
    /// Integers separated by `;`
    #[arg(default_value = "1;2;3")]
    pub input: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("callscope").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_subcommand_divides_ten_by_two() {
        let cli = parse(&[]);
        assert_eq!(cli.command(), Commands::Divide(DivideArgs { a: 10, b: 2 }));
        assert_eq!(cli.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(parse(&["-q"]).verbosity().to_log_level(), "error");
        assert_eq!(parse(&["-v"]).verbosity().to_log_level(), "info");
        assert_eq!(parse(&["-vvvv"]).verbosity().to_log_level(), "trace");
    }

    #[test]
    fn fibonacci_count_is_bounded() {
        assert!(Cli::try_parse_from(["callscope", "fibonacci", "41"]).is_err());
        assert_eq!(
            parse(&["fibonacci", "5"]).command(),
            Commands::Fibonacci(FibonacciArgs { count: 5 })
        );
    }

    #[test]
    fn output_format_flag() {
        let cli = parse(&["--output", "json", "primes", "7"]);
        assert_eq!(cli.lab_config().format, ReportFormat::Json);
        assert_eq!(cli.command(), Commands::Primes(PrimesArgs { numbers: vec![7] }));
    }
}
