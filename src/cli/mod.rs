use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Parser};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::core::{FUND_CATALOG, FundInputs, GenerateOptions, RandomSource, generate_fund};
use crate::errors::{Error, Result};
use crate::store::{self, MergeOutcome};

pub const DEFAULT_OUTPUT: &str = "assets/data/funds.json";

#[derive(Parser, Debug)]
#[command(
    name = "navgen",
    about = "Generate mock NAV history and holdings for mutual funds"
)]
pub struct Cli {
    #[arg(long, help = "Fund ID")]
    id: Option<String>,
    #[arg(long, help = "Fund name")]
    name: Option<String>,
    #[arg(long, help = "Initial NAV value")]
    initial_nav: Option<f64>,
    #[arg(long, help = "Current NAV value")]
    today_nav: Option<f64>,
    #[arg(
        long,
        env = "NAVGEN_OUTPUT",
        default_value = DEFAULT_OUTPUT,
        help = "Output JSON file path"
    )]
    output: PathBuf,
    #[arg(long, help = "Generate all predefined funds")]
    all: bool,
    #[arg(long, help = "Seed for reproducible output; random when omitted")]
    seed: Option<u64>,
    #[arg(long, help = "Last date of the NAV history (YYYY-MM-DD); defaults to today")]
    end_date: Option<NaiveDate>,
    #[arg(
        long,
        default_value_t = GenerateOptions::DEFAULT_HISTORY_DAYS,
        help = "Number of days of history before the end date"
    )]
    history_days: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    One(FundInputs),
    All,
}

#[derive(Debug)]
pub struct Request {
    pub mode: Mode,
    pub output: PathBuf,
    pub options: GenerateOptions,
    pub seed: Option<u64>,
}

pub fn init_tracing() {
    let log_format = std::env::var("NAVGEN_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn resolve_mode(cli: &Cli) -> Result<Mode> {
    if cli.all {
        return Ok(Mode::All);
    }

    match (&cli.id, &cli.name, cli.initial_nav, cli.today_nav) {
        (Some(id), Some(name), Some(initial_nav), Some(today_nav)) => Ok(Mode::One(FundInputs {
            id: id.clone(),
            name: name.clone(),
            initial_nav,
            today_nav,
        })),
        (None, None, None, None) => Ok(Mode::All),
        _ => Err(Error::MissingArguments),
    }
}

pub fn build_request(cli: Cli) -> Result<Request> {
    let mode = resolve_mode(&cli)?;

    if let Mode::One(inputs) = &mode {
        for (field, value) in [
            ("--initial-nav", inputs.initial_nav),
            ("--today-nav", inputs.today_nav),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidValue { field, value });
            }
        }
    }

    let options = GenerateOptions {
        end_date: cli.end_date.unwrap_or_else(|| Local::now().date_naive()),
        history_days: cli.history_days,
    };
    options.interval()?;

    Ok(Request {
        mode,
        output: cli.output,
        options,
        seed: cli.seed,
    })
}

/// Reports the outcome of [`run`] on the console and returns the exit status.
/// Missing single-fund arguments fall back to the help text.
pub fn report_outcome(outcome: Result<()>) -> i32 {
    match outcome {
        Ok(()) => 0,
        Err(Error::MissingArguments) => {
            if let Err(e) = Cli::command().print_help() {
                eprintln!("Failed to print help: {e}");
            }
            println!("\n\nError: {}", Error::MissingArguments);
            0
        }
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let request = build_request(cli)?;
    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match &request.mode {
        Mode::One(inputs) => {
            generate_one(inputs, &request.output, &request.options, &mut rng)?;
        }
        Mode::All => {
            generate_all(&request.output, &request.options, &mut rng)?;
        }
    }
    Ok(())
}

/// Generates and persists one fund. Returns the collection size afterwards.
pub fn generate_one<R: RandomSource + ?Sized>(
    inputs: &FundInputs,
    output: &Path,
    options: &GenerateOptions,
    rng: &mut R,
) -> Result<usize> {
    let record = generate_fund(inputs, options, rng)?;
    let (outcome, total) = store::persist_record(output, record)?;
    println!(
        "Fund '{}' {} {}",
        inputs.name,
        outcome.verb(),
        output.display()
    );
    println!("Total funds in file: {total}");
    Ok(total)
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct BatchSummary {
    pub added: usize,
    pub updated: usize,
    pub total: usize,
}

/// Generates every catalog fund in order, merging each into `output`.
pub fn generate_all<R: RandomSource + ?Sized>(
    output: &Path,
    options: &GenerateOptions,
    rng: &mut R,
) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();
    let count = FUND_CATALOG.len();

    for (i, fund) in FUND_CATALOG.iter().enumerate() {
        let record = generate_fund(&fund.to_inputs(), options, rng)?;
        let (outcome, total) = store::persist_record(output, record)?;
        match outcome {
            MergeOutcome::Added => summary.added += 1,
            MergeOutcome::Updated => summary.updated += 1,
        }
        summary.total = total;
        println!(
            "[{}/{}] Fund '{}' {} {}",
            i + 1,
            count,
            fund.name,
            outcome.verb(),
            output.display()
        );
    }

    println!("Total funds in file: {}", summary.total);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_cli() -> Cli {
        Cli {
            id: None,
            name: None,
            initial_nav: None,
            today_nav: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            all: false,
            seed: Some(42),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 31),
            history_days: GenerateOptions::DEFAULT_HISTORY_DAYS,
        }
    }

    fn single_fund_cli() -> Cli {
        let mut cli = sample_cli();
        cli.id = Some("sbi-debt".to_string());
        cli.name = Some("SBI Short Term Debt Direct Growth".to_string());
        cli.initial_nav = Some(25.40);
        cli.today_nav = Some(29.75);
        cli
    }

    #[test]
    fn no_identity_arguments_means_generate_all() {
        let request = build_request(sample_cli()).expect("valid request");
        assert_eq!(request.mode, Mode::All);
    }

    #[test]
    fn all_flag_wins_over_partial_identity() {
        let mut cli = sample_cli();
        cli.all = true;
        cli.id = Some("only-id".to_string());
        let request = build_request(cli).expect("valid request");
        assert_eq!(request.mode, Mode::All);
    }

    #[test]
    fn full_identity_selects_single_fund() {
        let request = build_request(single_fund_cli()).expect("valid request");
        match request.mode {
            Mode::One(inputs) => {
                assert_eq!(inputs.id, "sbi-debt");
                assert_eq!(inputs.today_nav, 29.75);
            }
            Mode::All => panic!("expected single fund mode"),
        }
    }

    #[test]
    fn partial_identity_is_missing_arguments() {
        let mut cli = single_fund_cli();
        cli.today_nav = None;
        let err = build_request(cli).expect_err("must reject partial arguments");
        assert!(matches!(err, Error::MissingArguments));
        assert!(err.to_string().contains("--all"));
    }

    #[test]
    fn build_request_rejects_non_positive_nav() {
        let mut cli = single_fund_cli();
        cli.initial_nav = Some(-3.0);
        let err = build_request(cli).expect_err("must reject negative nav");
        assert!(err.to_string().contains("--initial-nav"));
    }

    #[test]
    fn build_request_rejects_history_before_earliest_date() {
        let mut cli = sample_cli();
        cli.history_days = u32::MAX;
        let err = build_request(cli).expect_err("must reject oversized history");
        assert!(matches!(
            err,
            Error::InvalidValue {
                field: "--history-days",
                ..
            }
        ));
    }

    #[test]
    fn missing_arguments_shows_help_and_exits_cleanly() {
        let mut cli = sample_cli();
        cli.name = Some("Name only".to_string());
        let outcome = build_request(cli).map(|_| ());

        assert!(matches!(outcome, Err(Error::MissingArguments)));
        assert_eq!(report_outcome(outcome), 0);
    }

    #[test]
    fn other_failures_exit_with_error_status() {
        assert_eq!(report_outcome(Ok(())), 0);
        assert_eq!(report_outcome(Err(Error::EmptySeries)), 1);
    }

    #[test]
    fn parses_command_line_flags() {
        let cli = Cli::try_parse_from([
            "navgen",
            "--id",
            "x",
            "--name",
            "X Fund",
            "--initial-nav",
            "10.5",
            "--today-nav",
            "12",
            "--output",
            "out/funds.json",
            "--seed",
            "9",
            "--end-date",
            "2024-02-29",
            "--history-days",
            "30",
        ])
        .expect("flags parse");
        let request = build_request(cli).expect("valid request");

        assert_eq!(request.output, PathBuf::from("out/funds.json"));
        assert_eq!(request.seed, Some(9));
        assert_eq!(
            request.options.end_date,
            NaiveDate::from_ymd_opt(2024, 2, 29).expect("valid date")
        );
        assert_eq!(request.options.history_days, 30);
        assert!(matches!(request.mode, Mode::One(_)));
    }

    #[test]
    fn generate_one_updates_existing_fund() {
        let dir = tempdir().expect("tempdir");
        let output = dir.path().join("funds.json");
        let request = build_request(single_fund_cli()).expect("valid request");
        let Mode::One(inputs) = &request.mode else {
            panic!("expected single fund mode");
        };
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(
            generate_one(inputs, &output, &request.options, &mut rng).expect("first"),
            1
        );
        assert_eq!(
            generate_one(inputs, &output, &request.options, &mut rng).expect("second"),
            1
        );
    }

    #[test]
    fn generate_all_reports_added_then_updated() {
        let dir = tempdir().expect("tempdir");
        let output = dir.path().join("data").join("funds.json");
        let options = build_request(sample_cli()).expect("valid").options;
        let mut rng = StdRng::seed_from_u64(5);

        let first = generate_all(&output, &options, &mut rng).expect("first run");
        assert_eq!(
            first,
            BatchSummary {
                added: FUND_CATALOG.len(),
                updated: 0,
                total: FUND_CATALOG.len(),
            }
        );

        let second = generate_all(&output, &options, &mut rng).expect("second run");
        assert_eq!(
            second,
            BatchSummary {
                added: 0,
                updated: FUND_CATALOG.len(),
                total: FUND_CATALOG.len(),
            }
        );
    }
}
