use std::fs;

use chrono::NaiveDate;
use navgen::cli::generate_all;
use navgen::core::{FUND_CATALOG, GenerateOptions, round2};
use navgen::store;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn options() -> GenerateOptions {
    GenerateOptions {
        end_date: NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date"),
        history_days: GenerateOptions::DEFAULT_HISTORY_DAYS,
    }
}

#[test]
fn generate_all_twice_keeps_one_entry_per_catalog_fund() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("assets").join("data").join("funds.json");
    let mut rng = StdRng::seed_from_u64(2024);

    generate_all(&output, &options(), &mut rng).expect("first run");
    let first = store::load(&output).expect("load after first run");
    assert_eq!(first.len(), FUND_CATALOG.len());

    generate_all(&output, &options(), &mut rng).expect("second run");
    let second = store::load(&output).expect("load after second run");
    assert_eq!(second.len(), FUND_CATALOG.len());

    let ids: Vec<_> = second.iter().map(|r| r.id.as_str()).collect();
    let expected: Vec<_> = FUND_CATALOG.iter().map(|f| f.id).collect();
    assert_eq!(ids, expected);

    for (record, fund) in second.iter().zip(FUND_CATALOG) {
        let last = record.nav_history.last().expect("non-empty history");
        assert_eq!(last.date, options().end_date);
        assert_eq!(last.nav, round2(fund.today_nav));
        assert_eq!(record.nav_history.len(), 365 * 3 + 1);
    }
}

#[test]
fn generate_all_replaces_malformed_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("funds.json");
    fs::write(&output, "this is not json").expect("seed malformed file");
    let mut rng = StdRng::seed_from_u64(1);

    let summary = generate_all(&output, &options(), &mut rng).expect("run");
    assert_eq!(summary.added, FUND_CATALOG.len());
    assert_eq!(store::load(&output).expect("load").len(), FUND_CATALOG.len());
}

#[test]
fn same_seed_reproduces_the_same_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let left = dir.path().join("left.json");
    let right = dir.path().join("right.json");

    generate_all(&left, &options(), &mut StdRng::seed_from_u64(77)).expect("left");
    generate_all(&right, &options(), &mut StdRng::seed_from_u64(77)).expect("right");

    let left = fs::read_to_string(left).expect("read left");
    let right = fs::read_to_string(right).expect("read right");
    assert_eq!(left, right);
}
