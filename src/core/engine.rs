use chrono::NaiveDate;
use rand::Rng;

use super::types::{DateInterval, Position, Series, SeriesPoint};
use crate::errors::{Error, Result};

const BASE_VOLATILITY: f64 = 0.003;
const MID_HORIZON_VOLATILITY_MULTIPLIER: f64 = 2.0;
const MID_HORIZON_START: f64 = 0.3;
const MID_HORIZON_END: f64 = 0.7;
pub const NAV_FLOOR: f64 = 0.1;

/// Uniform draws used by the synthesizer and the generation policies.
pub trait RandomSource {
    /// Uniform float in `[low, high]`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Uniform integer in `[low, high]`.
    fn uniform_int(&mut self, low: u32, high: u32) -> u32;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.gen_range(low..=high)
    }

    fn uniform_int(&mut self, low: u32, high: u32) -> u32 {
        self.gen_range(low..=high)
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn ensure_positive(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidValue { field, value });
    }
    Ok(())
}

/// Builds one NAV per calendar day of `interval`: a random walk with linear
/// drift from `start_nav`, pinned to `end_nav` on the last date.
pub fn synthesize<R: RandomSource + ?Sized>(
    start_nav: f64,
    end_nav: f64,
    interval: DateInterval,
    rng: &mut R,
) -> Result<Series> {
    ensure_positive("start_nav", start_nav)?;
    ensure_positive("end_nav", end_nav)?;

    let day_count = interval.day_count();
    let anchored_end = round2(end_nav);

    if day_count == 1 {
        return Ok(vec![SeriesPoint {
            date: interval.start(),
            nav: anchored_end,
        }]);
    }

    let steps = (day_count - 1) as f64;
    let drift = (end_nav - start_nav) / steps;

    let mut series = Vec::with_capacity(day_count);
    let mut nav = start_nav;
    for (i, date) in interval.days().enumerate() {
        let volatility = volatility_for_phase(i as f64 / day_count as f64);
        let fluctuation = rng.uniform(-volatility, volatility);
        nav = (nav + drift + nav * fluctuation).max(NAV_FLOOR);
        series.push(SeriesPoint {
            date,
            nav: round2(nav),
        });
    }

    match series.last_mut() {
        Some(last) if last.date == interval.end() => last.nav = anchored_end,
        _ => series.push(SeriesPoint {
            date: interval.end(),
            nav: anchored_end,
        }),
    }

    tracing::debug!(
        start = %interval.start(),
        end = %interval.end(),
        points = series.len(),
        "synthesized nav series"
    );
    Ok(series)
}

fn volatility_for_phase(phase: f64) -> f64 {
    if phase > MID_HORIZON_START && phase < MID_HORIZON_END {
        BASE_VOLATILITY * MID_HORIZON_VOLATILITY_MULTIPLIER
    } else {
        BASE_VOLATILITY
    }
}

/// Picks the NAV nearest `purchase_date` (earlier date on ties) and converts
/// `invested_amount` into units held.
pub fn derive_position(
    series: &[SeriesPoint],
    invested_amount: f64,
    purchase_date: NaiveDate,
) -> Result<Position> {
    ensure_positive("invested_amount", invested_amount)?;

    let nearest = nearest_point(series, purchase_date).ok_or(Error::EmptySeries)?;
    ensure_positive("purchase_nav", nearest.nav)?;

    Ok(Position {
        invested_amount,
        units: round2(invested_amount / nearest.nav),
        purchase_nav: nearest.nav,
        last_purchase_date: purchase_date,
    })
}

fn nearest_point(series: &[SeriesPoint], target: NaiveDate) -> Option<&SeriesPoint> {
    let mut best: Option<(&SeriesPoint, i64)> = None;
    for point in series {
        let distance = (point.date - target).num_days().abs();
        // Strict comparison keeps the earliest candidate on ties.
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((point, distance));
        }
    }
    best.map(|(point, _)| point)
}
