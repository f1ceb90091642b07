use chrono::Duration;

use super::catalog::classify;
use super::engine::{RandomSource, derive_position, synthesize};
use super::types::{FundInputs, FundMeta, FundRecord, GenerateOptions};
use crate::errors::Result;

/// Purchase happens within the first three months of the history.
const MAX_PURCHASE_OFFSET_DAYS: u32 = 90;
const AUM_MILLIONS_RANGE: (u32, u32) = (500, 5_000);
const INVESTED_THOUSANDS_RANGE: (u32, u32) = (50, 500);

/// Assembles a full fund record: NAV history, category, AUM and holding.
pub fn generate_fund<R: RandomSource + ?Sized>(
    inputs: &FundInputs,
    options: &GenerateOptions,
    rng: &mut R,
) -> Result<FundRecord> {
    let interval = options.interval()?;

    let purchase_offset = rng.uniform_int(0, MAX_PURCHASE_OFFSET_DAYS);
    let purchase_date = interval
        .start()
        .checked_add_signed(Duration::days(i64::from(purchase_offset)))
        .map_or(interval.end(), |date| date.min(interval.end()));

    let aum = u64::from(rng.uniform_int(AUM_MILLIONS_RANGE.0, AUM_MILLIONS_RANGE.1)) * 1_000_000;
    let category = classify(&inputs.id, &inputs.name);

    let nav_history = synthesize(inputs.initial_nav, inputs.today_nav, interval, rng)?;

    let invested_thousands =
        rng.uniform_int(INVESTED_THOUSANDS_RANGE.0, INVESTED_THOUSANDS_RANGE.1);
    let invested_amount = f64::from(invested_thousands) * 1_000.0;
    let user_holding = derive_position(&nav_history, invested_amount, purchase_date)?;

    Ok(FundRecord {
        id: inputs.id.clone(),
        name: inputs.name.clone(),
        meta: FundMeta { aum, category },
        nav_history,
        user_holding,
    })
}
