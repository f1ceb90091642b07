mod catalog;
mod engine;
mod generator;
mod types;

pub use catalog::{CATEGORY_RULES, CatalogFund, CategoryRule, FUND_CATALOG, classify};
pub use engine::{NAV_FLOOR, RandomSource, derive_position, round2, synthesize};
pub use generator::generate_fund;
pub use types::{
    Category, DateInterval, FundInputs, FundMeta, FundRecord, GenerateOptions, Position, Series,
    SeriesPoint,
};
