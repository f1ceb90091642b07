use super::types::{Category, FundInputs};

#[derive(Copy, Clone, Debug)]
pub struct CatalogFund {
    pub id: &'static str,
    pub name: &'static str,
    pub initial_nav: f64,
    pub today_nav: f64,
}

impl CatalogFund {
    pub fn to_inputs(self) -> FundInputs {
        FundInputs {
            id: self.id.to_string(),
            name: self.name.to_string(),
            initial_nav: self.initial_nav,
            today_nav: self.today_nav,
        }
    }
}

const fn fund(
    id: &'static str,
    name: &'static str,
    initial_nav: f64,
    today_nav: f64,
) -> CatalogFund {
    CatalogFund {
        id,
        name,
        initial_nav,
        today_nav,
    }
}

/// Funds produced by `--all`, in output order.
pub const FUND_CATALOG: &[CatalogFund] = &[
    fund("motilal-oswal-midcap", "Motilal Oswal Midcap Direct Growth", 90.50, 104.20),
    fund("hdfc-largecap", "HDFC Top 100 Direct Growth", 650.25, 780.40),
    fund("axis-smallcap", "Axis Small Cap Direct Growth", 45.80, 63.25),
    fund(
        "icici-hybrid",
        "ICICI Prudential Balanced Advantage Direct Growth",
        38.75,
        51.20,
    ),
    fund("sbi-debt", "SBI Short Term Debt Direct Growth", 25.40, 29.75),
    fund(
        "kotak-banking",
        "Kotak Banking and Financial Services Fund Direct Growth",
        55.30,
        72.45,
    ),
    fund("nippon-pharma", "Nippon India Pharma Fund Direct Growth", 320.15, 380.90),
    fund(
        "franklin-bluechip",
        "Franklin India Bluechip Fund Direct Growth",
        780.50,
        980.25,
    ),
    fund("tata-digital", "Tata Digital India Fund Direct Growth", 42.75, 68.30),
    fund(
        "aditya-birla-equity",
        "Aditya Birla Sun Life Equity Fund Direct Growth",
        105.60,
        145.80,
    ),
    // Benchmark indexes
    fund("nifty-midcap-150", "Nifty Midcap 150 Index", 95.75, 110.40),
];

/// A rule matches when the lowercased id contains `id_keyword` or the name
/// contains `name_keyword` verbatim.
#[derive(Copy, Clone, Debug)]
pub struct CategoryRule {
    pub id_keyword: &'static str,
    pub name_keyword: &'static str,
    pub category: Category,
}

/// Evaluated top to bottom; the first match wins.
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        id_keyword: "midcap",
        name_keyword: "Midcap",
        category: Category::Midcap,
    },
    CategoryRule {
        id_keyword: "smallcap",
        name_keyword: "Smallcap",
        category: Category::Smallcap,
    },
    CategoryRule {
        id_keyword: "largecap",
        name_keyword: "Largecap",
        category: Category::Largecap,
    },
    CategoryRule {
        id_keyword: "debt",
        name_keyword: "Debt",
        category: Category::Debt,
    },
    CategoryRule {
        id_keyword: "hybrid",
        name_keyword: "Hybrid",
        category: Category::Hybrid,
    },
];

pub fn classify(id: &str, name: &str) -> Category {
    let id = id.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|rule| id.contains(rule.id_keyword) || name.contains(rule.name_keyword))
        .map(|rule| rule.category)
        .unwrap_or(Category::Equity)
}
