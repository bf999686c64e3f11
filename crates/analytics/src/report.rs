use crate::filter::Selection;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The sum of `total` over one group of sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTotal<K> {
    pub key: K,
    pub total: Decimal,
    /// Percentage of the sum over all groups, when shares were requested.
    pub share_pct: Option<Decimal>,
}

impl<K> GroupTotal<K> {
    pub fn new(key: K, total: Decimal) -> Self {
        Self {
            key,
            total,
            share_pct: None,
        }
    }
}

/// The number of transactions in one group of sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
    pub share_pct: Option<Decimal>,
}

/// One point of the sales-over-time line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub total: Decimal,
}

/// Everything the dashboard shows for one filter selection.
///
/// This struct is the final output of the `AnalyticsEngine` and is what the
/// presentation layer renders, either as tables or as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub selection: Selection,

    // I. Headline KPIs
    pub transaction_count: usize,
    pub total_sales: i64,
    pub average_rating: Option<Decimal>, // None when no sales matched
    pub average_sale_per_transaction: Option<Decimal>, // None when no sales matched
    pub star_rating_glyphs: u32,

    // II. Chart Data
    pub sales_by_product_line: Vec<GroupTotal<String>>,
    pub sales_by_hour: Vec<GroupTotal<u32>>,
    pub sales_by_customer_type: Vec<GroupTotal<String>>,
    pub customer_type_distribution: Vec<GroupCount>,
    pub sales_by_gender: Vec<GroupTotal<String>>,
    pub sales_by_branch: Vec<GroupTotal<String>>,
    pub sales_trend: Vec<TrendPoint>,
}

impl DashboardReport {
    /// Creates a report for a selection that matched nothing.
    pub fn empty(selection: Selection) -> Self {
        Self {
            selection,
            transaction_count: 0,
            total_sales: 0,
            average_rating: None,
            average_sale_per_transaction: None,
            star_rating_glyphs: 0,
            sales_by_product_line: Vec::new(),
            sales_by_hour: Vec::new(),
            sales_by_customer_type: Vec::new(),
            customer_type_distribution: Vec::new(),
            sales_by_gender: Vec::new(),
            sales_by_branch: Vec::new(),
            sales_trend: Vec::new(),
        }
    }
}
