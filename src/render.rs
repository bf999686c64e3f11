//! Terminal rendering of dashboard reports.

use analytics::format::{format_currency, format_currency_whole, format_rating};
use analytics::{DashboardReport, FilterOptions, GroupTotal};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Display;

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header.to_vec());
    table
}

fn share(pct: Option<Decimal>) -> String {
    pct.map(|p| format!("{p:.2}%")).unwrap_or_default()
}

/// Two decimals, ties to even, e.g. `700.5285` shows as `700.53`.
fn money(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    format!("{rounded:.2}")
}

fn amount(value: Decimal) -> Cell {
    Cell::new(money(value)).set_alignment(CellAlignment::Right)
}

fn grouped<K: Display>(title: &str, groups: &[GroupTotal<K>], with_share: bool) -> String {
    let mut header = vec![title, "Total"];
    if with_share {
        header.push("Share");
    }
    let mut table = table(&header);
    for group in groups {
        let mut row = vec![Cell::new(&group.key), amount(group.total)];
        if with_share {
            row.push(Cell::new(share(group.share_pct)));
        }
        table.add_row(row);
    }
    table.to_string()
}

/// KPIs first, then one table per breakdown.
pub fn report(report: &DashboardReport, currency_label: &str) -> String {
    let mut kpis = table(&["Total Sale", "Avg. Rating", "Avg. Sale Per Transaction", "Transactions"]);
    kpis.add_row(vec![
        format_currency_whole(currency_label, report.total_sales),
        format_rating(report.average_rating, report.star_rating_glyphs),
        report
            .average_sale_per_transaction
            .map(|avg| format_currency(currency_label, avg))
            .unwrap_or_else(|| "n/a".to_string()),
        report.transaction_count.to_string(),
    ]);

    if report.transaction_count == 0 {
        return format!("{kpis}\nNo sales match the current selection.");
    }

    let mut distribution = table(&["Customer type", "Transactions", "Share"]);
    for group in &report.customer_type_distribution {
        distribution.add_row(vec![
            group.key.clone(),
            group.count.to_string(),
            share(group.share_pct),
        ]);
    }

    let sections = [
        kpis.to_string(),
        grouped("Product line", &report.sales_by_product_line, false),
        grouped("Hour", &report.sales_by_hour, false),
        grouped("Customer type", &report.sales_by_customer_type, true),
        distribution.to_string(),
        grouped("Gender", &report.sales_by_gender, true),
        grouped("Branch", &report.sales_by_branch, false),
    ];
    sections.join("\n")
}

pub fn options(options: &FilterOptions) -> String {
    let mut table = table(&["City", "Customer type", "Gender"]);
    let rows = options
        .cities
        .len()
        .max(options.customer_types.len())
        .max(options.genders.len());
    for i in 0..rows {
        let at = |values: &[String]| values.get(i).cloned().unwrap_or_default();
        table.add_row(vec![
            at(&options.cities),
            at(&options.customer_types),
            at(&options.genders),
        ]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::{AnalyticsEngine, Selection};
    use chrono::NaiveDate;
    use core_types::{Dimension, Sale};
    use rust_decimal_macros::dec;

    fn sales() -> Vec<Sale> {
        let day = NaiveDate::from_ymd_opt(2019, 1, 5).unwrap();
        vec![
            Sale::new(day, Sale::parse_time("13:08:00"), dec!(1548.97), dec!(9.1))
                .with(Dimension::City, "Yangon")
                .with(Dimension::CustomerType, "Member")
                .with(Dimension::Gender, "Female")
                .with(Dimension::ProductLine, "Health and beauty")
                .with(Dimension::Branch, "A"),
        ]
    }

    #[test]
    fn report_shows_kpis_and_breakdowns() {
        let sales = sales();
        let selection = FilterOptions::from_records(&sales).select_all();
        let report = AnalyticsEngine::default().calculate(&sales, &selection);

        let text = super::report(&report, "US $");
        assert!(text.contains("US $1,548"));
        assert!(text.contains("9.1 ⭐⭐⭐⭐⭐"));
        assert!(text.contains("Health and beauty"));
        assert!(text.contains("100.00%"));
    }

    #[test]
    fn empty_selection_says_so() {
        let report = AnalyticsEngine::default().calculate(&sales(), &Selection::default());
        let text = super::report(&report, "US $");
        assert!(text.contains("No sales match"));
        assert!(text.contains("n/a"));
    }

    #[test]
    fn group_totals_are_rounded_to_cents() {
        assert_eq!(money(dec!(700.5285)), "700.53");
        assert_eq!(money(dec!(0.125)), "0.12");
        assert_eq!(money(dec!(0.135)), "0.14");
        assert_eq!(money(dec!(80.2)), "80.20");

        let groups = vec![GroupTotal::new("Food".to_string(), dec!(700.5285))];
        let text = grouped("Product line", &groups, false);
        assert!(text.contains("700.53"));
        assert!(!text.contains("700.5285"));
    }

    #[test]
    fn options_table_lists_every_value() {
        let text = options(&FilterOptions::from_records(&sales()));
        assert!(text.contains("Yangon"));
        assert!(text.contains("Member"));
        assert!(text.contains("Female"));
    }
}
