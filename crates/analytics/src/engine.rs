use crate::aggregate;
use crate::filter::Selection;
use crate::report::DashboardReport;
use core_types::{Sale, StarPolicy};

/// A stateless calculator for deriving the dashboard's figures from sales.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsEngine {
    star_policy: StarPolicy,
}

impl AnalyticsEngine {
    pub fn new(star_policy: StarPolicy) -> Self {
        Self { star_policy }
    }

    pub fn star_policy(&self) -> StarPolicy {
        self.star_policy
    }

    /// The main entry point for calculating the dashboard.
    ///
    /// # Arguments
    ///
    /// * `records` - Every loaded sale. Never modified.
    /// * `selection` - The values allowed for each filter dimension.
    ///
    /// # Returns
    ///
    /// A `DashboardReport` computed from scratch over the matching sales.
    pub fn calculate(&self, records: &[Sale], selection: &Selection) -> DashboardReport {
        let filtered = selection.filter(records);
        tracing::debug!(
            loaded = records.len(),
            matched = filtered.len(),
            "Applied filter selection."
        );

        if filtered.is_empty() {
            // Nothing matched, so every sum is zero and every average undefined.
            return DashboardReport::empty(selection.clone());
        }

        self.summarize(&filtered, selection.clone())
    }

    /// Computes every KPI and grouping over an already-filtered slice.
    pub fn summarize(&self, records: &[Sale], selection: Selection) -> DashboardReport {
        let average_rating = aggregate::average_rating(records);

        DashboardReport {
            selection,
            transaction_count: aggregate::transaction_count(records),
            total_sales: aggregate::total_sales(records),
            average_rating,
            average_sale_per_transaction: aggregate::average_sale_per_transaction(records),
            star_rating_glyphs: aggregate::star_rating_glyph_count(average_rating, self.star_policy),
            sales_by_product_line: aggregate::sales_by_product_line(records),
            sales_by_hour: aggregate::sum_by_hour(records),
            sales_by_customer_type: aggregate::sales_by_customer_type(records),
            customer_type_distribution: aggregate::customer_type_distribution(records),
            sales_by_gender: aggregate::sales_by_gender(records),
            sales_by_branch: aggregate::sales_by_branch(records),
            sales_trend: aggregate::sales_trend(records),
        }
    }
}
