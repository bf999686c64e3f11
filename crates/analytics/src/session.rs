use crate::engine::AnalyticsEngine;
use crate::error::AnalyticsError;
use crate::filter::{FilterOptions, Selection};
use crate::report::DashboardReport;
use core_types::Sale;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Source of dashboard identities, so a ticket can only go back to the
/// dashboard that issued it.
static NEXT_DASHBOARD_ID: AtomicU64 = AtomicU64::new(1);

/// A request to recompute the dashboard for one selection.
///
/// Tickets are numbered in the order they were issued; a report computed for
/// an older ticket is never shown over one computed for a newer ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTicket {
    dashboard: u64,
    generation: u64,
    selection: Selection,
}

impl RefreshTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }
}

#[derive(Debug, Default)]
struct Published {
    generation: u64,
    report: Option<Arc<DashboardReport>>,
}

/// The loaded sales plus the most recent report computed from them.
///
/// The sales are an immutable snapshot shared by every refresh.
#[derive(Debug)]
pub struct Dashboard {
    id: u64,
    records: Arc<[Sale]>,
    options: FilterOptions,
    engine: AnalyticsEngine,
    issued: AtomicU64,
    published: Mutex<Published>,
}

impl Dashboard {
    pub fn new(records: Arc<[Sale]>, engine: AnalyticsEngine) -> Self {
        let options = FilterOptions::from_records(&records);
        Self {
            id: NEXT_DASHBOARD_ID.fetch_add(1, Ordering::Relaxed),
            records,
            options,
            engine,
            issued: AtomicU64::new(0),
            published: Mutex::new(Published::default()),
        }
    }

    pub fn records(&self) -> &[Sale] {
        &self.records
    }

    /// The values each filter can take, in first-appearance order.
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// The selection a fresh dashboard starts with: nothing filtered out.
    pub fn default_selection(&self) -> Selection {
        self.options.select_all()
    }

    /// Issues a ticket for `selection`, newer than every ticket issued before.
    pub fn begin(&self, selection: Selection) -> RefreshTicket {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        RefreshTicket {
            dashboard: self.id,
            generation,
            selection,
        }
    }

    pub fn compute(&self, ticket: &RefreshTicket) -> DashboardReport {
        self.engine.calculate(&self.records, &ticket.selection)
    }

    /// Installs `report` unless a newer ticket has already been published.
    ///
    /// Returns `Ok(false)` when the report was stale and dropped, and
    /// `ForeignTicket` when the ticket was issued by another dashboard.
    pub fn publish(&self, ticket: RefreshTicket, report: DashboardReport) -> Result<bool, AnalyticsError> {
        self.install(&ticket, Arc::new(report))
    }

    fn install(&self, ticket: &RefreshTicket, report: Arc<DashboardReport>) -> Result<bool, AnalyticsError> {
        if ticket.dashboard != self.id {
            return Err(AnalyticsError::ForeignTicket(ticket.generation));
        }

        let mut published = self
            .published
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if ticket.generation <= published.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = published.generation,
                "Discarded report superseded by a newer selection."
            );
            return Ok(false);
        }

        published.generation = ticket.generation;
        published.report = Some(report);
        Ok(true)
    }

    /// Runs a full refresh for `selection` and returns the report to show.
    ///
    /// That is the report just computed, unless a newer refresh was published
    /// first, in which case it is the newer one.
    pub fn refresh(&self, selection: Selection) -> Result<Arc<DashboardReport>, AnalyticsError> {
        let ticket = self.begin(selection);
        let report = Arc::new(self.compute(&ticket));
        if self.install(&ticket, Arc::clone(&report))? {
            tracing::info!(generation = ticket.generation, "Dashboard refreshed.");
            return Ok(report);
        }
        Ok(self.latest().unwrap_or(report))
    }

    /// The newest published report, if any refresh has completed.
    pub fn latest(&self) -> Option<Arc<DashboardReport>> {
        self.published
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .report
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::Dimension;
    use rust_decimal_macros::dec;

    fn dashboard() -> Dashboard {
        let day = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        let records: Vec<Sale> = ["Yangon", "Mandalay"]
            .iter()
            .map(|city| {
                Sale::new(day, None, dec!(10), dec!(8))
                    .with(Dimension::City, *city)
                    .with(Dimension::CustomerType, "Normal")
                    .with(Dimension::Gender, "Male")
            })
            .collect();
        Dashboard::new(records.into(), AnalyticsEngine::default())
    }

    #[test]
    fn refresh_publishes_the_report() {
        let dashboard = dashboard();
        assert!(dashboard.latest().is_none());

        let report = dashboard.refresh(dashboard.default_selection()).unwrap();
        assert_eq!(report.total_sales, 20);
        assert_eq!(dashboard.latest().unwrap().total_sales, 20);
    }

    #[test]
    fn slower_older_refresh_does_not_overwrite_newer() {
        let dashboard = dashboard();
        let older = dashboard.begin(dashboard.default_selection());

        let mut only_yangon = dashboard.default_selection();
        only_yangon.restrict(Dimension::City, ["Yangon"]).unwrap();
        let newer = dashboard.begin(only_yangon);

        let newer_report = dashboard.compute(&newer);
        assert!(dashboard.publish(newer, newer_report).unwrap());

        let older_report = dashboard.compute(&older);
        assert!(!dashboard.publish(older, older_report).unwrap());

        assert_eq!(dashboard.latest().unwrap().total_sales, 10);
    }

    #[test]
    fn tickets_from_elsewhere_are_rejected() {
        let first = dashboard();
        let second = dashboard();
        first.begin(Selection::default());
        let ticket = first.begin(Selection::default());
        let report = first.compute(&ticket);

        assert_eq!(
            second.publish(ticket, report),
            Err(AnalyticsError::ForeignTicket(2))
        );
    }

    #[test]
    fn ticket_with_a_matching_generation_from_another_dashboard_is_rejected() {
        let first = dashboard();
        let second = dashboard();
        let theirs = first.begin(first.default_selection());
        let ours = second.begin(Selection::default());
        assert_eq!(theirs.generation(), ours.generation());

        let report = first.compute(&theirs);
        assert_eq!(
            second.publish(theirs, report),
            Err(AnalyticsError::ForeignTicket(1))
        );
        assert!(second.latest().is_none());

        // The rightful owner still accepts it.
        let again = first.begin(first.default_selection());
        let report = first.compute(&again);
        assert!(first.publish(again, report).unwrap());
    }

    #[test]
    fn refresh_returns_the_report_it_published() {
        let dashboard = dashboard();
        let mut only_mandalay = dashboard.default_selection();
        only_mandalay.restrict(Dimension::City, ["Mandalay"]).unwrap();

        let report = dashboard.refresh(only_mandalay.clone()).unwrap();
        assert_eq!(report.selection, only_mandalay);
        assert!(Arc::ptr_eq(&report, &dashboard.latest().unwrap()));
    }

    #[test]
    fn same_selection_twice_gives_identical_reports() {
        let dashboard = dashboard();
        let a = dashboard.refresh(dashboard.default_selection()).unwrap();
        let b = dashboard.refresh(dashboard.default_selection()).unwrap();
        assert_eq!(*a, *b);
    }
}
