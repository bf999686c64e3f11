use core_types::Dimension;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("The {0} dimension cannot be used as a filter")]
    UnsupportedFilter(Dimension),

    #[error("Refresh ticket {0} was not issued by this dashboard")]
    ForeignTicket(u64),
}
