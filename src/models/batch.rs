use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// A server-tracked unit of payment work created from one uploaded file.
/// Read-only on the client: status changes are only observed by refetching.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Batch {
    #[serde(rename = "_id")]
    pub id: String,
    /// Kept as sent; see [`Batch::created_at`].
    pub date_created: String,
    pub batch_name: String,
    pub valid_transactions: u64,
    pub total_transactions: u64,
    #[serde(default)]
    pub invalid_transactions: u64,
    pub status: BatchStatus,
}

impl Batch {
    /// Parsed creation time. The server writes naive UTC timestamps;
    /// offset-qualified ones are accepted too. `None` leaves display to
    /// the raw text.
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.date_created) {
            return Some(dt.naive_utc());
        }
        NaiveDateTime::parse_from_str(&self.date_created, "%Y-%m-%dT%H:%M:%S%.f").ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchStatus {
    /// Entries are still being processed by the server.
    Uploaded,
    /// Ready for payment invocation.
    Created,
    /// All payments have been processed.
    Completed,
    Failed,
    Other(String),
}

impl BatchStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BatchStatus::Uploaded => "Uploaded",
            BatchStatus::Created => "Created",
            BatchStatus::Completed => "Completed",
            BatchStatus::Failed => "Failed",
            BatchStatus::Other(s) => s,
        }
    }

    /// The single UI action a batch in this status exposes, if any.
    pub fn action(&self) -> Option<BatchAction> {
        match self {
            BatchStatus::Created => Some(BatchAction::InvokePayment),
            BatchStatus::Completed => Some(BatchAction::ReportMenu),
            _ => None,
        }
    }
}

impl From<String> for BatchStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Uploaded" => BatchStatus::Uploaded,
            "Created" => BatchStatus::Created,
            "Completed" => BatchStatus::Completed,
            "Failed" => BatchStatus::Failed,
            _ => BatchStatus::Other(s),
        }
    }
}

impl<'de> Deserialize<'de> for BatchStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(BatchStatus::from)
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchAction {
    InvokePayment,
    ReportMenu,
}

/// Report grouping requested at download time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    BySourceAccount,
    ByBranch,
    ByPaymentMetadata,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [
        ReportKind::BySourceAccount,
        ReportKind::ByBranch,
        ReportKind::ByPaymentMetadata,
    ];

    /// Path segment used by the reports endpoint.
    pub fn agg_type(self) -> &'static str {
        match self {
            ReportKind::BySourceAccount => "source_account",
            ReportKind::ByBranch => "branch",
            ReportKind::ByPaymentMetadata => "payments",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportKind::BySourceAccount => {
                "CSV report of total funds paid out per unique source account"
            }
            ReportKind::ByBranch => "CSV report of total funds paid out per Dunkin branch",
            ReportKind::ByPaymentMetadata => "CSV report of all payments metadata for this batch",
        }
    }
}
