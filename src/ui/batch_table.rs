use std::rc::Rc;

use dioxus::prelude::*;

use crate::app::{dispatch, Console};
use crate::models::{Batch, BatchAction};
use crate::workflow::Intent;

/// What one table row shows. The action is picked once per batch from its
/// status.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: String,
    pub date: String,
    pub name: String,
    pub counts: String,
    pub status: String,
    pub action: Option<BatchAction>,
}

pub fn row_view(batch: &Batch) -> RowView {
    RowView {
        id: batch.id.clone(),
        date: batch
            .created_at()
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| batch.date_created.clone()),
        name: batch.batch_name.clone(),
        counts: format!("{} / {}", batch.valid_transactions, batch.total_transactions),
        status: batch.status.to_string(),
        action: batch.status.action(),
    }
}

#[component]
pub fn BatchTable(batches: Vec<Batch>) -> Element {
    rsx! {
        div { class: "section-title", "Batches" }
        if batches.is_empty() {
            div { class: "empty", "No batches yet. Upload a file to create one." }
        } else {
            table { class: "batch-table",
                thead {
                    tr {
                        th { "Date" }
                        th { "File Name" }
                        th { "Valid Transactions" }
                        th { "Status" }
                        th { "Actions" }
                    }
                }
                tbody {
                    for batch in batches.iter() {
                        BatchRow { key: "{batch.id}", row: row_view(batch) }
                    }
                }
            }
        }
    }
}

#[component]
fn BatchRow(row: RowView) -> Element {
    let console = use_context::<Rc<Console>>();

    let badge_class = match row.action {
        Some(BatchAction::InvokePayment) => "badge badge-created",
        Some(BatchAction::ReportMenu) => "badge badge-completed",
        None => "badge badge-idle",
    };
    let id = row.id.clone();

    rsx! {
        tr { class: "batch-row",
            td { "{row.date}" }
            td { "{row.name}" }
            td { "{row.counts}" }
            td { span { class: "{badge_class}", "{row.status}" } }
            td {
                match row.action {
                    Some(BatchAction::InvokePayment) => rsx! {
                        button {
                            class: "btn-start",
                            onclick: move |_| dispatch(&console, Intent::SubmitInvokePayment(id.clone())),
                            "Invoke Payment"
                        }
                    },
                    Some(BatchAction::ReportMenu) => rsx! {
                        button {
                            class: "btn-more",
                            title: "Reports",
                            onclick: move |_| dispatch(&console, Intent::SelectForMenu(id.clone())),
                            "\u{22EE}" // vertical ellipsis
                        }
                    },
                    None => rsx! {},
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::batch;

    #[test]
    fn created_batch_offers_invoke_only() {
        let row = row_view(&batch("b1", "Created"));
        assert_eq!(row.action, Some(BatchAction::InvokePayment));
        assert_eq!(row.counts, "5 / 5");
        assert_eq!(row.status, "Created");
        assert_eq!(row.date, "2023-09-21 10:15");
    }

    #[test]
    fn completed_batch_offers_report_menu() {
        assert_eq!(row_view(&batch("b1", "Completed")).action, Some(BatchAction::ReportMenu));
    }

    #[test]
    fn other_statuses_are_display_only() {
        for status in ["Uploaded", "Failed", "Paused", ""] {
            assert_eq!(row_view(&batch("b1", status)).action, None, "status {status:?}");
        }
    }

    #[test]
    fn unparsed_date_is_shown_as_sent() {
        let mut b = batch("b1", "Created");
        b.date_created = "yesterday".into();
        assert_eq!(row_view(&b).date, "yesterday");
    }

    #[test]
    fn partial_validity_shows_both_counts() {
        let mut b = batch("b1", "Created");
        b.valid_transactions = 3;
        b.total_transactions = 7;
        assert_eq!(row_view(&b).counts, "3 / 7");
    }
}
