use std::rc::Rc;

use dioxus::prelude::*;

use crate::app::{dispatch, Console};
use crate::models::{Batch, BatchAction, ReportKind};
use crate::workflow::{Intent, WorkflowState};

/// The batch the report menu is open for, if the selection still points at
/// a batch that offers reports.
pub fn report_menu_target(state: &WorkflowState) -> Option<&Batch> {
    state
        .selected_batch()
        .filter(|b| b.status.action() == Some(BatchAction::ReportMenu))
}

#[component]
pub fn ReportMenu(target: Option<Batch>) -> Element {
    let console = use_context::<Rc<Console>>();

    let Some(batch) = target else {
        return rsx! {};
    };
    let name = batch.batch_name.clone();

    rsx! {
        div {
            class: "menu-backdrop",
            onclick: {
                let console = console.clone();
                move |_| dispatch(&console, Intent::DismissMenu)
            },
            div {
                class: "report-menu",
                onclick: move |e: MouseEvent| e.stop_propagation(),
                div { class: "menu-title", "Reports for {name}" }
                for kind in ReportKind::ALL {
                    {
                        let console = console.clone();
                        let id = batch.id.clone();
                        rsx! {
                            div {
                                key: "{kind.agg_type()}",
                                class: "menu-item",
                                onclick: move |_| dispatch(&console, Intent::RequestReport(id.clone(), kind)),
                                "{kind.label()}"
                            }
                        }
                    }
                }
            }
        }
    }
}
