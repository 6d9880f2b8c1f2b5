use std::rc::Rc;

use dioxus::prelude::*;

use crate::app::{dispatch, Console};
use crate::config::ConsoleConfig;
use crate::models::{Notification, Severity};
use crate::workflow::Intent;

// ─── NotificationBanner Component ─────────────────────────────
// One message at a time; a new one replaces the old.

#[component]
pub fn NotificationBanner(notification: Option<Notification>) -> Element {
    let console = use_context::<Rc<Console>>();
    let ttl = use_context::<ConsoleConfig>().notification_ttl();

    // Auto-dismiss check every second
    let expirer = console.clone();
    use_effect(move || {
        let console = expirer.clone();
        spawn(async move {
            loop {
                tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                console.expire_notification(ttl);
            }
        });
    });

    let Some(notif) = notification else {
        return rsx! {};
    };

    let level_class = match notif.severity {
        Severity::Success => "notif-success",
        Severity::Error => "notif-error",
    };
    let msg = notif.text.clone();

    rsx! {
        div { class: "notification-stack",
            div {
                class: "notification-toast {level_class}",
                span { class: "notif-message", "{msg}" }
                button {
                    class: "notif-close",
                    onclick: move |e: MouseEvent| {
                        e.stop_propagation();
                        dispatch(&console, Intent::DismissNotification);
                    },
                    "\u{2715}"
                }
            }
        }
    }
}
