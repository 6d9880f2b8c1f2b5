use dioxus::prelude::*;

#[component]
pub fn LoadingOverlay() -> Element {
    rsx! {
        div { class: "loading-overlay",
            div { class: "spinner" }
        }
    }
}
