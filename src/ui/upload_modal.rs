use std::rc::Rc;

use dioxus::prelude::*;
use tracing::warn;

use crate::app::{dispatch, Console};
use crate::models::PendingUpload;
use crate::ui::loading::LoadingOverlay;
use crate::workflow::Intent;

/// Ask the operator for one XML batch file and read it into memory.
async fn pick_batch_file() -> Option<PendingUpload> {
    use rfd::AsyncFileDialog;

    let handle = AsyncFileDialog::new()
        .set_title("Select batch file to upload")
        .add_filter("XML", &["xml"])
        .pick_file()
        .await?;

    let name = handle.file_name();
    let content = handle.read().await;
    if content.is_empty() {
        warn!("selected file {} is empty", name);
    }
    Some(PendingUpload::new(name, content))
}

/// Which modal controls accept input. Closing is never blocked by an
/// outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalControls {
    pub close: bool,
    pub choose: bool,
    pub remove: bool,
    pub upload: bool,
}

pub fn modal_controls(has_file: bool, loading: bool) -> ModalControls {
    ModalControls {
        close: true,
        choose: !loading,
        remove: has_file && !loading,
        upload: has_file && !loading,
    }
}

#[component]
pub fn UploadModal(
    open: bool,
    file_name: String,
    has_file: bool,
    reset_token: u64,
    loading: bool,
) -> Element {
    let console = use_context::<Rc<Console>>();

    if !open {
        return rsx! {};
    }

    let controls = modal_controls(has_file, loading);

    let choose = {
        let console = console.clone();
        move |_| {
            let console = console.clone();
            spawn(async move {
                if let Some(upload) = pick_batch_file().await {
                    console.dispatch(Intent::SelectFile(upload)).await;
                }
            });
        }
    };

    // Re-keyed on every clear so no stale selection survives.
    let file_row = rsx! {
        div { key: "{reset_token}", class: "form-row",
            button { class: "btn-secondary", disabled: !controls.choose, onclick: choose, "Choose file" }
            if has_file {
                span { class: "file-name", "{file_name}" }
                button {
                    class: "btn-remove",
                    disabled: !controls.remove,
                    onclick: {
                        let console = console.clone();
                        move |_| dispatch(&console, Intent::ClearFile)
                    },
                    "Remove"
                }
            } else {
                span { class: "file-name muted", "No file selected" }
            }
        }
    };

    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal",
                div { class: "modal-header",
                    span { class: "section-title", "Upload Batch File" }
                    button {
                        class: "modal-close",
                        disabled: !controls.close,
                        onclick: {
                            let console = console.clone();
                            move |_| dispatch(&console, Intent::CloseUploadSurface)
                        },
                        "\u{2715}"
                    }
                }
                // The overlay covers the body only; the header stays usable.
                div { class: "modal-body",
                    {file_row}
                    div { class: "form-actions",
                        button {
                            class: "btn-primary",
                            disabled: !controls.upload,
                            onclick: move |_| dispatch(&console, Intent::SubmitUpload),
                            if loading { "Uploading..." } else { "Upload" }
                        }
                    }
                    if loading {
                        LoadingOverlay {}
                    }
                }
            }
        }
    }
}
