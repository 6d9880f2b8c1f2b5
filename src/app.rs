use std::rc::Rc;

use dioxus::prelude::*;

use crate::{
	config::ConsoleConfig,
	engine::{backend::HttpBackend, gateway::ApiGateway, report::ReportSaver},
	ui::{
		batch_table::BatchTable,
		console_store::ConsoleStore,
		loading::LoadingOverlay,
		notification::NotificationBanner,
		report_menu::{report_menu_target, ReportMenu},
		upload_modal::UploadModal,
	},
	workflow::{Intent, WorkflowController, WorkflowState},
};

const MAIN_CSS: Asset = asset!("/assets/main.css");

pub type Console = WorkflowController<HttpBackend, ConsoleStore>;

/// Hand an intent to the controller without blocking the event handler.
pub fn dispatch(console: &Rc<Console>, intent: Intent) {
	let console = console.clone();
	spawn(async move {
		console.dispatch(intent).await;
	});
}

#[derive(Clone)]
pub struct StartupError(pub String);

#[component]
pub fn StartupErrorApp() -> Element {
	let err = use_context::<StartupError>();

	rsx! {
		document::Stylesheet { href: MAIN_CSS }
		div { class: "app",
			div { class: "header",
				h1 { "Payment Management System" }
			}
			div { class: "startup-error-banner", "Could not start: {err.0}" }
		}
	}
}

#[component]
pub fn App() -> Element {
	let config = use_context::<ConsoleConfig>();
	let backend = use_context::<HttpBackend>();
	let state = use_signal(WorkflowState::default);
	let console = use_context_provider(|| {
		Rc::new(WorkflowController::new(
			ApiGateway::new(backend, ReportSaver::new(config.report_dir())),
			ConsoleStore(state),
		))
	});

	// Initial batch load
	let loader = console.clone();
	use_effect(move || {
		let console = loader.clone();
		spawn(async move {
			console.refresh().await;
		});
	});

	let view = state.read();
	let batches = view.batches.clone();
	let loading = view.is_loading;
	let notification = view
		.active_notification
		.as_ref()
		.map(|active| active.notification.clone());
	let menu_target = report_menu_target(&view).cloned();
	let upload_open = view.upload_open;
	let has_file = view.staging.has_file();
	let file_name = view.staging.display_name().to_string();
	let reset_token = view.staging.reset_token();
	drop(view);

	rsx! {
		document::Stylesheet { href: MAIN_CSS }
		div { class: "app",
			div { class: "header",
				h1 { "Payment Management System" }
				button {
					class: "btn-primary",
					disabled: loading,
					onclick: move |_| dispatch(&console, Intent::OpenUploadSurface),
					"Add"
				}
			}
			if loading && !upload_open {
				LoadingOverlay {}
			}
			BatchTable { batches }
			ReportMenu { target: menu_target }
			UploadModal {
				open: upload_open,
				file_name,
				has_file,
				reset_token,
				loading,
			}
			NotificationBanner { notification }
		}
	}
}
