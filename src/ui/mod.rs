pub mod batch_table;
pub mod console_store;
pub mod loading;
pub mod notification;
pub mod report_menu;
pub mod upload_modal;
