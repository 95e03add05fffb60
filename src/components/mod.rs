//! UI Components
//!
//! Leptos components over the UI store and the controllers.

mod auth_panel;
mod loading_button;
mod message_banner;
mod new_task_form;
mod report_modal;
mod task_board;
mod task_list;

pub use auth_panel::AuthPanel;
pub use loading_button::LoadingButton;
pub use message_banner::MessageBanner;
pub use new_task_form::NewTaskForm;
pub use report_modal::ReportModal;
pub use task_board::TaskBoard;
pub use task_list::TaskList;
