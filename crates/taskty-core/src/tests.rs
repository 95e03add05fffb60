//! Application Scenario Tests
//!
//! Full sign-in / task / report flows through `Taskty` with the in-memory
//! backend and a recording view.

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::backend::MemoryBackend;
    use crate::config::AppConfig;
    use crate::test_support::{RecordingView, ViewEvent};
    use crate::view::{MessageKind, ReportView};
    use crate::Taskty;

    type App = Taskty<MemoryBackend, MemoryBackend, RecordingView>;

    fn setup() -> (MemoryBackend, Rc<RecordingView>, App) {
        let backend = MemoryBackend::new();
        let view = Rc::new(RecordingView::new());
        let shared = Rc::new(backend.clone());
        let app = Taskty::new(shared.clone(), shared, view.clone(), &AppConfig::default());
        app.start();
        (backend, view, app)
    }

    #[tokio::test]
    async fn test_start_shows_auth_view() {
        let (backend, view, app) = setup();
        assert_eq!(view.events(), vec![ViewEvent::ShowAuth, ViewEvent::ReportControl(false)]);
        assert_eq!(backend.session_listeners(), 1);
        assert!(app.session().is_none());
    }

    #[tokio::test]
    async fn test_register_scenario() {
        let (backend, view, app) = setup();
        app.auth.register("Ann", "ann@x.com", "secret1").await;

        // the session transition starts the task subscription before the rename
        assert_eq!(
            backend.calls(),
            vec!["create_account", "watch", "update_display_name"]
        );
        assert_eq!(app.session().unwrap().display_name.as_deref(), Some("Ann"));
        assert!(view.events().contains(&ViewEvent::ShowApp("Ann".to_string())));
        assert!(view.messages().contains(&(
            "Account created successfully! Welcome to Taskty! 🎉".to_string(),
            MessageKind::Success
        )));
        assert!(view.events().contains(&ViewEvent::ClearAuthInputs));
        assert!(app.tasks.has_task_subscription());
        assert!(app.tasks.report_control_visible());
    }

    #[tokio::test]
    async fn test_empty_report_scenario() {
        let (_backend, view, app) = setup();
        app.auth.register("Ann", "ann@x.com", "secret1").await;
        app.tasks.generate_report();

        let Some(ReportView::Ready(report)) = view.last_report() else {
            panic!("report not rendered");
        };
        assert!(report.is_empty());
        assert_eq!(report.stats.total, 0);
        assert!(crate::domain::Report::EMPTY_PLACEHOLDER.starts_with("No tasks found"));
    }

    #[tokio::test]
    async fn test_sign_out_releases_everything() {
        let (backend, view, app) = setup();
        app.auth.register("Ann", "ann@x.com", "secret1").await;
        app.tasks.add_task("first").await;
        app.tasks.generate_report();
        assert_eq!(backend.active_watchers(), 2);

        app.auth.logout().await;
        assert_eq!(backend.active_watchers(), 0);
        assert!(!app.tasks.has_task_subscription());
        assert!(!app.tasks.has_report_subscription());
        assert!(!app.tasks.report_control_visible());
        assert!(app.tasks.latest_tasks().is_empty());
        assert_eq!(view.events().iter().filter(|e| **e == ViewEvent::ShowAuth).count(), 2);
    }

    #[tokio::test]
    async fn test_tasks_survive_sign_out_and_back_in() {
        let (_backend, view, app) = setup();
        app.auth.register("Ann", "ann@x.com", "secret1").await;
        app.tasks.add_task("persisted").await;
        app.auth.logout().await;

        app.auth.login("ann@x.com", "secret1").await;
        let (tasks, stats) = view.last_render().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "persisted");
        assert_eq!(stats.summary(), "1 total • 0 done");
    }

    #[tokio::test]
    async fn test_users_see_only_their_tasks() {
        let (_backend, view, app) = setup();
        app.auth.register("Ann", "ann@x.com", "secret1").await;
        app.tasks.add_task("ann's task").await;
        app.auth.logout().await;

        app.auth.register("Bob", "bob@x.com", "secret2").await;
        let (tasks, _) = view.last_render().unwrap();
        assert!(tasks.is_empty());
    }
}
