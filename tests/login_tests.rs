mod common;

#[cfg(test)]
pub mod login_tests {
    use super::common::*;

    use boavila::views::*;

    #[tokio::test]
    async fn test_submit_success_invokes_callback() {
        let client = FakeClient::default();
        let mut view = LoginView::new("admin@boavila.test", "secret");

        let mut called = 0;
        let outcome = view.submit(&client, || called += 1).await;

        assert_eq!(outcome, LoginOutcome::SignedIn);
        assert_eq!(called, 1);
        assert_eq!(view.error(), None);
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_email_and_shows_message() {
        let client = FakeClient::default().failing_auth();
        let mut view = LoginView::new("admin@boavila.test", "wrong");

        let mut called = false;
        let outcome = view.submit(&client, || called = true).await;

        assert_eq!(outcome, LoginOutcome::Failed);
        assert!(!called);
        assert_eq!(view.email, "admin@boavila.test");
        assert_eq!(view.error(), Some("Invalid login credentials"));
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn test_resubmit_clears_previous_error() {
        let client = FakeClient::default();
        let mut view = LoginView::new("admin@boavila.test", "secret");
        view.reject("Demasiados intentos");

        view.submit(&client, || {}).await;
        assert_eq!(view.error(), None);
    }
}
