// Auth workflow: login / registration panel state and submission.
// Independent of booking; the page shell only receives the resulting
// identity through the return value of `submit`.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::{ApiError, AuthApi};

/// Account role, as the backend reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Host,
    Guest,
}

/// Identity returned by the auth service. Held in memory for the session
/// only; cleared on logout and gone on reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Which tab of the panel is active. The modes are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

/// Credential fields only accept printable ASCII (0x20-0x7E); anything else
/// is dropped before it reaches the field. A convenience filter, not a
/// security boundary: the backend remains the authority on credentials.
fn is_ascii_safe(value: &str) -> bool {
    value.chars().all(|c| matches!(c, ' '..='~'))
}

/// Login / registration panel state.
#[derive(Debug, Clone)]
pub struct AuthPanel {
    pub mode: AuthMode,
    name: String,
    email: String,
    password: String,
    pub error: Option<String>,
    pub info: Option<String>,
    submitting: bool,
}

impl AuthPanel {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            error: None,
            info: None,
            submitting: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The name field takes any text, including non-ASCII.
    pub fn set_name(&mut self, value: &str) {
        self.name = value.to_string();
    }

    /// Silently ignores the update when `value` contains non-printable or
    /// non-ASCII characters, leaving the field as it was.
    pub fn set_email(&mut self, value: &str) {
        if is_ascii_safe(value) {
            self.email = value.to_string();
        }
    }

    /// Same filter as [`set_email`](Self::set_email).
    pub fn set_password(&mut self, value: &str) {
        if is_ascii_safe(value) {
            self.password = value.to_string();
        }
    }

    pub fn set_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
    }

    /// Runs one login or registration attempt against the auth service.
    /// Both messages reset at the start of every attempt.
    ///
    /// Login success returns the identity for the shell to keep; the form
    /// fields stay populated. Registration success never authenticates:
    /// it switches back to the login tab, clears all three fields, and
    /// leaves an informational message instead. Any failure shows an
    /// inline error and preserves the fields.
    pub async fn submit(&mut self, auth: &dyn AuthApi) -> Option<AuthenticatedUser> {
        self.error = None;
        self.info = None;
        self.submitting = true;

        let identity = match self.mode {
            AuthMode::Login => match auth.login(&self.email, &self.password).await {
                Ok(user) => {
                    info!(email = %user.email, "login succeeded");
                    Some(user)
                }
                Err(err) => {
                    self.error = Some(attempt_message(&err, "Login failed. Please try again."));
                    None
                }
            },
            AuthMode::Register => {
                match auth.register(&self.name, &self.email, &self.password).await {
                    Ok(_) => {
                        // account created; the user logs in themselves
                        self.mode = AuthMode::Login;
                        self.name.clear();
                        self.email.clear();
                        self.password.clear();
                        self.info = Some("Registration complete. Please log in.".to_string());
                        None
                    }
                    Err(err) => {
                        self.error =
                            Some(attempt_message(&err, "Registration failed. Please try again."));
                        None
                    }
                }
            }
        };

        self.submitting = false;
        identity
    }
}

impl Default for AuthPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Service rejections carry their own message; transport failures render
/// as the generic fallback.
fn attempt_message(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Rejected { detail, .. } => detail.clone(),
        ApiError::Network(_) | ApiError::InvalidBody(_) => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockBackend;
    use std::sync::atomic::Ordering;

    #[test]
    fn credential_fields_ignore_non_ascii_updates() {
        let mut panel = AuthPanel::new();
        panel.set_email("guest@example.com");
        panel.set_email("게스트@example.com");
        assert_eq!(panel.email(), "guest@example.com");

        panel.set_password("guest1234");
        panel.set_password("비밀번호1234");
        assert_eq!(panel.password(), "guest1234");

        // control characters are rejected too
        panel.set_password("pass\tword");
        assert_eq!(panel.password(), "guest1234");
    }

    #[test]
    fn name_field_accepts_any_text() {
        let mut panel = AuthPanel::new();
        panel.set_name("게스트 밥");
        assert_eq!(panel.name(), "게스트 밥");
    }

    #[tokio::test]
    async fn login_success_hands_back_the_identity() {
        let backend = MockBackend::new();
        let mut panel = AuthPanel::new();
        panel.set_email("guest@example.com");
        panel.set_password("guest1234");

        let user = panel.submit(&backend).await;
        let user = user.expect("login should succeed");
        assert_eq!(user.email, "guest@example.com");
        assert_eq!(user.role, Role::Guest);
        // the form keeps its fields after a successful login
        assert_eq!(panel.email(), "guest@example.com");
        assert!(panel.error.is_none());
        assert_eq!(backend.login_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn login_failure_shows_the_service_detail() {
        let backend = MockBackend::new();
        backend.reject_auth("invalid credentials");
        let mut panel = AuthPanel::new();
        panel.set_email("guest@example.com");
        panel.set_password("wrong");

        let user = panel.submit(&backend).await;
        assert!(user.is_none());
        assert_eq!(panel.error.as_deref(), Some("invalid credentials"));
        // fields are preserved for a corrected retry
        assert_eq!(panel.email(), "guest@example.com");
        assert_eq!(panel.password(), "wrong");
    }

    #[tokio::test]
    async fn login_transport_failure_renders_generically() {
        let backend = MockBackend::new();
        backend.set_network_down(true);
        let mut panel = AuthPanel::new();
        panel.set_email("guest@example.com");
        panel.set_password("guest1234");

        assert!(panel.submit(&backend).await.is_none());
        assert_eq!(
            panel.error.as_deref(),
            Some("Login failed. Please try again.")
        );
    }

    #[tokio::test]
    async fn registration_success_resets_to_a_clean_login_tab() {
        let backend = MockBackend::new();
        let mut panel = AuthPanel::new();
        panel.set_mode(AuthMode::Register);
        panel.set_name("Guest Bob");
        panel.set_email("guest@example.com");
        panel.set_password("guest1234");

        let user = panel.submit(&backend).await;
        assert!(user.is_none(), "registration never auto-authenticates");
        assert_eq!(panel.mode, AuthMode::Login);
        assert_eq!(panel.name(), "");
        assert_eq!(panel.email(), "");
        assert_eq!(panel.password(), "");
        assert!(panel.info.is_some());
        assert!(panel.error.is_none());
        assert_eq!(backend.register_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn registration_failure_preserves_the_form() {
        let backend = MockBackend::new();
        backend.reject_auth("email already registered");
        let mut panel = AuthPanel::new();
        panel.set_mode(AuthMode::Register);
        panel.set_name("Guest Bob");
        panel.set_email("guest@example.com");
        panel.set_password("guest1234");

        assert!(panel.submit(&backend).await.is_none());
        assert_eq!(panel.mode, AuthMode::Register);
        assert_eq!(panel.error.as_deref(), Some("email already registered"));
        assert_eq!(panel.name(), "Guest Bob");
        assert_eq!(panel.email(), "guest@example.com");
    }

    #[tokio::test]
    async fn messages_reset_on_every_attempt() {
        let backend = MockBackend::new();
        backend.reject_auth("invalid credentials");
        let mut panel = AuthPanel::new();
        panel.set_email("guest@example.com");
        panel.set_password("wrong");
        panel.submit(&backend).await;
        assert!(panel.error.is_some());

        backend.reject_auth_clear();
        panel.set_password("guest1234");
        let user = panel.submit(&backend).await;
        assert!(user.is_some());
        assert!(panel.error.is_none());
        assert!(panel.info.is_none());
    }

    #[test]
    fn role_uses_lowercase_on_the_wire() {
        let body = r#"{"user_id":"u1","name":"Guest Bob","email":"guest@example.com","role":"guest"}"#;
        let user: AuthenticatedUser = serde_json::from_str(body).unwrap();
        assert_eq!(user.role, Role::Guest);
        assert_eq!(
            serde_json::to_value(Role::Host).unwrap(),
            serde_json::json!("host")
        );
    }
}
