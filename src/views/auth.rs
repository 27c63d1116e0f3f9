use crate::app::App;
use crate::models::RegisterRequest;
use crate::routes::Route;

#[derive(Debug, Default)]
pub struct LoginView {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
}

impl LoginView {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            error: None,
        }
    }

    /// Sign in. On success returns the route the user lands on; on failure
    /// the reason is left in `error` and nothing is persisted.
    pub async fn submit(&mut self, app: &App) -> Option<Route> {
        self.error = None;
        match app.login(&self.email, &self.password).await {
            Ok(_) => Some(app.nav.current()),
            Err(e) => {
                tracing::debug!(error = %e, "Login failed");
                self.error = Some(e.display_message("Login failed. Please try again."));
                None
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct RegisterView {
    pub form: RegisterRequest,
    pub error: Option<String>,
}

impl RegisterView {
    pub fn new(form: RegisterRequest) -> Self {
        Self { form, error: None }
    }

    /// Create the account, then sign in with the same credentials.
    pub async fn submit(&mut self, app: &App) -> Option<Route> {
        self.error = None;
        match app.register(&self.form).await {
            Ok(_) => Some(app.nav.current()),
            Err(e) => {
                tracing::debug!(error = %e, "Registration failed");
                self.error = Some(e.display_message("Registration failed. Please try again."));
                None
            }
        }
    }
}
