use crate::app::App;
use crate::error::ClientResult;
use crate::models::ProfileUpdate;
use crate::views::logged;

#[derive(Debug, Default)]
pub struct SettingsView {
    pub form: ProfileUpdate,
    pub saved: bool,
}

impl SettingsView {
    /// Seed the form from the signed-in user.
    pub fn new(app: &App) -> Self {
        let form = app
            .session
            .user()
            .map(|u| ProfileUpdate::from(&u))
            .unwrap_or_default();
        Self { form, saved: false }
    }

    /// Apply an edit to the form; any edit clears the "saved" flag.
    pub fn edit(&mut self, change: impl FnOnce(&mut ProfileUpdate)) {
        change(&mut self.form);
        self.saved = false;
    }

    /// Save the profile, then merge the form into the stored user.
    pub async fn submit(&mut self, app: &App) -> ClientResult<()> {
        let user = app.require_user()?;
        logged(
            "update profile",
            app.api.update_profile(user.id, &self.form).await,
        )?;
        app.session.update_user(&self.form)?;
        self.saved = true;
        Ok(())
    }
}
