use crate::app::App;
use crate::error::{ClientError, ClientResult};
use crate::models::{Report, ReportStatus};

/// Moderation console.
///
/// Actions take `&mut self`, so at most one runs at a time. Failures land in
/// `error` as inline text.
#[derive(Debug)]
pub struct AdminView {
    pub status: ReportStatus,
    pub reports: Vec<Report>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for AdminView {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminView {
    pub fn new() -> Self {
        Self {
            status: ReportStatus::Pending,
            reports: Vec::new(),
            loading: true,
            error: None,
        }
    }

    /// Switch the status filter and reload.
    pub async fn set_status(&mut self, app: &App, status: ReportStatus) -> ClientResult<()> {
        self.status = status;
        self.load(app).await
    }

    /// Load reports for the current filter. Only reports with that status
    /// are kept, whatever the server sends back.
    pub async fn load(&mut self, app: &App) -> ClientResult<()> {
        self.loading = true;
        self.error = None;
        let result = app.api.get_reports(self.status).await;
        self.loading = false;

        match result {
            Ok(reports) => {
                let status = self.status;
                self.reports = reports.into_iter().filter(|r| r.status == status).collect();
                Ok(())
            }
            Err(e) => Err(self.fail(e, "Failed to load reports")),
        }
    }

    pub async fn review(&mut self, app: &App, report_id: i64, next: ReportStatus) -> ClientResult<()> {
        self.error = None;
        if let Err(e) = app.api.review_report(report_id, next).await {
            return Err(self.fail(e, "Failed to review report"));
        }
        self.load(app).await
    }

    /// Remove the content a report points at. Only posts and comments can
    /// be removed.
    pub async fn delete_content(&mut self, app: &App, report_id: i64) -> ClientResult<()> {
        self.error = None;
        let Some(report) = self.reports.iter().find(|r| r.id == report_id) else {
            return Err(ClientError::Invalid(format!(
                "Report {} is not listed",
                report_id
            )));
        };
        if !report.target_type.is_deletable() {
            return Err(ClientError::Invalid(format!(
                "Cannot delete {} content",
                report.target_type
            )));
        }

        let (target_type, target_id) = (report.target_type, report.target_id);
        if let Err(e) = app.api.delete_content(target_type, target_id).await {
            return Err(self.fail(e, "Failed to delete content"));
        }
        self.load(app).await
    }

    fn fail(&mut self, error: ClientError, fallback: &str) -> ClientError {
        tracing::warn!(error = %error, "{}", fallback);
        self.error = Some(error.display_message(fallback));
        error
    }
}
