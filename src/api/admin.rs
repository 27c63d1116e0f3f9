use reqwest::Method;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{Report, ReportStatus, ReportTarget, ReviewReport};

impl ApiClient {
    pub async fn get_reports(&self, status: ReportStatus) -> ClientResult<Vec<Report>> {
        let mut url = self.url("/admin/reports")?;
        url.query_pairs_mut().append_pair("status", status.as_str());
        self.get_list_url(url).await
    }

    pub async fn review_report(&self, id: i64, status: ReportStatus) -> ClientResult<()> {
        let body = ReviewReport { status };
        self.send_empty(Method::PUT, &format!("/admin/reports/{}", id), Some(&body))
            .await
    }

    pub async fn delete_content(&self, target_type: ReportTarget, target_id: i64) -> ClientResult<()> {
        self.call(
            Method::DELETE,
            &format!("/admin/content/{}/{}", target_type, target_id),
        )
        .await
    }
}
