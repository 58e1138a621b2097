// Job and task status endpoints
//
// Mutations answer with either a job id (`/hybridity/api/jobs`) or an
// interconnect task id (`/hybridity/api/interconnect/tasks`). The two
// report completion in different vocabularies; see `JobResult` and
// `TaskResult`.

use tracing::debug;

use crate::auth::AuthKind;
use crate::client::HcxClient;
use crate::error::Error;
use crate::models::{JobResult, TaskResult};

impl HcxClient {
    /// `GET /hybridity/api/jobs/{id}`
    pub async fn get_job(&self, job_id: &str) -> Result<JobResult, Error> {
        let url = self.api_url(&format!("/hybridity/api/jobs/{job_id}"))?;
        debug!(job_id, "fetching job status");
        self.get(AuthKind::Consumer, url).await
    }

    /// `GET /hybridity/api/interconnect/tasks/{id}`
    pub async fn get_task(&self, task_id: &str) -> Result<TaskResult, Error> {
        let url = self.api_url(&format!("/hybridity/api/interconnect/tasks/{task_id}"))?;
        debug!(task_id, "fetching task status");
        self.get(AuthKind::Consumer, url).await
    }
}
