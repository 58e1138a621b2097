// ── Async operation polling ──
//
// Mutations answer with a job id or an interconnect task id; completion is
// only observable by polling. Jobs report `isDone`/`didFail` booleans and
// tasks report a status string, so each implements `OperationStatus` on
// its own and the poll loop only sees the three-way `OperationState`.

use std::future::Future;
use std::time::Duration;

use hcx_api::HcxClient;
use hcx_api::models::{JobResult, TaskResult, TaskStatus};
use strum::Display;
use tracing::debug;

use crate::error::{CoreError, ErrorContext};

/// Where an operation stands, as far as the poll loop cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationState {
    Running,
    Succeeded,
    Failed,
}

/// A status payload the poller can interpret.
pub trait OperationStatus {
    fn state(&self) -> OperationState;

    /// Short status text for logs and failure messages.
    fn describe(&self) -> String;
}

impl OperationStatus for JobResult {
    /// A job reporting both `didFail` and `isDone` has failed.
    fn state(&self) -> OperationState {
        if self.did_fail {
            OperationState::Failed
        } else if self.is_done {
            OperationState::Succeeded
        } else {
            OperationState::Running
        }
    }

    fn describe(&self) -> String {
        if self.did_fail {
            "job reported didFail".into()
        } else if self.is_done {
            "done".into()
        } else {
            format!("{}% complete", self.percent_complete)
        }
    }
}

impl OperationStatus for TaskResult {
    fn state(&self) -> OperationState {
        match &self.status {
            TaskStatus::Success => OperationState::Succeeded,
            TaskStatus::Failed => OperationState::Failed,
            TaskStatus::InProgress(_) => OperationState::Running,
        }
    }

    fn describe(&self) -> String {
        format!("task status {}", self.status)
    }
}

/// Which tracking resource an id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum OperationKind {
    #[strum(serialize = "job")]
    Job,
    #[strum(serialize = "task")]
    Task,
}

/// Interval and optional bound of a poll loop.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    pub interval: Duration,
    /// Upper bound on status fetches. `None` polls until a terminal state.
    pub max_attempts: Option<u32>,
}

/// Poll `fetch` until the operation reaches a terminal state.
///
/// Returns the number of sleeps taken before success. A failure state ends
/// the loop immediately with `OperationFailed`; reaching
/// `policy.max_attempts` ends it with `PollLimitReached`. Fetch errors are
/// not retried.
pub async fn await_completion<S, F, Fut>(
    kind: OperationKind,
    id: &str,
    policy: &PollPolicy,
    mut fetch: F,
) -> Result<u32, CoreError>
where
    S: OperationStatus,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<S, hcx_api::Error>>,
{
    let mut polls: u32 = 0;
    loop {
        let status = fetch()
            .await
            .with_context(|| format!("polling {kind} {id}"))?;
        polls += 1;

        match status.state() {
            OperationState::Succeeded => {
                debug!(%kind, id, polls, "operation finished");
                return Ok(polls - 1);
            }
            OperationState::Failed => {
                return Err(CoreError::OperationFailed {
                    operation: kind.to_string(),
                    id: id.to_owned(),
                    reason: status.describe(),
                });
            }
            OperationState::Running => {}
        }

        if policy.max_attempts.is_some_and(|max| polls >= max) {
            return Err(CoreError::PollLimitReached {
                operation: kind.to_string(),
                id: id.to_owned(),
                attempts: polls,
            });
        }
        debug!(%kind, id, polls, status = %status.describe(), "operation still running");
        tokio::time::sleep(policy.interval).await;
    }
}

/// Wait for a job (`/hybridity/api/jobs/{id}`).
pub async fn await_job(client: &HcxClient, job_id: &str, policy: &PollPolicy) -> Result<u32, CoreError> {
    await_completion(OperationKind::Job, job_id, policy, || client.get_job(job_id)).await
}

/// Wait for an interconnect task (`/hybridity/api/interconnect/tasks/{id}`).
pub async fn await_task(
    client: &HcxClient,
    task_id: &str,
    policy: &PollPolicy,
) -> Result<u32, CoreError> {
    await_completion(OperationKind::Task, task_id, policy, || client.get_task(task_id)).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use tokio::time::Instant;

    fn job(is_done: bool, did_fail: bool) -> JobResult {
        JobResult {
            job_id: "job-1".into(),
            is_done,
            did_fail,
            ..JobResult::default()
        }
    }

    fn policy(max_attempts: Option<u32>) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_secs(5),
            max_attempts,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn job_completes_after_two_sleeps() {
        let mut script = vec![job(false, false), job(false, false), job(true, false)].into_iter();
        let started = Instant::now();

        let sleeps = await_completion(OperationKind::Job, "job-1", &policy(None), || {
            let next = script.next().unwrap();
            async move { Ok::<_, hcx_api::Error>(next) }
        })
        .await
        .unwrap();

        assert_eq!(sleeps, 2);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(10) && elapsed < Duration::from_secs(11));
    }

    #[tokio::test(start_paused = true)]
    async fn failure_is_terminal() {
        let mut script = vec![job(false, false), job(true, true), job(true, false)].into_iter();
        let fetches = Cell::new(0);

        let err = await_completion(OperationKind::Job, "job-7", &policy(None), || {
            fetches.set(fetches.get() + 1);
            let next = script.next().unwrap();
            async move { Ok::<_, hcx_api::Error>(next) }
        })
        .await
        .unwrap_err();

        assert_eq!(fetches.get(), 2);
        assert!(matches!(err, CoreError::OperationFailed { ref id, .. } if id == "job-7"));
    }

    #[tokio::test(start_paused = true)]
    async fn attempt_cap_stops_polling() {
        let fetches = Cell::new(0);

        let err = await_completion(OperationKind::Task, "task-3", &policy(Some(3)), || {
            fetches.set(fetches.get() + 1);
            async {
                Ok::<_, hcx_api::Error>(TaskResult {
                    interconnect_task_id: "task-3".into(),
                    status: TaskStatus::InProgress("RUNNING".into()),
                })
            }
        })
        .await
        .unwrap_err();

        assert_eq!(fetches.get(), 3);
        assert!(matches!(err, CoreError::PollLimitReached { attempts: 3, .. }));
    }

    #[test]
    fn task_vocabulary_maps_to_states() {
        let task = |status| TaskResult {
            interconnect_task_id: "t".into(),
            status,
        };
        assert_eq!(task(TaskStatus::Success).state(), OperationState::Succeeded);
        assert_eq!(task(TaskStatus::Failed).state(), OperationState::Failed);
        assert_eq!(
            task(TaskStatus::InProgress("QUEUED".into())).state(),
            OperationState::Running
        );
    }
}
