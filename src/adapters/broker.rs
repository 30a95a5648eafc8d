use crate::domain::model::{Job, JobPayload, JobStatus};
use crate::domain::ports::JobBroker;
use crate::utils::error::{AnalyzerError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;
use uuid::Uuid;

/// In-process broker: a multi-consumer channel carries job ids, a shared
/// table carries job state. The channel hands each id to exactly one
/// receiver, which is what gives workers exclusive claims.
#[derive(Clone)]
pub struct MemoryBroker {
    sender: Arc<StdMutex<Option<flume::Sender<Uuid>>>>,
    receiver: flume::Receiver<Uuid>,
    jobs: Arc<Mutex<HashMap<Uuid, Job>>>,
}

impl Default for MemoryBroker {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBroker {
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self {
            sender: Arc::new(StdMutex::new(Some(sender))),
            receiver,
            jobs: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Stop accepting new jobs. Workers drain what is already queued and
    /// then see `claim_next() == None`.
    pub fn close(&self) {
        self.sender.lock().expect("sender lock poisoned").take();
    }
}

#[async_trait]
impl JobBroker for MemoryBroker {
    async fn enqueue(&self, payload: JobPayload) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let job = Job {
            id,
            payload,
            status: JobStatus::Queued,
            submitted_at: Utc::now(),
        };
        self.jobs.lock().await.insert(id, job);

        let sender = self.sender.lock().expect("sender lock poisoned").clone();
        match sender {
            Some(tx) => tx.send(id).map_err(|_| AnalyzerError::Broker {
                message: "queue receiver dropped".to_string(),
            })?,
            None => {
                self.jobs.lock().await.remove(&id);
                return Err(AnalyzerError::Broker {
                    message: "job intake is closed".to_string(),
                });
            }
        }
        Ok(id)
    }

    async fn claim_next(&self) -> Result<Option<Job>> {
        loop {
            let id = match self.receiver.recv_async().await {
                Ok(id) => id,
                // Intake closed and queue drained.
                Err(_) => return Ok(None),
            };

            let mut jobs = self.jobs.lock().await;
            if let Some(job) = jobs.get_mut(&id) {
                if job.status == JobStatus::Queued {
                    job.status = JobStatus::Running;
                    return Ok(Some(job.clone()));
                }
            }
            // Id no longer claimable (rolled-back enqueue); keep draining.
        }
    }

    async fn complete(&self, id: Uuid, record_id: i64) -> Result<()> {
        let mut jobs = self.jobs.lock().await;
        let job = jobs.get_mut(&id).ok_or(AnalyzerError::JobNotFound(id))?;
        if job.status.is_terminal() {
            return Err(AnalyzerError::Broker {
                message: format!("job {id} already reached a terminal status"),
            });
        }
        job.status = JobStatus::Succeeded { record_id };
        Ok(())
    }

    async fn fail(&self, id: Uuid, reason: String) -> Result<()> {
        let mut jobs = self.jobs.lock().await;
        let job = jobs.get_mut(&id).ok_or(AnalyzerError::JobNotFound(id))?;
        if job.status.is_terminal() {
            return Err(AnalyzerError::Broker {
                message: format!("job {id} already reached a terminal status"),
            });
        }
        job.status = JobStatus::Failed { reason };
        Ok(())
    }

    async fn status(&self, id: Uuid) -> Result<JobStatus> {
        let jobs = self.jobs.lock().await;
        jobs.get(&id)
            .map(|job| job.status.clone())
            .ok_or(AnalyzerError::JobNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn payload(name: &str) -> JobPayload {
        JobPayload {
            stored_path: format!("uploads/{name}"),
            filename: name.to_string(),
        }
    }

    #[tokio::test]
    async fn job_moves_through_queued_running_succeeded() {
        let broker = MemoryBroker::new();
        let id = broker.enqueue(payload("a.txt")).await.unwrap();
        assert_eq!(broker.status(id).await.unwrap(), JobStatus::Queued);

        let claimed = broker.claim_next().await.unwrap().unwrap();
        assert_eq!(claimed.id, id);
        assert_eq!(broker.status(id).await.unwrap(), JobStatus::Running);

        broker.complete(id, 7).await.unwrap();
        assert_eq!(
            broker.status(id).await.unwrap(),
            JobStatus::Succeeded { record_id: 7 }
        );
    }

    #[tokio::test]
    async fn failed_jobs_keep_their_reason() {
        let broker = MemoryBroker::new();
        let id = broker.enqueue(payload("a.txt")).await.unwrap();
        broker.claim_next().await.unwrap().unwrap();
        broker.fail(id, "boom".to_string()).await.unwrap();
        assert_eq!(
            broker.status(id).await.unwrap(),
            JobStatus::Failed {
                reason: "boom".to_string()
            }
        );
    }

    #[tokio::test]
    async fn unknown_job_id_is_not_found() {
        let broker = MemoryBroker::new();
        let err = broker.status(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::JobNotFound(_)));
    }

    #[tokio::test]
    async fn terminal_jobs_never_transition_again() {
        let broker = MemoryBroker::new();
        let id = broker.enqueue(payload("a.txt")).await.unwrap();
        broker.claim_next().await.unwrap().unwrap();
        broker.complete(id, 1).await.unwrap();

        assert!(broker.complete(id, 2).await.is_err());
        assert!(broker.fail(id, "late".to_string()).await.is_err());
        assert_eq!(
            broker.status(id).await.unwrap(),
            JobStatus::Succeeded { record_id: 1 }
        );
    }

    #[tokio::test]
    async fn close_rejects_new_jobs_and_drains_to_none() {
        let broker = MemoryBroker::new();
        let id = broker.enqueue(payload("a.txt")).await.unwrap();
        broker.close();

        assert!(broker.enqueue(payload("b.txt")).await.is_err());
        assert_eq!(broker.claim_next().await.unwrap().unwrap().id, id);
        assert!(broker.claim_next().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn concurrent_claims_are_exclusive() {
        let broker = MemoryBroker::new();
        let mut expected = HashSet::new();
        for i in 0..25 {
            expected.insert(broker.enqueue(payload(&format!("{i}.txt"))).await.unwrap());
        }
        broker.close();

        let claim_all = |broker: MemoryBroker| async move {
            let mut claimed = Vec::new();
            while let Some(job) = broker.claim_next().await.unwrap() {
                claimed.push(job.id);
                tokio::task::yield_now().await;
            }
            claimed
        };

        let first = tokio::spawn(claim_all(broker.clone()));
        let second = tokio::spawn(claim_all(broker.clone()));
        let first = first.await.unwrap();
        let second = second.await.unwrap();

        let mut seen = HashSet::new();
        for id in first.iter().chain(second.iter()) {
            // Each job claimed exactly once across both workers.
            assert!(seen.insert(*id));
        }
        assert_eq!(seen, expected);
    }
}
