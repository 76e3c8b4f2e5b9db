use std::future::Future;

use anyhow::Result;
use chrono::{NaiveTime, Timelike};
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

/// Timer-driven daily trigger. Tasks register against a wall-clock time
/// and can be cancelled with the id handed back at registration.
pub struct Scheduler {
    inner: JobScheduler,
}

impl Scheduler {
    pub async fn new() -> Result<Self> {
        Ok(Self {
            inner: JobScheduler::new().await?,
        })
    }

    /// Fire `task` once per day at `at`. Each firing gets a fresh future
    /// from the closure.
    pub async fn register_daily<F, Fut>(&mut self, at: NaiveTime, task: F) -> Result<Uuid>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let schedule = format!("0 {} {} * * *", at.minute(), at.hour());
        let job = Job::new_async(schedule.as_str(), move |_id, _sched| Box::pin(task()))?;
        let id = self.inner.add(job).await?;
        Ok(id)
    }

    pub async fn cancel(&mut self, id: Uuid) -> Result<()> {
        self.inner.remove(&id).await?;
        Ok(())
    }

    pub async fn start(&mut self) -> Result<()> {
        self.inner.start().await?;
        Ok(())
    }

    pub async fn shutdown(&mut self) -> Result<()> {
        self.inner.shutdown().await?;
        Ok(())
    }
}
