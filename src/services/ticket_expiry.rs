use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::JobsConfig;
use crate::repositories::PgTicketStore;

/// Фоновая задача: закрывает активные билеты на прошедшие сеансы.
pub struct TicketExpiryJob {
    store: PgTicketStore,
    interval: Duration,
    grace_minutes: i32,
}

impl TicketExpiryJob {
    pub fn new(store: PgTicketStore, config: &JobsConfig) -> Self {
        Self {
            store,
            interval: Duration::from_secs(config.ticket_expiry_interval_seconds.max(1)),
            grace_minutes: config.ticket_completion_grace_minutes,
        }
    }

    /// Один проход. Ошибки только логируются, следующий проход повторит работу.
    pub async fn run_once(&self) -> u64 {
        match self.store.complete_past_tickets(self.grace_minutes).await {
            Ok(0) => 0,
            Ok(completed) => {
                info!("🎫 Completed {} tickets for past showtimes", completed);
                completed
            }
            Err(e) => {
                error!("🎫 Ticket expiry failed: {}", e);
                0
            }
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        info!(
            "Ticket expiry job started: every {:?}, grace {} min",
            self.interval, self.grace_minutes
        );
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            loop {
                ticker.tick().await;
                self.run_once().await;
            }
        })
    }
}
