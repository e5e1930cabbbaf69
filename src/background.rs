use std::sync::Arc;
use std::time::Duration;

use crate::domain::models::notification::{
    NotificationJob, KIND_CONSUME, KIND_MEMBER_CREATED, KIND_RECHARGE, STATUS_FAILED,
    STATUS_PENDING, STATUS_SENT,
};
use crate::error::AppError;
use crate::state::AppState;
use tokio::time::sleep;
use tracing::{error, info, info_span, warn, Instrument};

const MAX_ATTEMPTS: i64 = 3;

/// Drains the notification outbox and hands each job to the SMS gateway.
/// Delivery failures are retried a few times and then parked as FAILED;
/// they never surface to the request that enqueued them.
pub async fn start_notification_worker(state: Arc<AppState>) {
    info!("Starting notification dispatch worker...");

    loop {
        match state.notification_repo.find_pending(10).await {
            Ok(jobs) => {
                for job in jobs {
                    let span = info_span!(
                        "notification_job",
                        job_id = %job.id,
                        kind = %job.kind,
                        store_id = %job.store_id
                    );

                    async {
                        let attempts = job.attempts + 1;
                        match dispatch(&state, &job).await {
                            Ok(_) => {
                                if let Err(e) = state
                                    .notification_repo
                                    .mark(&job.id, STATUS_SENT, attempts, None)
                                    .await
                                {
                                    error!("Failed to mark notification as sent: {:?}", e);
                                }
                            }
                            Err(e) => {
                                let err_msg = format!("{}", e);
                                warn!("SMS delivery failed: {}", err_msg);
                                let status = if attempts >= MAX_ATTEMPTS {
                                    STATUS_FAILED
                                } else {
                                    STATUS_PENDING
                                };
                                if let Err(up_err) = state
                                    .notification_repo
                                    .mark(&job.id, status, attempts, Some(err_msg))
                                    .await
                                {
                                    error!("Failed to mark notification as failed: {:?}", up_err);
                                }
                            }
                        }
                    }
                    .instrument(span)
                    .await;
                }
            }
            Err(e) => error!("Failed to fetch pending notifications: {:?}", e),
        }
        sleep(Duration::from_secs(5)).await;
    }
}

async fn dispatch(state: &AppState, job: &NotificationJob) -> Result<(), AppError> {
    let payload = &job.payload.0;
    let amount = payload["amount"].as_f64().unwrap_or(0.0);
    let balance = payload["balance"].as_f64().unwrap_or(0.0);

    match job.kind.as_str() {
        KIND_MEMBER_CREATED => {
            let name = payload["name"].as_str().unwrap_or_default();
            state
                .sms_service
                .send_member_created(&job.phone, name, balance)
                .await
        }
        KIND_RECHARGE => {
            let bonus = payload["bonus"].as_f64().unwrap_or(0.0);
            state
                .sms_service
                .send_recharge(&job.phone, amount, bonus, balance)
                .await
        }
        KIND_CONSUME => {
            state
                .sms_service
                .send_consumption(&job.phone, amount, balance)
                .await
        }
        other => {
            warn!("Unknown notification kind: {}", other);
            Ok(())
        }
    }
}
