use crate::events::AppEvent;
use crate::monitor::MonitorSnapshot;
use async_channel::{Receiver, Sender};
use carriot_link::{ApiClient, ApiError, MovementRequest};

/// Work the GUI hands to the background runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    Submit(MovementRequest),
    RefreshMonitor { device_id: u32 },
}

/// Runs queued jobs without blocking the queue; each result comes back as an
/// [`AppEvent`].
pub async fn run_dispatcher(client: ApiClient, jobs: Receiver<Job>, tx: Sender<AppEvent>) {
    while let Ok(job) = jobs.recv().await {
        log::debug!("Dispatching {:?}", job);
        let client = client.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let event = match job {
                Job::Submit(request) => submit(&client, request).await,
                Job::RefreshMonitor { device_id } => {
                    AppEvent::MonitorLoaded(fetch_monitor(&client, device_id).await)
                }
            };
            let _ = tx.send(event).await;
        });
    }
    log::info!("Job queue closed, dispatcher stopping");
}

pub async fn submit(client: &ApiClient, request: MovementRequest) -> AppEvent {
    let action = request.action.clone();
    match client.submit(request).await {
        Ok(record) => AppEvent::CommandSent(record),
        Err(e) => {
            log::error!("Failed to submit '{}' to {}: {}", action, client.base_url(), e);
            AppEvent::CommandFailed {
                action,
                reason: e.to_string(),
            }
        }
    }
}

fn loaded<T>(what: &str, result: Result<Vec<T>, ApiError>) -> Option<Vec<T>> {
    match result {
        Ok(items) => Some(items),
        Err(e) => {
            log::warn!("Could not load {}: {}", what, e);
            None
        }
    }
}

/// Reads the three histories concurrently. A failed read leaves its list `None`.
pub async fn fetch_monitor(client: &ApiClient, device_id: u32) -> MonitorSnapshot {
    let (movements, obstacles, demos) = tokio::join!(
        client.recent_movements(device_id),
        client.recent_obstacles(device_id),
        client.recent_demos(),
    );

    MonitorSnapshot {
        movements: loaded("movements", movements),
        obstacles: loaded("obstacles", obstacles),
        demos: loaded("demos", demos),
    }
}
