use crate::events::AppEvent;
use crate::sys::dispatch::Job;
use async_channel::{Receiver, Sender};
use carriot_link::ApiClient;
use std::thread;
use tokio::runtime::Runtime;

pub fn start_background_services(
    tx: Sender<AppEvent>,
    jobs: Receiver<Job>,
    client: ApiClient,
) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(async {
            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::sys::server::run_server(tx).await;
                });
            }

            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::config::run_async_watcher(tx).await;
                });
            }

            // runs until the GUI drops its job sender
            crate::sys::dispatch::run_dispatcher(client, jobs, tx).await;
        });
    });
}
