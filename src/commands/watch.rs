use std::time::Duration;

use anyhow::Result;
use log::info;

use super::services::Services;

/// Prints the cached view, then reprints after every update from the poller
/// until Ctrl-C or until `max_updates` updates have arrived.
#[tracing::instrument(skip(services))]
pub async fn watch(services: &Services, interval: Duration, max_updates: Option<usize>) -> Result<()> {
    let mut landing = services.landing();
    println!("{}", landing.render());

    let mut handle = landing.polling_driver(interval).spawn();
    let mut received = 0usize;

    loop {
        tokio::select! {
            update = handle.recv() => {
                let Some(update) = update else { break };
                landing.apply(&update);
                println!("\n{}", landing.render());

                received += 1;
                if max_updates.is_some_and(|max| received >= max) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping");
                break;
            }
        }
    }

    handle.shutdown().await;
    Ok(())
}
