use anyhow::Result;

use super::services::Services;

/// Shows the cached view, refreshes once and prints both components.
#[tracing::instrument(skip(services))]
pub async fn status(services: &Services) -> Result<()> {
    let mut landing = services.landing();
    landing.refresh_once().await;
    println!("{}", landing.render());
    Ok(())
}
