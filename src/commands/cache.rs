use anyhow::Result;
use log::info;

use crate::store::{RELEASE_SLOT, STARS_SLOT};

use super::services::Services;

const SLOTS: [&str; 2] = [RELEASE_SLOT, STARS_SLOT];

pub fn show(services: &Services) -> Result<()> {
    println!("Cache: {}", services.config.cache_dir.display());
    for slot in SLOTS {
        match services.store.get(slot) {
            Some(value) => println!("{} = {}", slot, value),
            None => println!("{} (empty)", slot),
        }
    }
    Ok(())
}

/// Empties both slots. Only ever done on request; fetch failures never clear them.
pub fn clear(services: &Services) -> Result<()> {
    for slot in SLOTS {
        services.store.remove(slot)?;
    }
    info!("Cleared cached release and star count");
    println!("Cache cleared.");
    Ok(())
}
