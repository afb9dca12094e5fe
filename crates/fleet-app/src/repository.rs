//! Store adapters for the persistence layer

use fleet_store::Store;
use fleet_types::Result;

use crate::config::Config;

/// Open the file-based state store configured for this user
pub fn open_store(config: &Config) -> Result<Store> {
    let data_dir = config.data_dir()?;
    Store::open_with_key(data_dir, &config.storage_key)
}
