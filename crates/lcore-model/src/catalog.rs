use serde::{Deserialize, Serialize};

use crate::{Category, DeviceId, Domain};

/// One distinct device observed in the transformer outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCatalogEntry {
    pub device_id: DeviceId,
    pub domain: Domain,
    pub category: Category,
}

impl DeviceCatalogEntry {
    pub fn new(device_id: DeviceId, domain: Domain) -> Self {
        Self {
            device_id,
            domain,
            category: domain.category(),
        }
    }
}
