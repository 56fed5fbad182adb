//! Per-domain strategies.
//!
//! | Domain | Sources | Device path |
//! |--------|---------|-------------|
//! | environmental | `air`, `water` | `env-<loc>-air`, `env-<loc>-water` |
//! | agricultural | `primary` | `agri-<plot>` |
//! | health | `primary` | `health-tracker-<n>` |
//! | network | `primary` | `cell-tower-tower-<n>` |
//! | retail | `primary` | `retail-<neighborhood>-store-<n>` |
//! | weather | `primary` | `weather-station-<city>-<n>` |

use lcore_model::Domain;

use crate::error::{Result, TransformError};

mod agricultural;
mod environmental;
mod health;
mod network;
mod retail;
mod weather;

pub use agricultural::{AgriculturalTransformer, DEFAULT_INTERVAL_SECS, DEFAULT_START_EPOCH};
pub use environmental::{
    AIR, DEFAULT_GRID_STEP_SECS, EnvironmentalTransformer, LOCATION_FIELD, WATER, dominant_step,
    sort_locations,
};
pub use health::{HealthTransformer, tracker_segment};
pub use network::{NetworkTransformer, SIGNAL_FIELD, tower_number};
pub use retail::{KANSAS_CITY_NEIGHBORHOODS, REGION_FIELD, RetailTransformer, store_slot};
pub use weather::WeatherTransformer;

/// Role of a domain's only source.
pub const PRIMARY: &str = "primary";

/// Timestamp of slot `index` on a grid starting at `start` with spacing `step`.
pub fn grid_timestamp(domain: Domain, start: i64, index: usize, step: i64) -> Result<i64> {
    i64::try_from(index)
        .ok()
        .and_then(|index| index.checked_mul(step))
        .and_then(|offset| start.checked_add(offset))
        .ok_or_else(|| TransformError::Strategy {
            domain,
            message: format!("timestamp of row {index} overflows (start {start}, step {step})"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_timestamps_step_from_start() {
        assert_eq!(grid_timestamp(Domain::Agricultural, 100, 0, 60).unwrap(), 100);
        assert_eq!(grid_timestamp(Domain::Agricultural, 100, 3, 60).unwrap(), 280);
    }

    #[test]
    fn grid_timestamp_overflow_is_an_error() {
        let err = grid_timestamp(Domain::Agricultural, i64::MAX - 10, 1, 60).unwrap_err();
        assert!(matches!(err, TransformError::Strategy { .. }), "{err}");
        assert!(grid_timestamp(Domain::Environmental, 0, 2, i64::MAX).is_err());
    }
}
