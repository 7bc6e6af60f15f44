// ── Free-text device filtering ──
//
// Used by the live board to filter snapshots without re-querying the
// backend. Pure: always applied to the latest snapshot, never mutating it.

use std::sync::Arc;

use parkwatch_api::types::DeviceStatusRecord;

/// Filter a device snapshot by a free-text query.
///
/// Case-insensitive substring match against device code, zone code, and
/// facility name; a record matches when any of the three contains the
/// trimmed query. An empty or whitespace-only query returns the input
/// snapshot as-is.
pub fn filter_devices(
    devices: &Arc<Vec<DeviceStatusRecord>>,
    query: &str,
) -> Arc<Vec<DeviceStatusRecord>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Arc::clone(devices);
    }

    let matched = devices
        .iter()
        .filter(|d| {
            d.code.to_lowercase().contains(&needle)
                || d.zone_code.to_lowercase().contains(&needle)
                || d.facility_name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    Arc::new(matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkwatch_api::types::DeviceStatus;

    fn device(code: &str, zone: &str, facility: &str) -> DeviceStatusRecord {
        DeviceStatusRecord {
            id: 1,
            code: code.to_owned(),
            zone_id: 10,
            zone_code: zone.to_owned(),
            facility_id: 100,
            facility_name: facility.to_owned(),
            status: DeviceStatus::Critical,
            health_score: None,
            last_telemetry_at: None,
            last_parking_log_at: None,
        }
    }

    #[test]
    fn empty_query_returns_input_unchanged() {
        let devices = Arc::new(vec![device("DEV-1", "Z1", "Central")]);

        let same = filter_devices(&devices, "");
        assert_eq!(*same, *devices);

        let same = filter_devices(&devices, "   ");
        assert_eq!(*same, *devices);
    }

    #[test]
    fn matches_any_of_the_three_fields_case_insensitively() {
        let devices = Arc::new(vec![
            device("DEV-1", "Z1", "Central Garage"),
            device("DEV-2", "Z2", "North Lot"),
        ]);

        let by_code = filter_devices(&devices, "dev-2");
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].code, "DEV-2");

        let by_zone = filter_devices(&devices, "z1");
        assert_eq!(by_zone.len(), 1);
        assert_eq!(by_zone[0].code, "DEV-1");

        let by_facility = filter_devices(&devices, "north");
        assert_eq!(by_facility.len(), 1);
        assert_eq!(by_facility[0].code, "DEV-2");
    }

    #[test]
    fn query_is_trimmed_before_matching() {
        let devices = Arc::new(vec![device("DEV-1", "Z1", "Central")]);
        let matched = filter_devices(&devices, "  z1  ");
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn no_match_yields_empty_collection() {
        let devices = Arc::new(vec![device("DEV-1", "Z1", "Central")]);
        let matched = filter_devices(&devices, "does-not-exist");
        assert!(matched.is_empty());
    }
}
