use std::collections::BTreeMap;

use super::decode_enumerated_status;
use crate::{AccessMode, DeviceProperty, Rules};

pub const OTHER_GROUP: &str = "other";

pub type GroupedData = BTreeMap<AccessMode, BTreeMap<String, Vec<DeviceProperty>>>;

/// Buckets records by access mode, then by the first configured prefix their
/// code starts with. Records keep their input order inside a bucket.
pub fn group_by_access_mode_and_prefix(records: &[DeviceProperty], rules: &Rules) -> GroupedData {
    records.iter().fold(GroupedData::new(), |mut grouped, record| {
        let record =
            decode_enumerated_status(record, &rules.status_marker, &rules.status_labels);

        let group = rules
            .groups
            .iter()
            .find(|rule| record.code.starts_with(&rule.prefix))
            .map_or(OTHER_GROUP, |rule| rule.prefix.as_str());

        grouped
            .entry(record.access_mode)
            .or_default()
            .entry(group.to_owned())
            .or_default()
            .push(record);

        grouped
    })
}
