use serde::Serialize;

use crate::decoder::{
    decode_device_status, decode_switch_word, group_by_access_mode_and_prefix, GroupedData,
    StatusItem, StatusResult, SwitchListItem, OTHER_GROUP,
};
use crate::{AccessMode, DeviceProperty, Rules, StatusKey};

pub const STATUS_FIRST_CODE: &str = "statusCodeFirst";
pub const STATUS_SECOND_CODE: &str = "statusCodeSecond";

/// Decoded view of one poll of a device.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Snapshot {
    pub grouped: GroupedData,
    /// Switch control word, the last writable ungrouped property.
    pub control: Option<DeviceProperty>,
    pub status: StatusResult,
    pub switches: Vec<SwitchListItem>,
}

impl Snapshot {
    pub fn from_properties(properties: &[DeviceProperty], rules: &Rules) -> Snapshot {
        let grouped = group_by_access_mode_and_prefix(properties, rules);

        let control = ungrouped(&grouped, AccessMode::ReadWrite)
            .last()
            .cloned();

        let read = ungrouped(&grouped, AccessMode::Read);
        let find = |code: &str| read.iter().find(|property| property.code == code);

        let status = decode_device_status(
            find(STATUS_FIRST_CODE),
            find(STATUS_SECOND_CODE),
            rules,
        );

        let switches =
            decode_switch_word(control.as_ref().and_then(control_bits), &rules.switches);

        Snapshot {
            grouped,
            control,
            status,
            switches,
        }
    }

    pub fn control_code(&self) -> Option<i64> {
        self.control.as_ref().and_then(control_bits)
    }

    pub fn warnings(&self) -> Vec<&StatusItem> {
        self.status
            .get(&StatusKey::Warning)
            .map(|items| items.iter().filter(|item| item.is_warning()).collect())
            .unwrap_or_default()
    }
}

/// Read the same way as the status words, truncated to an unsigned bitfield.
fn control_bits(control: &DeviceProperty) -> Option<i64> {
    control.value.as_bits().map(i64::from)
}

fn ungrouped(grouped: &GroupedData, access_mode: AccessMode) -> &[DeviceProperty] {
    grouped
        .get(&access_mode)
        .and_then(|groups| groups.get(OTHER_GROUP))
        .map(Vec::as_slice)
        .unwrap_or_default()
}
