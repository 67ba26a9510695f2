use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{DeviceProperty, Rules, StatusKey, StatusMaskItem};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusItem {
    pub bit_mask: u32,
    pub name: String,
    pub code: String,
    pub key: StatusKey,
    pub value: String,
}

impl StatusItem {
    pub fn is_warning(&self) -> bool {
        self.key == StatusKey::Warning && self.value == WARNING
    }
}

pub type StatusResult = BTreeMap<StatusKey, Vec<StatusItem>>;

const WARNING: &str = "warning ⚠️⚠️";

fn label(key: StatusKey, is_set: bool) -> &'static str {
    match (key, is_set) {
        (StatusKey::Warning, true) => WARNING,
        (StatusKey::Warning, false) => "no warning",
        (StatusKey::Remote, true) => "remote",
        (StatusKey::Remote, false) => "local",
        (StatusKey::Default, true) => "running",
        (StatusKey::Default, false) => "stopped",
        (StatusKey::Unknown, _) => "unknown",
    }
}

/// Decodes one 16 bit status word against `rules`, appending to `accumulator`.
///
/// An absent `source`, or one whose reading is not numeric, leaves the
/// accumulator untouched.
pub fn decode_status_word(
    rules: &[StatusMaskItem],
    source: Option<&DeviceProperty>,
    mut accumulator: StatusResult,
) -> StatusResult {
    let Some(bits) = source.and_then(|source| source.value.as_bits()) else {
        return accumulator;
    };

    let word = bits & 0xffff;

    for rule in rules {
        let is_set = rule.bit_mask & word != 0;

        accumulator.entry(rule.key).or_default().push(StatusItem {
            bit_mask: rule.bit_mask,
            name: rule.name.clone(),
            code: rule.code.clone(),
            key: rule.key,
            value: label(rule.key, is_set).to_owned(),
        });
    }

    accumulator
}

/// Decodes both halves of the pump status bitfield.
///
/// Nothing is reported until both words have arrived.
pub fn decode_device_status(
    first: Option<&DeviceProperty>,
    second: Option<&DeviceProperty>,
    rules: &Rules,
) -> StatusResult {
    let (Some(first), Some(second)) = (first, second) else {
        return StatusResult::new();
    };

    let result = decode_status_word(&rules.status_first, Some(first), StatusResult::new());
    decode_status_word(&rules.status_second, Some(second), result)
}
