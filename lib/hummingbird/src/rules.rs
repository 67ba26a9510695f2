use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Category of a status bit, selects the pair of labels used for it.
#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatusKey {
    Remote,
    Warning,
    /// Run state of a pump.
    Default,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for StatusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.serialize(f)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct DeviceRule {
    pub name: String,
    pub prefix: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusMaskItem {
    pub bit_mask: u32,
    pub name: String,
    pub code: String,
    pub key: StatusKey,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SwitchMaskItem {
    pub bit_mask: i64,
    pub name: String,
    pub code: String,
    /// The switch reports "on" while its bit is set instead of cleared.
    #[serde(default)]
    pub inverted: bool,
}

/// Static configuration of the park: lookup and mask tables consumed by the decoder.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Rules {
    pub status_marker: String,
    pub status_labels: BTreeMap<i64, String>,
    pub groups: Vec<DeviceRule>,
    pub status_first: Vec<StatusMaskItem>,
    pub status_second: Vec<StatusMaskItem>,
    pub switches: Vec<SwitchMaskItem>,
}

impl Rules {
    pub fn from_json(json: &str) -> Result<Rules> {
        let rules: Rules = serde_json::from_str(json)?;

        let tables = [
            (
                "first status word",
                has_overlapping_masks(rules.status_first.iter().map(|item| item.bit_mask as i64)),
            ),
            (
                "second status word",
                has_overlapping_masks(rules.status_second.iter().map(|item| item.bit_mask as i64)),
            ),
            (
                "switch word",
                has_overlapping_masks(rules.switches.iter().map(|item| item.bit_mask)),
            ),
        ];

        if let Some((table, _)) = tables.into_iter().find(|(_, overlaps)| *overlaps) {
            return Err(Error::OverlappingMasks(table));
        }

        Ok(rules)
    }
}

fn has_overlapping_masks(masks: impl Iterator<Item = i64>) -> bool {
    let mut seen = 0i64;

    for mask in masks {
        if seen & mask != 0 {
            return true;
        }
        seen |= mask;
    }

    false
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            status_marker: "heatPumpStatus".to_owned(),
            status_labels: default_status_labels(),
            groups: default_groups(),
            status_first: default_status_first(),
            status_second: default_status_second(),
            switches: default_switches(),
        }
    }
}

fn default_status_labels() -> BTreeMap<i64, String> {
    [
        (0, "unit on standby"),
        (4, "compressor start delay"),
        (5, "unit starting"),
        (6, "unit cooling"),
        (7, "unit heating"),
        (8, "temperature reached, unit paused"),
        (9, "compressor stop delay"),
        (11, "unit alarm ⚠️⚠️"),
        (16, "antifreeze running"),
        (17, "unit defrosting"),
        (18, "outlet water too hot, unit paused ⚠️⚠️"),
        (19, "outlet water too cold, unit paused ⚠️⚠️"),
        (24, "unit stopping"),
        (25, "unit cooling down with well water"),
    ]
    .into_iter()
    .map(|(code, label)| (code, label.to_owned()))
    .collect()
}

fn default_groups() -> Vec<DeviceRule> {
    [
        ("Low zone", "low"),
        ("High zone", "high"),
        ("Deep well", "well"),
        ("Heat pump", "heatPump"),
    ]
    .into_iter()
    .map(|(name, prefix)| DeviceRule {
        name: name.to_owned(),
        prefix: prefix.to_owned(),
    })
    .collect()
}

fn status_items(items: &[(&str, &str, StatusKey)]) -> Vec<StatusMaskItem> {
    items
        .iter()
        .enumerate()
        .map(|(bit, (name, code, key))| StatusMaskItem {
            bit_mask: 1 << bit,
            name: (*name).to_owned(),
            code: (*code).to_owned(),
            key: *key,
        })
        .collect()
}

fn default_status_first() -> Vec<StatusMaskItem> {
    use StatusKey::{Default as Running, Remote, Warning};

    status_items(&[
        ("High zone circulation pump 1 remote", "hightCirculationRemoteStatuFirst", Remote),
        ("High zone circulation pump 1 fault", "hightCirculationWarningStatuFirst", Warning),
        ("High zone circulation pump 1 running", "hightCirculationStatuFirst", Running),
        ("High zone circulation pump 2 remote", "hightCirculationRemoteStatuSecond", Remote),
        ("High zone circulation pump 2 fault", "hightCirculationWarningStatuSecond", Warning),
        ("High zone circulation pump 2 running", "hightCirculationStatuSecond", Running),
        ("High zone make-up pump remote", "hightSupplyPumpRemoteStatu", Remote),
        ("High zone make-up pump fault", "hightSupplyPumpWarningStatu", Warning),
        ("High zone make-up pump running", "hightSupplyPumpStatu", Running),
        ("Low zone circulation pump 1 remote", "lowCirculationRemoteStatuFirst", Remote),
        ("Low zone circulation pump 1 fault", "lowCirculationWarningStatuFirst", Warning),
        ("Low zone circulation pump 1 running", "lowCirculationStatuFirst", Running),
        ("Low zone circulation pump 2 remote", "lowCirculationRemoteStatuSecond", Remote),
        ("Low zone circulation pump 2 fault", "lowCirculationWarningStatuSecond", Warning),
        ("Low zone circulation pump 2 running", "lowCirculationStatuSecond", Running),
        ("Low zone circulation pump 3 remote", "lowCirculationRemoteStatuThird", Remote),
    ])
}

fn default_status_second() -> Vec<StatusMaskItem> {
    use StatusKey::{Default as Running, Remote, Warning};

    status_items(&[
        ("Low zone circulation pump 3 fault", "lowCirculationWarningStatuThird", Warning),
        ("Low zone circulation pump 3 running", "lowCirculationStatuThird", Running),
        ("Low zone make-up pump remote", "lowSupplyPumpRemoteStatu", Remote),
        ("Low zone make-up pump fault", "lowSupplyPumpWarningStatu", Warning),
        ("Low zone make-up pump running", "lowSupplyPumpStatu", Running),
        ("Deep well pump 1 remote", "deepWellRemoteStatuFirst", Remote),
        ("Deep well pump 1 fault", "deepWellWarningStatuFirst", Warning),
        ("Deep well pump 1 running", "deepWellStatuFirst", Running),
        ("Deep well pump 2 remote", "deepWellRemoteStatuSecond", Remote),
        ("Deep well pump 2 fault", "deepWellWarningtatuSecond", Warning),
        ("Deep well pump 2 running", "deepWellStatuSecond", Running),
        ("Deep well pump 3 remote", "deepWellRemoteStatuThird", Remote),
        ("Deep well pump 3 fault", "deepWellWarningStatuThird", Warning),
        ("Deep well pump 3 running", "deepWellStatuThird", Running),
    ])
}

fn default_switches() -> Vec<SwitchMaskItem> {
    [
        ("High zone circulation pump 1", "hightCirculationFirst"),
        ("High zone circulation pump 2", "hightCirculationSecond"),
        ("Low zone circulation pump 1", "lowCirculationFirst"),
        ("Low zone circulation pump 2", "lowCirculationSecond"),
        ("Low zone circulation pump 3", "lowCirculationThird"),
        ("Deep well circulation pump 1", "wellCirculationFirst"),
        ("Deep well circulation pump 2", "wellCirculationSecond"),
        ("Deep well circulation pump 3", "wellCirculationThird"),
        ("Water pump system start/stop", "waterPump"),
    ]
    .into_iter()
    .enumerate()
    .map(|(bit, (name, code))| SwitchMaskItem {
        bit_mask: 1 << bit,
        name: name.to_owned(),
        code: code.to_owned(),
        // wired with reversed polarity on site
        inverted: code == "waterPump",
    })
    .collect()
}
