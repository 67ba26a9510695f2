use serde::{Deserialize, Serialize};

use crate::SwitchMaskItem;

const ON: &str = "on ✅";
const OFF: &str = "off";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SwitchListItem {
    pub code: String,
    pub name: String,
    pub value: String,
}

impl SwitchListItem {
    pub fn is_on(&self) -> bool {
        self.value == ON
    }
}

/// Regular switches are on while their bit is cleared, inverted ones while it is set.
pub fn is_switch_on(control: i64, bit_mask: i64, inverted: bool) -> bool {
    let is_set = bit_mask & control != 0;
    is_set == inverted
}

pub fn decode_switch_word(control: Option<i64>, rules: &[SwitchMaskItem]) -> Vec<SwitchListItem> {
    let Some(control) = control else {
        return vec![];
    };

    rules
        .iter()
        .map(|rule| SwitchListItem {
            code: rule.code.clone(),
            name: rule.name.clone(),
            value: if is_switch_on(control, rule.bit_mask, rule.inverted) {
                ON.to_owned()
            } else {
                OFF.to_owned()
            },
        })
        .collect()
}

pub fn toggle_bit(current: i64, mask: i64) -> i64 {
    current ^ mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rules;

    fn rules() -> Vec<SwitchMaskItem> {
        vec![
            SwitchMaskItem {
                bit_mask: 1,
                name: "Pump A".to_owned(),
                code: "pumpA".to_owned(),
                inverted: false,
            },
            SwitchMaskItem {
                bit_mask: 2,
                name: "Water pump".to_owned(),
                code: "waterPump".to_owned(),
                inverted: true,
            },
        ]
    }

    fn states(items: &[SwitchListItem]) -> Vec<(&str, bool)> {
        items
            .iter()
            .map(|item| (item.code.as_str(), item.is_on()))
            .collect()
    }

    #[test]
    fn test_polarity() {
        assert_eq!(
            states(&decode_switch_word(Some(0b10), &rules())),
            [("pumpA", true), ("waterPump", true)]
        );
        assert_eq!(
            states(&decode_switch_word(Some(0b01), &rules())),
            [("pumpA", false), ("waterPump", false)]
        );
    }

    #[test]
    fn test_labels() {
        let items = decode_switch_word(Some(0b01), &rules());

        assert_eq!(
            items[0],
            SwitchListItem {
                code: "pumpA".to_owned(),
                name: "Pump A".to_owned(),
                value: "off".to_owned(),
            }
        );

        let items = decode_switch_word(Some(0b11), &rules());
        assert_eq!(items[1].value, "on ✅");
    }

    #[test]
    fn test_absent_control_is_empty() {
        assert!(decode_switch_word(None, &rules()).is_empty());
        assert!(decode_switch_word(None, &Rules::default().switches).is_empty());
    }

    #[test]
    fn test_zero_control_is_decoded() {
        let rules = Rules::default().switches;
        let items = decode_switch_word(Some(0), &rules);

        assert_eq!(items.len(), rules.len());
        assert!(items[..8].iter().all(SwitchListItem::is_on));
        assert!(!items[8].is_on());
    }

    #[test]
    fn test_is_switch_on() {
        assert!(is_switch_on(0, 4, false));
        assert!(!is_switch_on(4, 4, false));
        assert!(is_switch_on(4, 4, true));
        assert!(!is_switch_on(0, 4, true));
    }

    #[test]
    fn test_toggle_bit() {
        assert_eq!(toggle_bit(0b101, 0b001), 0b100);
        assert_eq!(toggle_bit(0b100, 0b001), 0b101);

        for current in [0, 1, 0x1ff, -7, i64::MAX] {
            for bit in 0..63 {
                assert_eq!(toggle_bit(toggle_bit(current, 1 << bit), 1 << bit), current);
            }
        }
    }
}
