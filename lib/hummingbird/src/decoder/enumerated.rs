use std::collections::BTreeMap;

use crate::{DeviceProperty, Value};

/// Replaces the integer reading of an enumerated status record with its label.
///
/// Only records whose code contains `marker` and whose value is an integer are
/// touched; everything else comes back as an unchanged copy.
pub fn decode_enumerated_status(
    record: &DeviceProperty,
    marker: &str,
    labels: &BTreeMap<i64, String>,
) -> DeviceProperty {
    let code = match record.value.as_integer() {
        Some(code) if record.code.contains(marker) => code,
        _ => return record.clone(),
    };

    let label = labels
        .get(&code)
        .cloned()
        .unwrap_or_else(|| format!("unknown status: {code}"));

    DeviceProperty {
        value: Value::Text(label),
        data_type: "-".to_owned(),
        unit: String::new(),
        ..record.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AccessMode;

    fn record(code: &str, value: Value) -> DeviceProperty {
        DeviceProperty {
            code: code.to_owned(),
            name: "Heat pump status".to_owned(),
            value,
            data_type: "int".to_owned(),
            unit: "-".to_owned(),
            access_mode: AccessMode::Read,
            time: Some(1_700_000_000_000),
        }
    }

    fn labels() -> BTreeMap<i64, String> {
        BTreeMap::from([(0, "standby".to_owned()), (6, "heating".to_owned())])
    }

    #[test]
    fn test_known_code() {
        let decoded = decode_enumerated_status(
            &record("heatPumpStatusFirst", Value::Numeric(6.0)),
            "heatPumpStatus",
            &labels(),
        );

        assert_eq!(decoded.value, Value::Text("heating".to_owned()));
        assert_eq!(decoded.data_type, "-");
        assert_eq!(decoded.unit, "");
        assert_eq!(decoded.code, "heatPumpStatusFirst");
        assert_eq!(decoded.time, Some(1_700_000_000_000));
    }

    #[test]
    fn test_zero_is_a_known_code() {
        let decoded = decode_enumerated_status(
            &record("heatPumpStatus", Value::Numeric(0.0)),
            "heatPumpStatus",
            &labels(),
        );

        assert_eq!(decoded.value, Value::Text("standby".to_owned()));
    }

    #[test]
    fn test_unknown_code() {
        let decoded = decode_enumerated_status(
            &record("heatPumpStatusSecond", Value::Numeric(42.0)),
            "heatPumpStatus",
            &labels(),
        );

        assert_eq!(decoded.value, Value::Text("unknown status: 42".to_owned()));
    }

    #[test]
    fn test_other_records_pass_through() {
        let records = [
            record("lowSupplyTemp", Value::Numeric(6.0)),
            record("heatPumpStatusFirst", Value::Numeric(6.5)),
            record("heatPumpStatusFirst", Value::Text("6".to_owned())),
        ];

        for original in &records {
            assert_eq!(
                &decode_enumerated_status(original, "heatPumpStatus", &labels()),
                original
            );
        }
    }
}
