use hummingbird::decoder::{is_switch_on, toggle_bit};
use hummingbird::{Rules, Snapshot};
use log::info;

use crate::{DeviceSource, Error, Result};

/// Flips one switch of the device and returns the control code that was sent.
pub async fn toggle_switch<S>(
    source: &S,
    device_id: &str,
    rules: &Rules,
    switch_code: &str,
) -> Result<i64>
where
    S: DeviceSource + ?Sized,
{
    let rule = rules
        .switches
        .iter()
        .find(|rule| rule.code == switch_code)
        .ok_or_else(|| Error::UnknownSwitch(switch_code.to_owned()))?;

    let properties = source.last_properties(device_id).await?;
    let current = Snapshot::from_properties(&properties, rules)
        .control_code()
        .ok_or(Error::MissingControlCode)?;

    let next = toggle_bit(current, rule.bit_mask);
    let state = if is_switch_on(next, rule.bit_mask, rule.inverted) {
        "on"
    } else {
        "off"
    };
    info!("turning {} {state}, control code {current} -> {next}", rule.name);

    source.send_control_command(device_id, next).await?;

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockDeviceSource;
    use hummingbird::DeviceProperty;

    use std::sync::{Arc, Mutex};

    use serde_json::json;

    fn properties(control: i64) -> Vec<DeviceProperty> {
        serde_json::from_value(json!([
            {"code": "lowSupplyTemp", "name": "Low supply", "value": 42.3, "access_mode": "R"},
            {"code": "controlCode", "name": "Control", "value": control, "access_mode": "RW"}
        ]))
        .unwrap()
    }

    fn source_with_control(control: i64, sent: Arc<Mutex<Vec<(String, i64)>>>) -> MockDeviceSource {
        let mut source = MockDeviceSource::new();
        source
            .expect_last_properties()
            .returning(move |_| Ok(properties(control)));
        source
            .expect_send_control_command()
            .returning(move |device_id, control_code| {
                sent.lock().unwrap().push((device_id.to_string(), control_code));
                Ok(())
            });
        source
    }

    #[tokio::test]
    async fn test_toggle_regular_switch() {
        let sent = Arc::new(Mutex::new(vec![]));
        let source = source_with_control(0b0_0000_0100, sent.clone());

        let next = toggle_switch(&source, "74835337", &Rules::default(), "lowCirculationFirst")
            .await
            .unwrap();

        assert_eq!(next, 0);
        assert_eq!(*sent.lock().unwrap(), [("74835337".to_owned(), 0)]);
    }

    #[tokio::test]
    async fn test_toggle_water_pump() {
        let sent = Arc::new(Mutex::new(vec![]));
        let source = source_with_control(0b0_0000_0001, sent.clone());

        let next = toggle_switch(&source, "74835337", &Rules::default(), "waterPump")
            .await
            .unwrap();

        assert_eq!(next, 0b1_0000_0001);
        assert_eq!(*sent.lock().unwrap(), [("74835337".to_owned(), 0b1_0000_0001)]);
    }

    #[tokio::test]
    async fn test_unknown_switch() {
        let sent = Arc::new(Mutex::new(vec![]));
        let source = source_with_control(0, sent.clone());

        let result = toggle_switch(&source, "74835337", &Rules::default(), "fountain").await;

        assert!(matches!(result, Err(Error::UnknownSwitch(code)) if code == "fountain"));
        assert!(sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_control_code() {
        let mut source = MockDeviceSource::new();
        source.expect_last_properties().returning(|_| Ok(vec![]));
        source.expect_send_control_command().never();

        let result = toggle_switch(&source, "74835337", &Rules::default(), "waterPump").await;

        assert!(matches!(result, Err(Error::MissingControlCode)));
    }
}
