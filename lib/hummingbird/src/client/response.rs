use serde::Deserialize;

use crate::DeviceProperty;

#[derive(Debug, Deserialize)]
pub struct DeviceDataResponse {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub result: DeviceList,
}

#[derive(Debug, Deserialize)]
pub struct DeviceList {
    pub list: Vec<DeviceProperty>,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub result: Option<LoginResult>,
}

#[derive(Debug, Deserialize)]
pub struct LoginResult {
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ControlResponse {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AccessMode, Value};
    use serde_json::json;

    #[test]
    fn test_device_data_response() {
        let response: DeviceDataResponse = serde_json::from_value(json!({
            "code": 10000,
            "message": "success",
            "result": {
                "list": [
                    {"code": "controlCode", "name": "Control", "value": 3, "data_type": "int", "unit": "", "access_mode": "RW", "time": 1700000000000i64}
                ]
            }
        }))
        .unwrap();

        assert_eq!(response.result.list.len(), 1);
        assert_eq!(response.result.list[0].value, Value::Numeric(3.0));
        assert_eq!(response.result.list[0].access_mode, AccessMode::ReadWrite);
    }

    #[test]
    fn test_login_response_without_token() {
        let response: LoginResponse = serde_json::from_value(json!({
            "code": 20001,
            "message": "wrong password",
            "result": null
        }))
        .unwrap();

        assert!(response.result.is_none());
        assert_eq!(response.message, "wrong password");
    }
}
