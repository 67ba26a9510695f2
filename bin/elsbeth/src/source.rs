use async_trait::async_trait;
use hummingbird::{Client, DeviceDataParams, DeviceProperty};

/// Where device snapshots come from and control codes go to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceSource: Send + Sync {
    async fn last_properties(&self, device_id: &str) -> hummingbird::Result<Vec<DeviceProperty>>;

    async fn send_control_command(&self, device_id: &str, control_code: i64)
        -> hummingbird::Result<()>;
}

#[async_trait]
impl DeviceSource for Client {
    async fn last_properties(&self, device_id: &str) -> hummingbird::Result<Vec<DeviceProperty>> {
        self.last_data(device_id, DeviceDataParams::default()).await
    }

    async fn send_control_command(
        &self,
        device_id: &str,
        control_code: i64,
    ) -> hummingbird::Result<()> {
        Client::send_control_command(self, device_id, control_code).await?;
        Ok(())
    }
}
