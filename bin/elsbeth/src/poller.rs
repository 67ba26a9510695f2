use std::io::Write;

use hummingbird::{Rules, Snapshot};
use log::{debug, error, warn};
use tokio::time::{self, MissedTickBehavior};

use crate::{Config, DeviceSource, Result};

/// Reads the device once and writes the decoded snapshot as one JSON line.
pub async fn poll_once<S, W>(
    source: &S,
    device_id: &str,
    rules: &Rules,
    out: &mut W,
) -> Result<Snapshot>
where
    S: DeviceSource + ?Sized,
    W: Write,
{
    let properties = source.last_properties(device_id).await?;
    debug!("device {device_id} reported {} properties", properties.len());

    let snapshot = Snapshot::from_properties(&properties, rules);

    for item in snapshot.warnings() {
        warn!("{} ({}): {}", item.name, item.code, item.value);
    }

    serde_json::to_writer(&mut *out, &snapshot)?;
    writeln!(out)?;
    out.flush()?;

    Ok(snapshot)
}

/// Polls the device on `config.poll_interval` until the future is dropped.
///
/// A failed tick is logged and does not stop polling. With a zero interval the
/// device is read once and the error, if any, is returned.
pub async fn run<S, W>(source: &S, config: &Config, rules: &Rules, out: &mut W) -> Result<()>
where
    S: DeviceSource + ?Sized,
    W: Write,
{
    if config.poll_interval.is_zero() {
        poll_once(source, &config.device_id, rules, out).await?;
        return Ok(());
    }

    let mut interval = time::interval(config.poll_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        if let Err(err) = poll_once(source, &config.device_id, rules, out).await {
            error!("Error polling device {}: {}", config.device_id, err);
        }
    }
}
