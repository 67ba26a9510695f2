use elsbeth::{run, toggle_switch, Config, ErasedError};
use hummingbird::Client;

use log::info;

#[tokio::main]
async fn main() -> Result<(), ErasedError> {
    pretty_env_logger::init_timed();

    let config = Config::from_env()?;
    let rules = config.load_rules()?;
    let client = Client::new(config.base_url.clone(), config.credentials.clone())?;

    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        Some("toggle") => {
            let switch_code = args.next().ok_or("usage: elsbeth toggle <switch_code>")?;
            let control_code =
                toggle_switch(&client, &config.device_id, &rules, &switch_code).await?;
            info!("sent control code {control_code}");
        }
        Some(command) => return Err(format!("unknown command {command}").into()),
        None => {
            info!(
                "polling device {} at {} every {:?}",
                config.device_id, config.base_url, config.poll_interval
            );

            let mut stdout = std::io::stdout();

            tokio::select! {
                result = run(&client, &config, &rules, &mut stdout) => result?,
                _ = tokio::signal::ctrl_c() => info!("shutting down"),
            }
        }
    }

    Ok(())
}
