mod config;
pub use config::Config;

mod error;
pub use error::Error;

mod poller;
pub use poller::{poll_once, run};

mod source;
pub use source::DeviceSource;

mod toggle;
pub use toggle::toggle_switch;

pub type ErasedError = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;
