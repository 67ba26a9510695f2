pub mod decoder;

mod property;
pub use property::{AccessMode, DeviceProperty, Value};

mod rules;
pub use rules::{DeviceRule, Rules, StatusKey, StatusMaskItem, SwitchMaskItem};

mod snapshot;
pub use snapshot::{Snapshot, STATUS_FIRST_CODE, STATUS_SECOND_CODE};

mod client;
pub use client::{
    is_valid_token, is_valid_token_at, Client, Credentials, DeviceDataParams,
    DeviceHistoryParams,
};

mod error;
pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;
