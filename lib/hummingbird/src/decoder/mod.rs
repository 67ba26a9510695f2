//! Pure decoding of raw device readings into labeled, grouped structures.
//!
//! Nothing here fails: undocumented codes degrade to placeholder labels and
//! readings that have not arrived yet produce empty results.

mod enumerated;
mod group;
mod status;
mod switch;

pub use enumerated::decode_enumerated_status;
pub use group::{group_by_access_mode_and_prefix, GroupedData, OTHER_GROUP};
pub use status::{decode_device_status, decode_status_word, StatusItem, StatusResult};
pub use switch::{decode_switch_word, is_switch_on, toggle_bit, SwitchListItem};
