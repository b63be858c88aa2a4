//! Event decoders: fold parsed webhook events into the store and fan
//! the resulting changes out to bound items.

mod delta;
mod topology;
mod transport;

pub use delta::{decode_mute_change, decode_volume_change};
pub use topology::decode_topology;
pub use transport::decode_state;
