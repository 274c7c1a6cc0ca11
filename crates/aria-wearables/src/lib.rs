//! Wearable device layer.
//!
//! Devices are simulated: connecting or syncing produces plausible random
//! readings instead of talking to a vendor API.

pub mod error;
pub mod simulator;
pub mod source;

pub use error::WearableError;
pub use simulator::SimulatedDeviceSource;
pub use source::DeviceSource;
