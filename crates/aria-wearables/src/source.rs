use async_trait::async_trait;
use aria_types::{Device, DeviceKind};

use crate::error::Result;

/// Per-user wearable devices and their latest readings
#[async_trait]
pub trait DeviceSource: Send + Sync {
    /// Every supported device for the user, connected or not
    async fn list(&self, user_id: &str) -> Vec<Device>;

    /// Connect a device and take an initial reading. Connecting twice is a no-op.
    async fn connect(&self, user_id: &str, kind: DeviceKind) -> Result<Device>;

    /// Pull a fresh reading from a connected device
    async fn sync(&self, user_id: &str, device_id: &str) -> Result<Device>;

    /// Disconnect and drop the last reading
    async fn disconnect(&self, user_id: &str, device_id: &str) -> Result<Device>;
}
