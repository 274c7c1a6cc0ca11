use async_trait::async_trait;
use aria_types::{Device, DeviceKind, DeviceReading};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{Result, WearableError};
use crate::source::DeviceSource;

/// In-process device source that fabricates readings.
///
/// Each user starts with one disconnected device per [`DeviceKind`]; the
/// device id is the kind's string form (`whoop`, `apple_watch`, ...).
pub struct SimulatedDeviceSource {
    devices: Mutex<HashMap<String, Vec<Device>>>,
    rng: Mutex<StdRng>,
}

impl Default for SimulatedDeviceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedDeviceSource {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Reproducible readings for tests
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            devices: Mutex::new(HashMap::new()),
            rng: Mutex::new(rng),
        }
    }

    fn devices(&self) -> MutexGuard<'_, HashMap<String, Vec<Device>>> {
        self.devices.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn reading(&self, kind: DeviceKind) -> DeviceReading {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        generate_reading(&mut *rng, kind)
    }

    /// Run `f` on one of the user's devices.
    ///
    /// Users are only stored once a device of theirs is connected.
    fn with_device<F>(&self, user_id: &str, device_id: &str, f: F) -> Result<Device>
    where
        F: FnOnce(&mut Device) -> Result<()>,
    {
        let mut devices = self.devices();
        if let Some(user_devices) = devices.get_mut(user_id) {
            return update_device(user_devices, device_id, f);
        }

        let mut user_devices = initial_devices();
        let device = update_device(&mut user_devices, device_id, f)?;
        if device.connected {
            devices.insert(user_id.to_string(), user_devices);
        }
        Ok(device)
    }
}

#[async_trait]
impl DeviceSource for SimulatedDeviceSource {
    async fn list(&self, user_id: &str) -> Vec<Device> {
        self.devices()
            .get(user_id)
            .cloned()
            .unwrap_or_else(initial_devices)
    }

    async fn connect(&self, user_id: &str, kind: DeviceKind) -> Result<Device> {
        let reading = self.reading(kind);
        let device = self.with_device(user_id, kind.as_str(), |device| {
            if !device.connected {
                device.connected = true;
                device.last_sync = Some(reading.recorded_at);
                device.data = Some(reading);
            }
            Ok(())
        })?;

        tracing::info!(user_id, device = kind.as_str(), "Connected simulated device");
        Ok(device)
    }

    async fn sync(&self, user_id: &str, device_id: &str) -> Result<Device> {
        let kind: DeviceKind = device_id
            .parse()
            .map_err(|_| WearableError::UnknownDevice(device_id.to_string()))?;
        let reading = self.reading(kind);

        let device = self.with_device(user_id, device_id, |device| {
            if !device.connected {
                return Err(WearableError::NotConnected(device_id.to_string()));
            }
            device.last_sync = Some(reading.recorded_at);
            device.data = Some(reading);
            Ok(())
        })?;

        tracing::debug!(user_id, device = device_id, "Synced simulated device");
        Ok(device)
    }

    async fn disconnect(&self, user_id: &str, device_id: &str) -> Result<Device> {
        let device = self.with_device(user_id, device_id, |device| {
            device.connected = false;
            device.data = None;
            Ok(())
        })?;

        tracing::info!(user_id, device = device_id, "Disconnected simulated device");
        Ok(device)
    }
}

fn update_device<F>(devices: &mut [Device], device_id: &str, f: F) -> Result<Device>
where
    F: FnOnce(&mut Device) -> Result<()>,
{
    let device = devices
        .iter_mut()
        .find(|d| d.id == device_id)
        .ok_or_else(|| WearableError::UnknownDevice(device_id.to_string()))?;
    f(device)?;
    Ok(device.clone())
}

fn initial_devices() -> Vec<Device> {
    DeviceKind::ALL
        .into_iter()
        .map(|kind| Device {
            id: kind.as_str().to_string(),
            name: kind.display_name().to_string(),
            kind,
            connected: false,
            last_sync: None,
            data: None,
        })
        .collect()
}

fn generate_reading(rng: &mut impl Rng, kind: DeviceKind) -> DeviceReading {
    let resting_heart_rate = rng.gen_range(48..68);
    let (recovery_score, strain) = match kind {
        DeviceKind::Whoop => (
            Some(rng.gen_range(30..=99)),
            Some((rng.gen_range(4.0..18.0_f32) * 10.0).round() / 10.0),
        ),
        _ => (None, None),
    };

    DeviceReading {
        heart_rate: resting_heart_rate + rng.gen_range(8..40),
        resting_heart_rate,
        hrv_ms: rng.gen_range(25..110),
        steps: rng.gen_range(1_500..16_000),
        calories: rng.gen_range(1_600..3_200),
        sleep_hours: (rng.gen_range(5.0..9.0_f32) * 10.0).round() / 10.0,
        recovery_score,
        strain,
        recorded_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readings_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let reading = generate_reading(&mut rng, DeviceKind::Garmin);
            assert!(reading.heart_rate > reading.resting_heart_rate);
            assert!((5.0..=9.0).contains(&reading.sleep_hours));
            assert!(reading.recovery_score.is_none());
        }
    }

    #[test]
    fn test_whoop_reports_recovery() {
        let mut rng = StdRng::seed_from_u64(7);
        let reading = generate_reading(&mut rng, DeviceKind::Whoop);
        let recovery = reading.recovery_score.unwrap();
        assert!((30..=99).contains(&recovery));
        assert!(reading.strain.is_some());
    }

    #[tokio::test]
    async fn test_listing_unknown_users_keeps_no_state() {
        let source = SimulatedDeviceSource::with_seed(3);
        for i in 0..50 {
            let devices = source.list(&format!("visitor-{}", i)).await;
            assert_eq!(devices.len(), DeviceKind::ALL.len());
            assert!(devices.iter().all(|d| !d.connected));
        }
        assert!(source.devices().is_empty());

        source.disconnect("visitor-0", "whoop").await.unwrap();
        assert_eq!(
            source.sync("visitor-0", "whoop").await.unwrap_err(),
            WearableError::NotConnected("whoop".to_string())
        );
        assert!(source.devices().is_empty());

        source.connect("visitor-0", DeviceKind::Whoop).await.unwrap();
        assert_eq!(source.devices().len(), 1);
        assert!(source.list("visitor-0").await.iter().any(|d| d.connected));
    }

    #[test]
    fn test_same_seed_same_readings() {
        let a = generate_reading(&mut StdRng::seed_from_u64(1), DeviceKind::Fitbit);
        let b = generate_reading(&mut StdRng::seed_from_u64(1), DeviceKind::Fitbit);
        assert_eq!(a.steps, b.steps);
        assert_eq!(a.hrv_ms, b.hrv_ms);
    }
}
