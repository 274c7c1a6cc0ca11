use aria_types::DeviceKind;
use aria_wearables::{DeviceSource, SimulatedDeviceSource, WearableError};

#[tokio::test]
async fn test_new_user_sees_all_devices_disconnected() {
    let source = SimulatedDeviceSource::with_seed(42);
    let devices = source.list("u1").await;

    assert_eq!(devices.len(), 4);
    assert!(devices.iter().all(|d| !d.connected && d.data.is_none()));
    assert_eq!(devices[0].name, "WHOOP 4.0");
}

#[tokio::test]
async fn test_connect_sync_disconnect() {
    let source = SimulatedDeviceSource::with_seed(42);

    let connected = source.connect("u1", DeviceKind::AppleWatch).await.unwrap();
    assert!(connected.connected);
    assert!(connected.last_sync.is_some());
    let first = connected.data.clone().unwrap();

    let synced = source.sync("u1", "apple_watch").await.unwrap();
    assert!(synced.data.unwrap().recorded_at >= first.recorded_at);

    let disconnected = source.disconnect("u1", "apple_watch").await.unwrap();
    assert!(!disconnected.connected);
    assert!(disconnected.data.is_none());

    let err = source.sync("u1", "apple_watch").await.unwrap_err();
    assert_eq!(err, WearableError::NotConnected("apple_watch".into()));
}

#[tokio::test]
async fn test_connect_twice_keeps_reading() {
    let source = SimulatedDeviceSource::with_seed(3);
    let first = source.connect("u1", DeviceKind::Whoop).await.unwrap();
    let second = source.connect("u1", DeviceKind::Whoop).await.unwrap();
    assert_eq!(first.data, second.data);
}

#[tokio::test]
async fn test_users_are_isolated() {
    let source = SimulatedDeviceSource::with_seed(3);
    source.connect("u1", DeviceKind::Garmin).await.unwrap();

    let other = source.list("u2").await;
    assert!(other.iter().all(|d| !d.connected));
}

#[tokio::test]
async fn test_unknown_device() {
    let source = SimulatedDeviceSource::with_seed(3);
    let err = source.sync("u1", "pebble").await.unwrap_err();
    assert_eq!(err, WearableError::UnknownDevice("pebble".into()));
    assert!(source.disconnect("u1", "pebble").await.is_err());
}
