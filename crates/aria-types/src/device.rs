use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Whoop,
    AppleWatch,
    Garmin,
    Fitbit,
}

impl DeviceKind {
    pub const ALL: [DeviceKind; 4] = [Self::Whoop, Self::AppleWatch, Self::Garmin, Self::Fitbit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Whoop => "whoop",
            Self::AppleWatch => "apple_watch",
            Self::Garmin => "garmin",
            Self::Fitbit => "fitbit",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Whoop => "WHOOP 4.0",
            Self::AppleWatch => "Apple Watch",
            Self::Garmin => "Garmin Forerunner",
            Self::Fitbit => "Fitbit Charge",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown device kind '{}'", s))
    }
}

/// Simulated metrics from one sync
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceReading {
    pub heart_rate: u32,
    pub resting_heart_rate: u32,
    pub hrv_ms: u32,
    pub steps: u32,
    pub calories: u32,
    pub sleep_hours: f32,
    /// 0-100, WHOOP-style recovery
    pub recovery_score: Option<u32>,
    pub strain: Option<f32>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub kind: DeviceKind,
    pub connected: bool,
    pub last_sync: Option<DateTime<Utc>>,
    pub data: Option<DeviceReading>,
}
