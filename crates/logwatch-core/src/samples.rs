//! Bundled sample payloads for quick exploration.

use std::fmt;
use std::str::FromStr;

use crate::ParseError;

/// Single successful login from a known country and device.
pub const SAMPLE_LOW: &str = r#"{
  "request_id": "demo-low",
  "logs": [
    {
      "event_id": "e-low-1",
      "ts": "2026-02-03T10:00:00Z",
      "actor": { "user_id": "u123" },
      "action": "LOGIN",
      "result": "SUCCESS",
      "source": { "ip": "203.0.113.10", "country": "KR", "device_id": "dev-a" },
      "target": { "resource": "auth", "sensitivity": "LOW" }
    }
  ],
  "context": {
    "baseline": {
      "known_countries": ["KR"],
      "known_devices": ["dev-a"],
      "typical_login_hours": [9, 10, 11, 12, 13, 14, 15, 16, 17]
    }
  }
}"#;

/// Three failed logins within a few minutes from a known device.
pub const SAMPLE_MED: &str = r#"{
  "request_id": "demo-med",
  "logs": [
    {
      "event_id": "e-med-1",
      "ts": "2026-02-03T10:00:10Z",
      "actor": { "user_id": "u123" },
      "action": "LOGIN",
      "result": "FAIL",
      "source": { "ip": "203.0.113.10", "country": "KR", "device_id": "dev-a" },
      "target": { "resource": "auth", "sensitivity": "LOW" }
    },
    {
      "event_id": "e-med-2",
      "ts": "2026-02-03T10:01:10Z",
      "actor": { "user_id": "u123" },
      "action": "LOGIN",
      "result": "FAIL",
      "source": { "ip": "203.0.113.10", "country": "KR", "device_id": "dev-a" },
      "target": { "resource": "auth", "sensitivity": "LOW" }
    },
    {
      "event_id": "e-med-3",
      "ts": "2026-02-03T10:02:10Z",
      "actor": { "user_id": "u123" },
      "action": "LOGIN",
      "result": "FAIL",
      "source": { "ip": "203.0.113.10", "country": "KR", "device_id": "dev-a" },
      "target": { "resource": "auth", "sensitivity": "LOW" }
    }
  ],
  "context": {
    "baseline": {
      "known_countries": ["KR"],
      "known_devices": ["dev-a"],
      "typical_login_hours": [9, 10, 11, 12, 13, 14, 15, 16, 17]
    }
  }
}"#;

/// Repeated night-time login failures from an unknown country and device.
pub const SAMPLE_HIGH: &str = r#"{
  "request_id": "demo-high",
  "logs": [
    {
      "event_id": "e-high-1",
      "ts": "2026-02-03T01:00:10Z",
      "actor": { "user_id": "u123" },
      "action": "LOGIN",
      "result": "FAIL",
      "source": { "ip": "198.51.100.10", "country": "US", "device_id": "dev-x" },
      "target": { "resource": "auth", "sensitivity": "LOW" }
    },
    {
      "event_id": "e-high-2",
      "ts": "2026-02-03T01:01:10Z",
      "actor": { "user_id": "u123" },
      "action": "LOGIN",
      "result": "FAIL",
      "source": { "ip": "198.51.100.10", "country": "US", "device_id": "dev-x" },
      "target": { "resource": "auth", "sensitivity": "LOW" }
    },
    {
      "event_id": "e-high-3",
      "ts": "2026-02-03T01:02:10Z",
      "actor": { "user_id": "u123" },
      "action": "LOGIN",
      "result": "FAIL",
      "source": { "ip": "198.51.100.10", "country": "US", "device_id": "dev-x" },
      "target": { "resource": "auth", "sensitivity": "LOW" }
    },
    {
      "event_id": "e-high-4",
      "ts": "2026-02-03T01:03:10Z",
      "actor": { "user_id": "u123" },
      "action": "LOGIN",
      "result": "FAIL",
      "source": { "ip": "198.51.100.10", "country": "US", "device_id": "dev-x" },
      "target": { "resource": "auth", "sensitivity": "LOW" }
    }
  ],
  "context": {
    "baseline": {
      "known_countries": ["KR"],
      "known_devices": ["dev-a"]
    }
  }
}"#;

/// Named sample selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sample {
    /// [`SAMPLE_LOW`].
    Low,
    /// [`SAMPLE_MED`].
    Med,
    /// [`SAMPLE_HIGH`].
    High,
}

impl Sample {
    /// Returns the raw payload text of this sample.
    pub fn text(self) -> &'static str {
        match self {
            Self::Low => SAMPLE_LOW,
            Self::Med => SAMPLE_MED,
            Self::High => SAMPLE_HIGH,
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "low",
            Self::Med => "med",
            Self::High => "high",
        };
        f.write_str(name)
    }
}

impl FromStr for Sample {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "med" | "medium" => Ok(Self::Med),
            "high" => Ok(Self::High),
            other => Err(ParseError::UnknownSample(other.to_string())),
        }
    }
}
