//! Store configuration: simulated latency per service operation.
//!
//! # Responsibility
//! - Describe how long each service call waits before touching state.
//! - Load and validate configuration from JSON.
//!
//! # Invariants
//! - Defaults reproduce the latency profile of the mock backend: 300 ms for
//!   every CRUD call, with the notification feed's own per-call timings.
//! - No single latency may exceed `MAX_LATENCY`.

use serde::{Deserialize, Deserializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Upper bound accepted by `StoreConfig::validate`.
pub const MAX_LATENCY: Duration = Duration::from_secs(10);

const DEFAULT_LATENCY: Duration = Duration::from_millis(300);

/// Configuration error.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    LatencyTooLarge {
        service: &'static str,
        operation: &'static str,
        latency_ms: u128,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid store config: {err}"),
            Self::LatencyTooLarge {
                service,
                operation,
                latency_ms,
            } => write!(
                f,
                "{service}.{operation} latency {latency_ms}ms exceeds the {}ms limit",
                MAX_LATENCY.as_millis()
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::LatencyTooLarge { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Simulated round-trip time for each operation of one service.
///
/// JSON values are milliseconds; missing keys fall back to 300 ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub get_all: Duration,
    pub get_by_id: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
    /// `mark_as_read` / `mark_as_unread`.
    pub mark: Duration,
    /// `mark_all_as_read`.
    pub mark_all: Duration,
}

impl<'de> Deserialize<'de> for LatencyProfile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        LatencyOverrides::deserialize(deserializer)
            .map(|overrides| overrides.apply(LatencyProfile::default()))
    }
}

/// Millisecond overrides read from JSON; absent keys leave the base value.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
struct LatencyOverrides {
    get_all: Option<u64>,
    get_by_id: Option<u64>,
    create: Option<u64>,
    update: Option<u64>,
    delete: Option<u64>,
    mark: Option<u64>,
    mark_all: Option<u64>,
}

impl LatencyOverrides {
    fn apply(self, base: LatencyProfile) -> LatencyProfile {
        let pick = |value: Option<u64>, fallback: Duration| {
            value.map(Duration::from_millis).unwrap_or(fallback)
        };
        LatencyProfile {
            get_all: pick(self.get_all, base.get_all),
            get_by_id: pick(self.get_by_id, base.get_by_id),
            create: pick(self.create, base.create),
            update: pick(self.update, base.update),
            delete: pick(self.delete, base.delete),
            mark: pick(self.mark, base.mark),
            mark_all: pick(self.mark_all, base.mark_all),
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::uniform(DEFAULT_LATENCY)
    }
}

impl LatencyProfile {
    /// Same latency for every operation.
    pub const fn uniform(latency: Duration) -> Self {
        Self {
            get_all: latency,
            get_by_id: latency,
            create: latency,
            update: latency,
            delete: latency,
            mark: latency,
            mark_all: latency,
        }
    }

    /// No artificial delay at all.
    pub const fn instant() -> Self {
        Self::uniform(Duration::ZERO)
    }

    /// Per-call timings of the notification feed.
    pub const fn notifications() -> Self {
        Self {
            get_all: Duration::from_millis(300),
            get_by_id: Duration::from_millis(200),
            create: Duration::from_millis(400),
            update: Duration::from_millis(300),
            delete: Duration::from_millis(200),
            mark: Duration::from_millis(200),
            mark_all: Duration::from_millis(500),
        }
    }

    fn validate(&self, service: &'static str) -> Result<(), ConfigError> {
        let operations = [
            ("get_all", self.get_all),
            ("get_by_id", self.get_by_id),
            ("create", self.create),
            ("update", self.update),
            ("delete", self.delete),
            ("mark", self.mark),
            ("mark_all", self.mark_all),
        ];
        for (operation, latency) in operations {
            if latency > MAX_LATENCY {
                return Err(ConfigError::LatencyTooLarge {
                    service,
                    operation,
                    latency_ms: latency.as_millis(),
                });
            }
        }
        Ok(())
    }
}

/// Latency configuration for every service owned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub contacts: LatencyProfile,
    pub deals: LatencyProfile,
    pub tasks: LatencyProfile,
    pub activities: LatencyProfile,
    /// Partial overrides layer onto `LatencyProfile::notifications()`.
    #[serde(deserialize_with = "deserialize_notification_profile")]
    pub notifications: LatencyProfile,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            contacts: LatencyProfile::default(),
            deals: LatencyProfile::default(),
            tasks: LatencyProfile::default(),
            activities: LatencyProfile::default(),
            notifications: LatencyProfile::notifications(),
        }
    }
}

impl StoreConfig {
    /// Zero latency everywhere; used by tests and batch tooling.
    pub const fn instant() -> Self {
        Self::uniform(Duration::ZERO)
    }

    /// One latency for every operation of every service.
    pub const fn uniform(latency: Duration) -> Self {
        let profile = LatencyProfile::uniform(latency);
        Self {
            contacts: profile,
            deals: profile,
            tasks: profile,
            activities: profile,
            notifications: profile,
        }
    }

    /// Parses a JSON config and validates it.
    ///
    /// Missing services keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects latencies above `MAX_LATENCY`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.contacts.validate("contacts")?;
        self.deals.validate("deals")?;
        self.tasks.validate("tasks")?;
        self.activities.validate("activities")?;
        self.notifications.validate("notifications")?;
        Ok(())
    }
}

fn deserialize_notification_profile<'de, D>(deserializer: D) -> Result<LatencyProfile, D::Error>
where
    D: Deserializer<'de>,
{
    LatencyOverrides::deserialize(deserializer)
        .map(|overrides| overrides.apply(LatencyProfile::notifications()))
}
