use crate::shared::error::ReleaseHelperError;
use crate::shared::Result;

/// Version suffix that marks a pre-release build unless configured otherwise
pub const DEFAULT_SNAPSHOT_MARKER: &str = "-SNAPSHOT";

/// Splits a timestamped snapshot version into its base.
///
/// Deployed snapshots are versioned `<base>-yyyyMMdd.HHmmss-<build>`;
/// for `1.0-20240101.120000-3` this returns `Some("1.0")`.
pub fn split_timestamped_snapshot(version: &str) -> Option<&str> {
    let (rest, build) = version.rsplit_once('-')?;
    if build.is_empty() || !build.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let (base, timestamp) = rest.rsplit_once('-')?;
    let (date, time) = timestamp.split_once('.')?;
    let is_timestamp = date.len() == 8
        && time.len() == 6
        && date.chars().chain(time.chars()).all(|c| c.is_ascii_digit());

    if base.is_empty() || !is_timestamp {
        return None;
    }
    Some(base)
}

/// SnapshotPolicy decides which versions and property values are pre-release
///
/// This is a pure policy object with no I/O; the marker comes from
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPolicy {
    marker: String,
}

impl SnapshotPolicy {
    pub fn new(marker: impl Into<String>) -> Result<Self> {
        let marker = marker.into();
        if marker.trim().is_empty() {
            return Err(ReleaseHelperError::Validation {
                message: "snapshot marker must not be empty".to_string(),
            }
            .into());
        }
        Ok(Self { marker })
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Whether a module or dependency version is a pre-release build
    pub fn is_snapshot(&self, version: &str) -> bool {
        version.ends_with(&self.marker) || self.timestamped_base(version).is_some()
    }

    /// Timestamped deployments only exist for the `-SNAPSHOT` marker
    fn timestamped_base<'a>(&self, version: &'a str) -> Option<&'a str> {
        if self.marker != DEFAULT_SNAPSHOT_MARKER {
            return None;
        }
        split_timestamped_snapshot(version)
    }

    /// Whether a property value pins a pre-release version
    ///
    /// Only the marker suffix counts here; property values are free text.
    pub fn is_snapshot_value(&self, value: &str) -> bool {
        value.ends_with(&self.marker)
    }

    /// Version as reported: timestamped snapshots collapse to `<base><marker>`
    pub fn base_version(&self, version: &str) -> String {
        match self.timestamped_base(version) {
            Some(base) => format!("{}{}", base, self.marker),
            None => version.to_string(),
        }
    }
}

impl Default for SnapshotPolicy {
    fn default() -> Self {
        Self {
            marker: DEFAULT_SNAPSHOT_MARKER.to_string(),
        }
    }
}
