mod snapshot_policy;

pub use snapshot_policy::{split_timestamped_snapshot, SnapshotPolicy, DEFAULT_SNAPSHOT_MARKER};
