/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound (driven) ports describe what the application core needs from
/// the outside world: module descriptors, output destinations and progress
/// feedback.
pub mod outbound;
