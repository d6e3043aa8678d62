// src/events/mod.rs
//
// Subscription / fan-out layer

pub mod publisher;

pub use publisher::{SnapshotPublisher, SubscriptionId};
