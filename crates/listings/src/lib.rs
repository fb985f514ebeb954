//! `eventtier-listings`: event records and tier-gated listing views.

pub mod event;
pub mod filter;
pub mod partition;

pub use event::{EventRecord, RawEventRow};
pub use filter::TierFilter;
pub use partition::{Partition, filter_and_partition, partition, partition_with, sort_by_date};
