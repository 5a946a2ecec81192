//! App Configuration resource models

pub mod collection;
pub mod common;
pub mod environment;
pub mod feature;
pub mod git_config;
pub mod property;
pub mod segment;

pub use collection::Collection;
pub use common::{
    CollectionRef, ConfigValue, EnvironmentRef, FeatureRef, PropertyRef, RolloutPercentage,
    SegmentRule, TargetSegments, ValueFormat, ValueType,
};
pub use environment::Environment;
pub use feature::Feature;
pub use git_config::{GitConfig, GitConfigPrototype, GitSyncResult};
pub use property::Property;
pub use segment::{Segment, SegmentCondition, SegmentOperator};
