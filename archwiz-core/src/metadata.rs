//! Read-only descriptive tables for every enumerated answer.

use serde::Serialize;

use crate::models::{
    AccessPattern, ApplicationType, AuthMethod, AvailabilityTarget, Choice, ComplexityPreference,
    ComplianceFramework, ComputePreference, CostPriority, EntrySource, Provider, ProviderStrategy,
    Region, RetentionPeriod, StorageType, TrafficPattern,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataTable {
    pub name: &'static str,
    pub entries: Vec<MetadataEntry>,
}

/// The table for a single choice type.
pub fn table<T: Choice>() -> MetadataTable {
    MetadataTable {
        name: T::TABLE,
        entries: T::all()
            .iter()
            .map(|choice| MetadataEntry {
                id: choice.id(),
                label: choice.label(),
                description: choice.description(),
            })
            .collect(),
    }
}

/// Every table, in questionnaire order followed by the flow choices.
pub fn tables() -> Vec<MetadataTable> {
    vec![
        table::<ApplicationType>(),
        table::<ComputePreference>(),
        table::<TrafficPattern>(),
        table::<AvailabilityTarget>(),
        table::<StorageType>(),
        table::<AccessPattern>(),
        table::<RetentionPeriod>(),
        table::<Region>(),
        table::<ComplianceFramework>(),
        table::<AuthMethod>(),
        table::<CostPriority>(),
        table::<EntrySource>(),
        table::<Provider>(),
        table::<ComplexityPreference>(),
        table::<ProviderStrategy>(),
    ]
}

/// Look a table up by name, e.g. `"storage-types"`.
pub fn find_table(name: &str) -> Option<MetadataTable> {
    tables().into_iter().find(|t| t.name == name)
}
