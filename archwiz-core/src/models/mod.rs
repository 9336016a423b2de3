pub mod choices;
mod sections;
mod solution;

pub use choices::{
    AccessPattern, ApplicationType, AuthMethod, AvailabilityTarget, Choice, ComplianceFramework,
    ComputePreference, CostPriority, Region, RetentionPeriod, StorageType, TrafficPattern,
};
pub use sections::{
    ApplicationAnswers, ApplicationField, BudgetAnswers, BudgetField, DataAnswers, DataField,
    GeographicAnswers, GeographicField, ScalingAnswers, ScalingField, Section, SecurityAnswers,
    SecurityField,
};
pub use solution::{
    ComplexityPreference, EntrySource, EntrySourceData, Provider, ProviderStrategy,
    SolutionParameters, SolutionParametersPatch,
};
