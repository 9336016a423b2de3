//! The six questionnaire sections.
//!
//! Each section is an independent record. `#[derive(SectionFields)]` adds a
//! typed single-field update enum (`ApplicationField`, `ScalingField`, ...)
//! so callers can only name fields that exist, with values of the declared
//! type. `#[serde(default)]` on every record lets a partially stored section
//! restore with defaults filling the gaps.

use std::fmt;
use std::str::FromStr;

use archwiz_macros::SectionFields;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::choices::{
    AccessPattern, ApplicationType, AuthMethod, AvailabilityTarget, ComplianceFramework,
    ComputePreference, CostPriority, Region, RetentionPeriod, StorageType, TrafficPattern,
};
use crate::QuestionnaireError;

/// Names one of the six sections, in questionnaire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Application,
    Scaling,
    Data,
    Geographic,
    Security,
    Budget,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Application,
        Section::Scaling,
        Section::Data,
        Section::Geographic,
        Section::Security,
        Section::Budget,
    ];

    /// Zero-based step index of this section.
    pub fn step_index(&self) -> usize {
        match self {
            Self::Application => 0,
            Self::Scaling => 1,
            Self::Data => 2,
            Self::Geographic => 3,
            Self::Security => 4,
            Self::Budget => 5,
        }
    }

    pub fn from_step_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Application => ApplicationAnswers::SECTION,
            Self::Scaling => ScalingAnswers::SECTION,
            Self::Data => DataAnswers::SECTION,
            Self::Geographic => GeographicAnswers::SECTION,
            Self::Security => SecurityAnswers::SECTION,
            Self::Budget => BudgetAnswers::SECTION,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Application => "Application & Compute",
            Self::Scaling => "Scaling & Performance",
            Self::Data => "Data & Storage",
            Self::Geographic => "Geographic Distribution",
            Self::Security => "Security & Compliance",
            Self::Budget => "Budget",
        }
    }

    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            Self::Application => ApplicationAnswers::FIELD_NAMES,
            Self::Scaling => ScalingAnswers::FIELD_NAMES,
            Self::Data => DataAnswers::FIELD_NAMES,
            Self::Geographic => GeographicAnswers::FIELD_NAMES,
            Self::Security => SecurityAnswers::FIELD_NAMES,
            Self::Budget => BudgetAnswers::FIELD_NAMES,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = QuestionnaireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == wanted)
            .ok_or_else(|| QuestionnaireError::UnknownSection(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SectionFields)]
#[section(name = "application", field_enum = "ApplicationField")]
#[serde(default)]
pub struct ApplicationAnswers {
    pub name: String,
    pub description: String,
    pub application_type: ApplicationType,
    pub compute_preference: ComputePreference,
    pub languages: Vec<String>,
}

impl Default for ApplicationAnswers {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            application_type: ApplicationType::WebApp,
            compute_preference: ComputePreference::NoPreference,
            languages: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SectionFields)]
#[section(name = "scaling", field_enum = "ScalingField")]
#[serde(default)]
pub struct ScalingAnswers {
    pub expected_users: u64,
    pub peak_requests_per_second: u32,
    pub traffic_pattern: TrafficPattern,
    pub auto_scaling: bool,
    pub availability_target: AvailabilityTarget,
}

impl Default for ScalingAnswers {
    fn default() -> Self {
        Self {
            expected_users: 1_000,
            peak_requests_per_second: 100,
            traffic_pattern: TrafficPattern::Steady,
            auto_scaling: true,
            availability_target: AvailabilityTarget::High,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SectionFields)]
#[section(name = "data", field_enum = "DataField")]
#[serde(default)]
pub struct DataAnswers {
    pub storage_types: Vec<StorageType>,
    pub data_volume_gb: u64,
    pub access_pattern: AccessPattern,
    pub retention_period: RetentionPeriod,
    pub backups_required: bool,
}

impl Default for DataAnswers {
    fn default() -> Self {
        Self {
            storage_types: vec![StorageType::Relational],
            data_volume_gb: 100,
            access_pattern: AccessPattern::Balanced,
            retention_period: RetentionPeriod::Year1,
            backups_required: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SectionFields)]
#[section(name = "geographic", field_enum = "GeographicField")]
#[serde(default)]
pub struct GeographicAnswers {
    pub primary_region: Region,
    pub additional_regions: Vec<Region>,
    pub data_residency_required: bool,
    pub latency_sensitive: bool,
}

impl Default for GeographicAnswers {
    fn default() -> Self {
        Self {
            primary_region: Region::NorthAmerica,
            additional_regions: Vec::new(),
            data_residency_required: false,
            latency_sensitive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SectionFields)]
#[section(name = "security", field_enum = "SecurityField")]
#[serde(default)]
pub struct SecurityAnswers {
    pub compliance: Vec<ComplianceFramework>,
    pub authentication: AuthMethod,
    pub encryption_at_rest: bool,
    pub encryption_in_transit: bool,
    pub network_isolation: bool,
}

impl Default for SecurityAnswers {
    fn default() -> Self {
        Self {
            compliance: Vec::new(),
            authentication: AuthMethod::Oauth,
            encryption_at_rest: true,
            encryption_in_transit: true,
            network_isolation: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SectionFields)]
#[section(name = "budget", field_enum = "BudgetField")]
#[serde(default)]
pub struct BudgetAnswers {
    /// Monthly spend ceiling in USD.
    pub monthly_budget: Decimal,
    pub cost_priority: CostPriority,
    pub reserved_capacity: bool,
}

impl Default for BudgetAnswers {
    fn default() -> Self {
        Self {
            monthly_budget: Decimal::from(1_000),
            cost_priority: CostPriority::Balanced,
            reserved_capacity: false,
        }
    }
}

/// Joins a list for display, using "—" when it is empty.
fn list_display<T: fmt::Display>(items: &[T]) -> String {
    if items.is_empty() {
        return "—".to_string();
    }
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn text_display(s: &str) -> &str {
    if s.trim().is_empty() { "—" } else { s }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

impl fmt::Display for ApplicationAnswers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name:               {}", text_display(&self.name))?;
        writeln!(f, "Description:        {}", text_display(&self.description))?;
        writeln!(f, "Type:               {}", self.application_type)?;
        writeln!(f, "Compute:            {}", self.compute_preference)?;
        write!(f, "Languages:          {}", list_display(&self.languages))
    }
}

impl fmt::Display for ScalingAnswers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Expected users:     {}", self.expected_users)?;
        writeln!(f, "Peak requests/s:    {}", self.peak_requests_per_second)?;
        writeln!(f, "Traffic pattern:    {}", self.traffic_pattern)?;
        writeln!(f, "Auto scaling:       {}", yes_no(self.auto_scaling))?;
        write!(f, "Availability:       {}", self.availability_target)
    }
}

impl fmt::Display for DataAnswers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Storage types:      {}", list_display(&self.storage_types))?;
        writeln!(f, "Data volume (GB):   {}", self.data_volume_gb)?;
        writeln!(f, "Access pattern:     {}", self.access_pattern)?;
        writeln!(f, "Retention:          {}", self.retention_period)?;
        write!(f, "Backups:            {}", yes_no(self.backups_required))
    }
}

impl fmt::Display for GeographicAnswers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Primary region:     {}", self.primary_region)?;
        writeln!(f, "Other regions:      {}", list_display(&self.additional_regions))?;
        writeln!(f, "Data residency:     {}", yes_no(self.data_residency_required))?;
        write!(f, "Latency sensitive:  {}", yes_no(self.latency_sensitive))
    }
}

impl fmt::Display for SecurityAnswers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Compliance:         {}", list_display(&self.compliance))?;
        writeln!(f, "Authentication:     {}", self.authentication)?;
        writeln!(f, "Encrypt at rest:    {}", yes_no(self.encryption_at_rest))?;
        writeln!(f, "Encrypt in transit: {}", yes_no(self.encryption_in_transit))?;
        write!(f, "Network isolation:  {}", yes_no(self.network_isolation))
    }
}

impl fmt::Display for BudgetAnswers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Monthly budget:     ${}", self.monthly_budget)?;
        writeln!(f, "Cost priority:      {}", self.cost_priority)?;
        write!(f, "Reserved capacity:  {}", yes_no(self.reserved_capacity))
    }
}
