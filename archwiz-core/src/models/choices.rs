//! Enumerated answer choices.
//!
//! Every multiple-choice answer in the questionnaire is a closed enum. Each
//! one carries its stable id (the same string serde writes to storage), a
//! short label and a one-line description, so the same type doubles as a
//! row in the read-only metadata tables.

use serde::{Deserialize, Serialize};

/// Common surface of every enumerated answer type.
pub trait Choice: Copy + Sized + 'static {
    /// Name of the metadata table listing this type's values.
    const TABLE: &'static str;

    fn all() -> &'static [Self];
    fn id(&self) -> &'static str;
    fn label(&self) -> &'static str;
    fn description(&self) -> &'static str;
}

/// Declares a choice enum with its id, label and description per variant.
///
/// Variant names must kebab-case to their id; `serde(rename_all)` relies on it.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $table:literal => pub enum $name:ident {
            $( $variant:ident => ($id:literal, $label:literal, $desc:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $( $variant, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $id, )+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }

            pub fn description(&self) -> &'static str {
                match self {
                    $( Self::$variant => $desc, )+
                }
            }

            pub fn parse(s: &str) -> Option<Self> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $( $id => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl $crate::models::choices::Choice for $name {
            const TABLE: &'static str = $table;

            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn id(&self) -> &'static str {
                self.as_str()
            }

            fn label(&self) -> &'static str {
                $name::label(self)
            }

            fn description(&self) -> &'static str {
                $name::description(self)
            }
        }
    };
}

pub(crate) use choice_enum;

choice_enum! {
    /// Broad shape of the workload being described.
    "application-types" => pub enum ApplicationType {
        WebApp => ("web-app", "Web application", "Browser-facing application serving pages or a single-page app"),
        Api => ("api", "API service", "Programmatic HTTP or RPC interface consumed by other systems"),
        Batch => ("batch", "Batch processing", "Scheduled or triggered jobs that process data in bulk"),
        Streaming => ("streaming", "Stream processing", "Continuous processing of event or message streams"),
        MobileBackend => ("mobile-backend", "Mobile backend", "Backend services supporting native mobile clients"),
        MachineLearning => ("machine-learning", "Machine learning", "Model training or inference workloads"),
    }
}

choice_enum! {
    "compute-preferences" => pub enum ComputePreference {
        Serverless => ("serverless", "Serverless", "Functions and fully managed runtimes, billed per invocation"),
        Containers => ("containers", "Containers", "Containerised services on a managed orchestrator"),
        VirtualMachines => ("virtual-machines", "Virtual machines", "Long-lived instances under full operator control"),
        NoPreference => ("no-preference", "No preference", "Let the recommendation pick the compute model"),
    }
}

choice_enum! {
    "traffic-patterns" => pub enum TrafficPattern {
        Steady => ("steady", "Steady", "Load stays within a narrow band throughout the day"),
        Spiky => ("spiky", "Spiky", "Short bursts several times above the baseline"),
        Seasonal => ("seasonal", "Seasonal", "Predictable peaks tied to calendar events"),
        Unpredictable => ("unpredictable", "Unpredictable", "No reliable pattern; capacity must react quickly"),
    }
}

choice_enum! {
    "availability-targets" => pub enum AvailabilityTarget {
        Standard => ("standard", "Standard (99%)", "Single-zone deployment, brief outages acceptable"),
        High => ("high", "High (99.9%)", "Multi-zone deployment with automatic failover"),
        Critical => ("critical", "Critical (99.99%)", "Multi-region active deployment, outages are business-critical"),
    }
}

choice_enum! {
    /// Kind of storage the application needs.
    "storage-types" => pub enum StorageType {
        Relational => ("relational", "Relational database", "Structured data with transactions and SQL queries"),
        Document => ("document", "Document store", "Schemaless JSON-like documents queried by field"),
        KeyValue => ("key-value", "Key-value store", "Low-latency lookups by key, often used for caching and sessions"),
        Object => ("object", "Object storage", "Large binary objects such as media, backups and exports"),
        Graph => ("graph", "Graph database", "Highly connected data traversed by relationship"),
        TimeSeries => ("time-series", "Time-series database", "Timestamped measurements such as metrics and telemetry"),
        Search => ("search", "Search index", "Full-text and faceted search over documents"),
    }
}

choice_enum! {
    /// How data is read and written.
    "access-patterns" => pub enum AccessPattern {
        ReadHeavy => ("read-heavy", "Read heavy", "Reads dominate; replicas and caching pay off"),
        WriteHeavy => ("write-heavy", "Write heavy", "Sustained ingest; write throughput is the bottleneck"),
        Balanced => ("balanced", "Balanced", "Comparable read and write volume"),
        Archival => ("archival", "Archival", "Written once, rarely read; cheapest storage tier wins"),
    }
}

choice_enum! {
    /// How long data must be kept.
    "retention-periods" => pub enum RetentionPeriod {
        Days30 => ("days30", "30 days", "Short-lived operational data"),
        Days90 => ("days90", "90 days", "Typical log and audit window"),
        Year1 => ("year1", "1 year", "Business records kept for a year"),
        Years7 => ("years7", "7 years", "Regulatory retention for financial or health records"),
        Indefinite => ("indefinite", "Indefinite", "Data is never deleted"),
    }
}

choice_enum! {
    "regions" => pub enum Region {
        NorthAmerica => ("north-america", "North America", "United States and Canada"),
        SouthAmerica => ("south-america", "South America", "Brazil, Chile and neighbouring countries"),
        Europe => ("europe", "Europe", "European Union, United Kingdom and EFTA"),
        AsiaPacific => ("asia-pacific", "Asia Pacific", "East Asia, South-East Asia and Oceania"),
        MiddleEast => ("middle-east", "Middle East", "Gulf states and the Levant"),
        Africa => ("africa", "Africa", "Sub-Saharan and North Africa"),
    }
}

choice_enum! {
    "compliance-frameworks" => pub enum ComplianceFramework {
        Hipaa => ("hipaa", "HIPAA", "US health information privacy and security rules"),
        PciDss => ("pci-dss", "PCI DSS", "Payment card data security standard"),
        Soc2 => ("soc2", "SOC 2", "Service organisation controls for security and availability"),
        Gdpr => ("gdpr", "GDPR", "EU personal data protection regulation"),
        Iso27001 => ("iso27001", "ISO 27001", "Information security management standard"),
        Fedramp => ("fedramp", "FedRAMP", "US federal cloud authorisation programme"),
    }
}

choice_enum! {
    "authentication-methods" => pub enum AuthMethod {
        ManagedIdentity => ("managed-identity", "Managed identity", "Provider-managed workload and user identities"),
        Oauth => ("oauth", "OAuth / OIDC", "Token-based delegated authorisation"),
        Saml => ("saml", "SAML", "Enterprise single sign-on federation"),
        ApiKeys => ("api-keys", "API keys", "Static keys issued to calling systems"),
        None => ("none", "None", "Public access without authentication"),
    }
}

choice_enum! {
    "cost-priorities" => pub enum CostPriority {
        MinimizeCost => ("minimize-cost", "Minimise cost", "Accept lower headroom to keep the bill down"),
        Balanced => ("balanced", "Balanced", "Trade cost against performance evenly"),
        MaximizePerformance => ("maximize-performance", "Maximise performance", "Spend more for latency and throughput headroom"),
    }
}
