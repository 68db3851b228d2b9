//! Government portal registry
//!
//! Static topic -> ordered source list mapping. Order matters: the fusion
//! engine tries sources front-to-back and reports provenance in this order.

use crate::corpus::Topic;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An authoritative external source for one topic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// Portal URL
    pub url: String,

    /// Human-readable provenance label
    pub label: String,
}

impl SourceDescriptor {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
        }
    }
}

/// Topic-keyed registry of portal sources
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: HashMap<Topic, Vec<SourceDescriptor>>,
}

impl SourceRegistry {
    /// Build a registry from an explicit map (tests use this to leave a
    /// topic unconfigured)
    pub fn with_sources(sources: HashMap<Topic, Vec<SourceDescriptor>>) -> Self {
        Self { sources }
    }

    /// Ordered sources for a topic; empty for an unconfigured topic
    pub fn sources_for(&self, topic: Topic) -> &[SourceDescriptor] {
        self.sources.get(&topic).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The full configured map, for observability tooling
    pub fn all(&self) -> &HashMap<Topic, Vec<SourceDescriptor>> {
        &self.sources
    }
}

impl Default for SourceRegistry {
    /// The verified Indian government portal map.
    fn default() -> Self {
        let mut sources = HashMap::new();

        sources.insert(
            Topic::Rti,
            vec![
                SourceDescriptor::new(
                    "https://rtionline.gov.in/",
                    "RTI Online Portal — Official Portal (NIC / DoPT)",
                ),
                SourceDescriptor::new(
                    "https://cic.gov.in/",
                    "Central Information Commission (CIC) — Official Portal",
                ),
                SourceDescriptor::new(
                    "https://doj.gov.in/right-to-information",
                    "Department of Justice — Right to Information",
                ),
                SourceDescriptor::new(
                    "https://www.indiacode.nic.in/handle/123456789/1879",
                    "India Code — Right to Information Act 2005 (Official Legislation Repository)",
                ),
            ],
        );

        sources.insert(
            Topic::DomesticViolence,
            vec![
                SourceDescriptor::new(
                    "https://www.indiacode.nic.in/handle/123456789/15436",
                    "India Code — Protection of Women from Domestic Violence Act 2005",
                ),
                SourceDescriptor::new(
                    "https://nalsa.gov.in/",
                    "National Legal Services Authority (NALSA) — Free Legal Aid",
                ),
                SourceDescriptor::new(
                    "https://cic.gov.in/",
                    "Central Information Commission — Legal Resources",
                ),
            ],
        );

        sources.insert(
            Topic::Divorce,
            vec![
                SourceDescriptor::new(
                    "https://www.indiacode.nic.in/handle/123456789/2055",
                    "India Code — Hindu Marriage Act 1955 (Official Legislation Repository)",
                ),
                SourceDescriptor::new(
                    "https://nalsa.gov.in/",
                    "National Legal Services Authority (NALSA) — Free Legal Aid for Family Disputes",
                ),
                SourceDescriptor::new(
                    "https://doj.gov.in/right-to-information",
                    "Department of Justice — Legal Resources",
                ),
            ],
        );

        Self { sources }
    }
}
