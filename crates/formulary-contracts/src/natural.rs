//! Natural-connection flag sets.
//!
//! Both medications and category reports carry a fixed set of named boolean
//! flags describing how a substance relates to naturally derived compounds.
//! Only the flags that are set are ever displayed.

use serde::{Deserialize, Serialize};

/// One of the eight named natural-connection categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NaturalConnection {
    DirectNaturalSource,
    SemiSyntheticNatural,
    StructuralAnalogNatural,
    EndogenousCompound,
    BiosyntheticProduct,
    WorksNaturalPathways,
    FacilitatesNaturalProcesses,
    NoNaturalConnection,
}

impl NaturalConnection {
    /// All categories in display order.
    pub const ALL: [NaturalConnection; 8] = [
        NaturalConnection::DirectNaturalSource,
        NaturalConnection::SemiSyntheticNatural,
        NaturalConnection::StructuralAnalogNatural,
        NaturalConnection::EndogenousCompound,
        NaturalConnection::BiosyntheticProduct,
        NaturalConnection::WorksNaturalPathways,
        NaturalConnection::FacilitatesNaturalProcesses,
        NaturalConnection::NoNaturalConnection,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NaturalConnection::DirectNaturalSource => "Direct Natural Source",
            NaturalConnection::SemiSyntheticNatural => "Semi-Synthetic from Natural",
            NaturalConnection::StructuralAnalogNatural => "Structural Analog of Natural",
            NaturalConnection::EndogenousCompound => "Endogenous Compound",
            NaturalConnection::BiosyntheticProduct => "Biosynthetic Product",
            NaturalConnection::WorksNaturalPathways => "Works via Natural Pathways",
            NaturalConnection::FacilitatesNaturalProcesses => "Facilitates Natural Processes",
            NaturalConnection::NoNaturalConnection => "No Natural Connection",
        }
    }
}

/// The eight natural-connection flags. Missing flags default to false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaturalConnectionFlags {
    pub direct_natural_source: bool,
    pub semi_synthetic_natural: bool,
    pub structural_analog_natural: bool,
    pub endogenous_compound: bool,
    pub biosynthetic_product: bool,
    pub works_natural_pathways: bool,
    pub facilitates_natural_processes: bool,
    pub no_natural_connection: bool,
}

impl NaturalConnectionFlags {
    /// Return true if the given flag is set.
    pub fn has(&self, connection: NaturalConnection) -> bool {
        match connection {
            NaturalConnection::DirectNaturalSource => self.direct_natural_source,
            NaturalConnection::SemiSyntheticNatural => self.semi_synthetic_natural,
            NaturalConnection::StructuralAnalogNatural => self.structural_analog_natural,
            NaturalConnection::EndogenousCompound => self.endogenous_compound,
            NaturalConnection::BiosyntheticProduct => self.biosynthetic_product,
            NaturalConnection::WorksNaturalPathways => self.works_natural_pathways,
            NaturalConnection::FacilitatesNaturalProcesses => self.facilitates_natural_processes,
            NaturalConnection::NoNaturalConnection => self.no_natural_connection,
        }
    }

    /// The set flags, in display order.
    pub fn present(&self) -> Vec<NaturalConnection> {
        NaturalConnection::ALL
            .into_iter()
            .filter(|c| self.has(*c))
            .collect()
    }
}

/// Category-level composition profile carried by category reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryProfile {
    pub predominantly_natural: bool,
    pub mixed_natural_synthetic: bool,
    pub predominantly_synthetic: bool,
    pub natural_therapies_available: bool,
}

impl CategoryProfile {
    /// Labels of the set flags, in display order.
    pub fn labels(&self) -> Vec<&'static str> {
        [
            (self.predominantly_natural, "Predominantly Natural"),
            (self.mixed_natural_synthetic, "Mixed Natural/Synthetic"),
            (self.predominantly_synthetic, "Predominantly Synthetic"),
            (self.natural_therapies_available, "Natural Therapies Available"),
        ]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect()
    }
}
