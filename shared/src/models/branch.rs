//! Branch locations and payment methods

use serde::{Deserialize, Serialize};

/// One of the vendor's two operating regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchLocation {
    MarechalCandidoRondon,
    FozDoIguacu,
}

impl BranchLocation {
    pub const ALL: [BranchLocation; 2] = [Self::MarechalCandidoRondon, Self::FozDoIguacu];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MarechalCandidoRondon => "Marechal Cândido Rondon",
            Self::FozDoIguacu => "Foz do Iguaçu",
        }
    }
}

/// Payment method (recorded only, never settled here)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Pix,
    Card,
    Cash,
}

impl PaymentMethod {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pix => "PIX",
            Self::Card => "Cartão",
            Self::Cash => "Dinheiro",
        }
    }
}
