//! Mission catalog

use shared::models::{Mission, MissionKind};

/// Read-only mission definitions, ordered by id
#[derive(Debug, Clone)]
pub struct MissionCatalog {
    missions: Vec<Mission>,
}

impl MissionCatalog {
    pub fn new(mut missions: Vec<Mission>) -> Self {
        missions.sort_by_key(|m| m.id);
        missions.dedup_by_key(|m| m.id);
        Self { missions }
    }

    /// Default storefront missions
    pub fn standard() -> Self {
        Self::new(vec![
            Mission::new(1, "Primeiro Pedido", MissionKind::OrdersPlaced, 1, 5),
            Mission::new(2, "Colecionador", MissionKind::CollectiblesOwned, 5, 10),
            Mission::new(3, "Festa Garantida", MissionKind::BulkOrderPlaced, 1, 15),
            Mission::new(4, "Rodada Completa", MissionKind::ItemsInSingleOrder, 10, 10),
            Mission::new(5, "Cliente Fiel", MissionKind::OrdersPlaced, 5, 20),
        ])
    }

    pub fn get(&self, id: u32) -> Option<&Mission> {
        self.missions
            .binary_search_by_key(&id, |m| m.id)
            .ok()
            .map(|i| &self.missions[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mission> {
        self.missions.iter()
    }

    pub fn all(&self) -> &[Mission] {
        &self.missions
    }
}

impl Default for MissionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
