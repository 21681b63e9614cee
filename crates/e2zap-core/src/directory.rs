// ── Channel directory ──
//
// Display name -> service reference, built fresh from one listing and
// dropped when the invocation ends. Insertion follows listing order; a
// repeated display name overwrites the earlier entry (two channels sharing a
// name collide silently on the box side too, so we only warn about it).

use indexmap::IndexMap;
use tracing::warn;

use e2zap_api::{Service, ServiceListDocument};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelDirectory {
    channels: IndexMap<String, String>,
}

impl ChannelDirectory {
    /// Build the directory from a decoded listing.
    ///
    /// For a grouped listing, `bouquet_id` selects the bouquets whose
    /// reference matches it exactly. If it is unset, or matches nothing,
    /// every bouquet contributes.
    pub fn from_document(document: &ServiceListDocument, bouquet_id: Option<&str>) -> Self {
        let mut directory = Self::default();

        match document {
            ServiceListDocument::Flat(list) => directory.extend(&list.services),
            ServiceListDocument::Grouped(tree) => {
                let selected = bouquet_id.filter(|id| tree.bouquets.iter().any(|b| b.reference == *id));
                if let (Some(id), None) = (bouquet_id, selected) {
                    warn!(bouquet = %id, "bouquet not in listing, using every bouquet");
                }
                for bouquet in &tree.bouquets {
                    if selected.is_none_or(|id| bouquet.reference == id) {
                        directory.extend(&bouquet.services.services);
                    }
                }
            }
        }

        directory
    }

    fn extend(&mut self, services: &[Service]) {
        for service in services {
            self.insert(service.name.clone(), service.reference.clone());
        }
    }

    /// Insert a channel; a repeated name replaces the previous reference.
    fn insert(&mut self, name: String, reference: String) {
        if let Some(previous) = self.channels.insert(name.clone(), reference) {
            warn!(channel = %name, %previous, "duplicate channel name, keeping the later entry");
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.channels.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// `(name, reference)` pairs in listing order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.channels.iter().map(|(n, r)| (n.as_str(), r.as_str()))
    }
}
