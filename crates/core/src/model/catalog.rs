use airgrid_protocol::RowKind;
use serde::{Deserialize, Serialize};

/// Preferred display order for US broadcast networks. Anything not
/// listed sorts after these, alphabetically.
const NETWORK_ORDER: &[&str] = &[
    "NBC",
    "Peacock",
    "USA Network",
    "E!",
    "CNBC",
    "Golf Channel",
];

/// The fixed, ordered set of row-keys the grid displays.
///
/// Rows come from the catalog, not from whichever keys happen to have
/// broadcasts on a given day — a network with an empty day still gets
/// a (floor-height) row, so the grid shape is stable across days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowCatalog {
    kind: RowKind,
    keys: Vec<String>,
}

impl RowCatalog {
    /// Build a catalog from an explicit, already-ordered key list.
    pub fn new(kind: RowKind, keys: Vec<String>) -> Self {
        Self { kind, keys }
    }

    /// Build a catalog from an unordered set of keys: known networks
    /// first in their preferred order, the rest appended sorted.
    pub fn from_keys(kind: RowKind, mut keys: Vec<String>) -> Self {
        keys.sort();
        keys.dedup();

        let mut ordered = Vec::with_capacity(keys.len());
        if kind == RowKind::Network {
            for known in NETWORK_ORDER {
                if let Some(pos) = keys.iter().position(|k| k == known) {
                    ordered.push(keys.remove(pos));
                }
            }
        }
        ordered.extend(keys);
        Self {
            kind,
            keys: ordered,
        }
    }

    pub fn kind(&self) -> RowKind {
        self.kind
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Display position of a row-key, if it is in the catalog.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
