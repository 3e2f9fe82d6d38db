//! Store resolution from the leading lines of a ticket.

use serde::{Deserialize, Serialize};

use super::blocks::Block;
use super::BlockExtractor;
use crate::models::ticket::StoreDescriptor;

/// Name given to tickets whose store could not be located.
pub const DEFAULT_STORE_NAME: &str = "Mercadona";

/// Default number of leading lines searched for a marker.
pub const DEFAULT_HEADER_LINES: usize = 10;

/// A location marker and the store it identifies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreMarker {
    /// Substring that identifies the store.
    pub marker: String,

    /// Display name of the store.
    pub name: String,

    /// City of the store.
    pub city: String,
}

impl StoreMarker {
    pub fn new(marker: &str, name: &str, city: &str) -> Self {
        Self {
            marker: marker.to_string(),
            name: name.to_string(),
            city: city.to_string(),
        }
    }

    /// Known stores, highest priority first.
    pub fn builtin() -> Vec<Self> {
        vec![
            Self::new("GALAPAGAR", "Mercadona Galapagar", "GALAPAGAR"),
            Self::new("LOS VASCOS", "Mercadona Madrid Los Vascos", "MADRID"),
            Self::new("MADRID", "Mercadona Madrid Los Vascos", "MADRID"),
            Self::new("POZUELO", "Mercadona Pozuelo", "POZUELO DE ALARCON"),
            Self::new("TORRELODONES", "Mercadona Torrelodones", "TORRELODONES"),
        ]
    }

    /// Match against an already upper-cased line.
    fn matches(&self, upper_line: &str) -> bool {
        upper_line.contains(&self.marker.to_uppercase())
    }

    fn descriptor(&self) -> StoreDescriptor {
        StoreDescriptor::new(&self.name, &self.city)
    }
}

/// Maps the first lines of a block to a known store.
#[derive(Debug, Clone)]
pub struct StoreResolver {
    markers: Vec<StoreMarker>,
    header_lines: usize,
}

impl StoreResolver {
    pub fn new(markers: Vec<StoreMarker>) -> Self {
        Self {
            markers,
            header_lines: DEFAULT_HEADER_LINES,
        }
    }

    /// Set how many leading lines are searched.
    pub fn with_header_lines(mut self, lines: usize) -> Self {
        self.header_lines = lines;
        self
    }

    /// Store for `lines`, or the generic store with an empty city.
    ///
    /// Leading lines are scanned in order; on each line the markers are
    /// tried in priority order and the first hit ends the search.
    pub fn resolve(&self, lines: &[&str]) -> StoreDescriptor {
        self.find(lines)
            .unwrap_or_else(|| StoreDescriptor::new(DEFAULT_STORE_NAME, ""))
    }

    fn find(&self, lines: &[&str]) -> Option<StoreDescriptor> {
        lines
            .iter()
            .take(self.header_lines)
            .find_map(|line| {
                let upper = line.to_uppercase();
                self.markers.iter().find(|marker| marker.matches(&upper))
            })
            .map(StoreMarker::descriptor)
    }
}

impl Default for StoreResolver {
    fn default() -> Self {
        Self::new(StoreMarker::builtin())
    }
}

impl BlockExtractor for StoreResolver {
    type Output = StoreDescriptor;

    fn extract(&self, block: &Block<'_>) -> Option<Self::Output> {
        self.find(block.lines())
    }
}
