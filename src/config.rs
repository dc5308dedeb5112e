use serde::{Deserialize, Serialize};

/// Tunables for the table skeleton reconstruction engine.
///
/// Every component that needs a tolerance takes `&EngineConfig` rather than
/// a free-standing constant, so a caller can tune behaviour per document
/// without touching the engine's source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Coordinate-equality tolerance, in page units. Two points within this
    /// distance on each axis are treated as the same point.
    pub epsilon: f64,
    /// Small negative slack allowed on the parametric segment-intersection
    /// test, to tolerate grid-corner touches that fall just short of the
    /// segment proper.
    pub segment_intersection_slack: f64,
    /// Minimum segment length considered during canonicalisation; shorter
    /// edges are below the skeleton builder's noise floor and are dropped.
    pub min_segment_length: f64,
    /// How far above a table's bounding box to search for its title.
    pub title_search_margin: f64,
    /// Pages reporting more tables than this are discarded as noise.
    pub max_tables_per_page: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            epsilon: 5.0,
            segment_intersection_slack: -0.1,
            min_segment_length: 3.0,
            title_search_margin: 25.0,
            max_tables_per_page: 5,
        }
    }
}
