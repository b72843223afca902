//! A validating registry used to assemble a [`Rules`](crate::geo::Rules)
//! value once, at load time, from raw region/edge/nation records. Mirrors
//! the teacher's province-registry-then-border-registry builder pattern
//! (`geo::builder` in the reference crate), simplified to a single pass
//! since this crate's region/edge records are already flat.

use std::collections::{HashMap, HashSet};

use crate::geo::{Border, Mode, Region, RegionId, Rules};
use crate::nation::NationId;

#[derive(Debug, thiserror::Error)]
pub enum RulesBuildError {
    #[error("edge references unknown region `{0}`")]
    UnknownRegion(RegionId),
    #[error("coast `{0}` names a parent that is not a known region: `{1}`")]
    UnknownParent(RegionId, RegionId),
}

#[derive(Debug, Default)]
pub struct RulesBuilder {
    regions: HashMap<RegionId, Region>,
    edges: HashSet<(RegionId, RegionId, Mode)>,
}

impl RulesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_region(&mut self, region: Region) -> &mut Self {
        self.regions.insert(region.id.clone(), region);
        self
    }

    /// Adds an edge and its symmetric counterpart.
    pub fn add_edge(&mut self, from: RegionId, to: RegionId, mode: Mode) -> &mut Self {
        self.edges.insert((from.clone(), to.clone(), mode));
        self.edges.insert((to, from, mode));
        self
    }

    pub fn build(self) -> Result<Rules, RulesBuildError> {
        for (from, to, _) in &self.edges {
            if !self.regions.contains_key(from) {
                return Err(RulesBuildError::UnknownRegion(from.clone()));
            }
            if !self.regions.contains_key(to) {
                return Err(RulesBuildError::UnknownRegion(to.clone()));
            }
        }

        for region in self.regions.values() {
            if let Some(parent) = &region.parent {
                if !self.regions.contains_key(parent) {
                    return Err(RulesBuildError::UnknownParent(
                        region.id.clone(),
                        parent.clone(),
                    ));
                }
            }
        }

        let mut home_centers: HashMap<NationId, HashSet<RegionId>> = HashMap::new();
        for region in self.regions.values() {
            if let Some(nation) = &region.home_center_of {
                home_centers
                    .entry(nation.clone())
                    .or_default()
                    .insert(region.id.clone());
            }
        }

        let mut adjacency: HashMap<RegionId, Vec<Border>> = HashMap::new();
        for (from, to, mode) in &self.edges {
            adjacency.entry(from.clone()).or_default().push(Border {
                from: from.clone(),
                to: to.clone(),
                mode: *mode,
            });
        }

        Ok(Rules {
            regions: self.regions,
            edges: self.edges,
            adjacency,
            home_centers,
        })
    }
}
