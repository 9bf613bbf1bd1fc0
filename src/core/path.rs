use crate::constants::CAMERA_WAYPOINTS;
use crate::core::config::ConfigError;
use crate::core::scroll::ScrollState;
use glam::Vec3;
use smallvec::SmallVec;

/// Ordered camera waypoints, one per section boundary.
///
/// The table is never empty, so a lookup always has a waypoint to fall back
/// to. Indices past the end clamp to the last entry.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraPath {
    waypoints: SmallVec<[Vec3; 4]>,
}

impl CameraPath {
    pub fn new(waypoints: impl IntoIterator<Item = Vec3>) -> Result<Self, ConfigError> {
        let waypoints: SmallVec<[Vec3; 4]> = waypoints.into_iter().collect();
        if waypoints.is_empty() {
            return Err(ConfigError::EmptyPath);
        }
        if let Some(i) = waypoints.iter().position(|w| !w.is_finite()) {
            return Err(ConfigError::NonFiniteWaypoint(i));
        }
        Ok(Self { waypoints })
    }

    pub fn from_table(table: &[[f32; 3]]) -> Result<Self, ConfigError> {
        Self::new(table.iter().copied().map(Vec3::from))
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    pub fn first(&self) -> Vec3 {
        self.waypoints[0]
    }

    /// Interpolated camera target for a scroll sample.
    pub fn target(&self, scroll: &ScrollState) -> Vec3 {
        let last = self.waypoints.len() - 1;
        let index = scroll.section_index.min(last);
        let current = self.waypoints[index];
        let next = self.waypoints.get(index + 1).copied().unwrap_or(current);
        current + (next - current) * scroll.section_fraction
    }
}

impl Default for CameraPath {
    fn default() -> Self {
        Self {
            waypoints: CAMERA_WAYPOINTS.iter().copied().map(Vec3::from).collect(),
        }
    }
}
