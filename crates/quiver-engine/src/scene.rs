//! Named, ordered charge collections.

use indexmap::IndexMap;
use quiver_field::{ChargeMarker, ChargeSource};

use crate::config::ConfigError;

/// The charges of one animation, addressable by name.
///
/// Sources are kept in a contiguous `Vec` so the aggregator can take them
/// as a slice; insertion order is summation order.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    names: IndexMap<String, usize>,
    sources: Vec<ChargeSource>,
}

impl Scene {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named source. Returns its index in summation order.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        source: ChargeSource,
    ) -> Result<usize, ConfigError> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(ConfigError::DuplicateCharge { name });
        }
        let index = self.sources.len();
        self.names.insert(name, index);
        self.sources.push(source);
        Ok(index)
    }

    /// Look up a source by name.
    pub fn get(&self, name: &str) -> Option<&ChargeSource> {
        self.names.get(name).map(|&i| &self.sources[i])
    }

    /// Name of the source at `index`.
    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.names.get_index(index).map(|(name, _)| name.as_str())
    }

    /// All sources in summation order.
    pub fn sources(&self) -> &[ChargeSource] {
        &self.sources
    }

    /// Names in summation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    /// Number of charges.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// `true` if the scene has no charges.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Where each charge is at time `t`, for the renderer.
    pub fn markers_at(&self, t: f64) -> Vec<ChargeMarker> {
        self.names
            .iter()
            .map(|(name, &i)| {
                let source = &self.sources[i];
                ChargeMarker {
                    name: name.clone(),
                    position: source.position_at(t),
                    charge: source.charge(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use quiver_field::{LinearMotion, Stationary};

    fn scene() -> Scene {
        let mut scene = Scene::new();
        scene
            .insert(
                "anchor",
                ChargeSource::new(2.0, Stationary { position: DVec2::ONE }),
            )
            .unwrap();
        scene
            .insert(
                "drifter",
                ChargeSource::new(
                    -1.0,
                    LinearMotion {
                        start: DVec2::ZERO,
                        velocity: DVec2::X,
                    },
                ),
            )
            .unwrap();
        scene
    }

    #[test]
    fn preserves_insertion_order() {
        let scene = scene();
        assert_eq!(scene.names().collect::<Vec<_>>(), vec!["anchor", "drifter"]);
        assert_eq!(scene.name_of(1), Some("drifter"));
        assert_eq!(scene.sources()[0].charge(), 2.0);
        assert_eq!(scene.get("drifter").unwrap().charge(), -1.0);
        assert!(scene.get("ghost").is_none());
    }

    #[test]
    fn rejects_duplicate_names() {
        let mut scene = scene();
        let err = scene
            .insert("anchor", ChargeSource::new(1.0, Stationary { position: DVec2::ZERO }))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateCharge {
                name: "anchor".to_string()
            }
        );
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn markers_follow_trajectories() {
        let markers = scene().markers_at(3.0);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].name, "anchor");
        assert_eq!(markers[0].position, DVec2::ONE);
        assert_eq!(markers[1].position, DVec2::new(3.0, 0.0));
        assert_eq!(markers[1].charge, -1.0);
        // Negative time clamps to the start.
        assert_eq!(scene().markers_at(-1.0)[1].position, DVec2::ZERO);
    }
}
