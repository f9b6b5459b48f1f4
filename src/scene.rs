use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::math::*;
use crate::types::*;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Vector inputs must be finite numbers. Keeping previous vector.")]
    NonFiniteVector,
    #[error("Vector length is zero or too small. Keeping previous vector.")]
    DegenerateVector,
    #[error("Cube dimensions must be positive numbers.")]
    InvalidCube,
}

/// Everything drawn in the viewport besides the camera: the cube, the axis
/// labels, and the current vector with its derived geometry.
///
/// The displayed vector is always the last value that passed validation;
/// rejected updates leave it untouched. Derived geometry (projection
/// segments, angle arcs, text readout) is rebuilt on every accepted change
/// rather than per frame.
pub struct Scene {
    last_vector: Vec3,
    vector_visible: bool,
    cube: Vec3,
    show_projections: bool,
    pub axis_labels: [String; 3],
    pub units: String,

    spherical: SphericalCoords,
    arc_radius: f32,
    projections: Vec<Vec3>,
    azimuth_arc: Vec<Vec3>,
    elevation_arc: Vec<Vec3>,
    readout: String,
}

impl Default for Scene {
    fn default() -> Self {
        let mut scene = Self {
            last_vector: Vec3::new(2.0, 1.0, 1.5),
            vector_visible: true,
            cube: Vec3::new(2.0, 2.0, 2.0),
            show_projections: true,
            axis_labels: ["X".to_string(), "Y".to_string(), "Z".to_string()],
            units: String::new(),
            spherical: SphericalCoords {
                range: 0.0,
                azimuth: 0.0,
                elevation: 0.0,
            },
            arc_radius: 0.0,
            projections: Vec::new(),
            azimuth_arc: Vec::new(),
            elevation_arc: Vec::new(),
            readout: String::new(),
        };
        scene.rebuild();
        scene
    }
}

impl Scene {
    /// Replaces the current vector if the proposal is valid; otherwise
    /// keeps the previous vector and reports why.
    pub fn apply_vector(&mut self, v: Vec3) -> Result<(), InputError> {
        validate_vector(&v)?;
        self.last_vector = v;
        self.vector_visible = true;
        self.rebuild();
        Ok(())
    }

    /// Spherical entry: range, azimuth and elevation in degrees. A negative
    /// range is treated as zero, which then fails magnitude validation.
    pub fn apply_spherical(&mut self, range: f32, az_deg: f32, el_deg: f32) -> Result<(), InputError> {
        let v = spherical_to_cartesian(range.max(0.0), az_deg.to_radians(), el_deg.to_radians());
        self.apply_vector(v)
    }

    /// Hides the vector and its derived geometry without forgetting the
    /// last valid value.
    pub fn clear_vector(&mut self) {
        self.vector_visible = false;
        self.rebuild();
    }

    pub fn set_show_projections(&mut self, show: bool) {
        self.show_projections = show;
        self.rebuild();
    }

    pub fn set_cube(&mut self, dims: Vec3) -> Result<(), InputError> {
        let ok = [dims.x, dims.y, dims.z]
            .iter()
            .all(|d| d.is_finite() && *d > 0.0);
        if !ok {
            return Err(InputError::InvalidCube);
        }
        self.cube = dims;
        Ok(())
    }

    pub fn vector(&self) -> Option<Vec3> {
        self.vector_visible.then_some(self.last_vector)
    }

    pub fn last_vector(&self) -> Vec3 {
        self.last_vector
    }

    pub fn cube(&self) -> Vec3 {
        self.cube
    }

    pub fn show_projections(&self) -> bool {
        self.show_projections
    }

    pub fn spherical(&self) -> SphericalCoords {
        self.spherical
    }

    pub fn arc_radius(&self) -> f32 {
        self.arc_radius
    }

    /// Endpoints of the axis-plane projection segments, all rooted at the
    /// origin. Empty while projections are toggled off or the vector is
    /// cleared.
    pub fn projections(&self) -> &[Vec3] {
        &self.projections
    }

    pub fn azimuth_arc(&self) -> &[Vec3] {
        &self.azimuth_arc
    }

    pub fn elevation_arc(&self) -> &[Vec3] {
        &self.elevation_arc
    }

    pub fn readout(&self) -> &str {
        &self.readout
    }

    /// Regenerates the text readout, keeping the unit suffix current after
    /// the units field changes.
    pub fn refresh_readout(&mut self) {
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.projections.clear();
        self.azimuth_arc.clear();
        self.elevation_arc.clear();
        self.readout.clear();

        if !self.vector_visible {
            return;
        }

        let v = self.last_vector;
        self.spherical = cartesian_to_spherical(&v);

        if self.show_projections {
            self.projections.push(Vec3::new(v.x, v.y, 0.0));
            self.projections.push(Vec3::new(v.x, 0.0, v.z));
            self.projections.push(Vec3::new(0.0, v.y, v.z));
        }

        // Arc radius kept readable: near the vector but inside the axes.
        self.arc_radius = (self.spherical.range * 0.6)
            .max(0.6)
            .min(AXIS_ARROW_LENGTH * 0.9);
        self.azimuth_arc = azimuth_arc_points(self.spherical.azimuth, self.arc_radius, ARC_SEGMENTS);
        self.elevation_arc = elevation_arc_points(
            self.spherical.azimuth,
            self.spherical.elevation,
            self.arc_radius,
            ARC_SEGMENTS,
        );

        self.readout = format!(
            "Vector → ({:.3}, {:.3}, {:.3}) {u} | Azimuth θ: {:.1}°  Elevation φ: {:.1}°  Range r: {:.3} {u}",
            v.x,
            v.y,
            v.z,
            self.spherical.azimuth.to_degrees(),
            self.spherical.elevation.to_degrees(),
            self.spherical.range,
            u = self.units,
        );
    }
}

fn validate_vector(v: &Vec3) -> Result<(), InputError> {
    if !(v.x.is_finite() && v.y.is_finite() && v.z.is_finite()) {
        return Err(InputError::NonFiniteVector);
    }
    if !vector_is_valid(v) {
        return Err(InputError::DegenerateVector);
    }
    Ok(())
}

/// Serializable snapshot of the scene for project save/load.
#[derive(Serialize, Deserialize)]
pub struct SceneConfig {
    pub vector: [f32; 3],
    pub cube: [f32; 3],
    pub axis_labels: [String; 3],
    pub units: String,
    pub show_projections: bool,
}

impl Scene {
    pub fn to_config(&self) -> SceneConfig {
        SceneConfig {
            vector: self.last_vector.into(),
            cube: self.cube.into(),
            axis_labels: self.axis_labels.clone(),
            units: self.units.clone(),
            show_projections: self.show_projections,
        }
    }

    /// All-or-nothing: every value in the config is validated before any
    /// field of the scene is overwritten, so a rejected file leaves the
    /// displayed state untouched.
    pub fn apply_config(&mut self, config: SceneConfig) -> Result<(), InputError> {
        let vector = Vec3::from(config.vector);
        validate_vector(&vector)?;
        self.set_cube(Vec3::from(config.cube))?;
        self.axis_labels = config.axis_labels;
        self.units = config.units;
        self.show_projections = config.show_projections;
        self.apply_vector(vector)
    }
}
