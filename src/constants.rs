pub const GUI_SIDEBAR_WIDTH: f32 = 300.0;
pub const GUI_VIEWPORT_WIDTH: f32 = 960.0;
pub const GUI_VIEWPORT_HEIGHT: f32 = 720.0;
pub const GUI_VIEWPORT_PADDING: f32 = 8.0;
pub const GUI_FIELD_INPUT_WIDTH: f32 = 72.0;

/// Vertical field of view of the viewport camera, in radians.
pub const CAMERA_FOV_Y: f32 = 60.0 * std::f32::consts::PI / 180.0;

/// Initial camera pose restored by "reset view".
pub const CAMERA_HOME_POSITION: [f32; 3] = [6.0, 5.0, 8.0];
pub const CAMERA_HOME_TARGET: [f32; 3] = [0.0, 0.0, 0.0];

/// Length of the axis arrows; labels sit just past the tips.
pub const AXIS_ARROW_LENGTH: f32 = 3.5;

/// Half-extent of the ground grid in world units.
pub const GRID_EXTENT: i32 = 10;

/// Sample count for the azimuth/elevation arc polylines.
pub const ARC_SEGMENTS: usize = 96;

/// Smallest vector magnitude accepted as a displayable vector.
pub const MIN_VECTOR_NORM: f32 = 1e-9;

/// Largest absolute value accepted from any numeric input field.
pub const MAX_INPUT_ABS: f32 = 1e6;
