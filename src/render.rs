use eframe::egui::{vec2, Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke};

use crate::constants::*;
use crate::scene::Scene;
use crate::types::*;

pub const BACKGROUND: Color32 = Color32::from_rgb(0x0c, 0x0f, 0x14);
const GRID_LINE: Color32 = Color32::from_rgb(0x1a, 0x1f, 0x29);
const GRID_MAJOR: Color32 = Color32::from_rgb(0x29, 0x32, 0x41);
const AXIS_X: Color32 = Color32::from_rgb(0xff, 0x6b, 0x6b);
const AXIS_Y: Color32 = Color32::from_rgb(0x51, 0xcf, 0x66);
const AXIS_Z: Color32 = Color32::from_rgb(0x4d, 0xab, 0xf7);
const CUBE_FILL: Color32 = Color32::from_rgba_premultiplied(0x3f, 0x51, 0x80, 0x60);
const CUBE_EDGE: Color32 = Color32::from_rgb(0x7f, 0xa2, 0xff);
const VECTOR: Color32 = Color32::from_rgb(0xff, 0xe0, 0x66);
const PROJ_XY: Color32 = Color32::from_rgb(0xff, 0xd1, 0x66);
const PROJ_XZ: Color32 = Color32::from_rgb(0x74, 0xc0, 0xfc);
const PROJ_YZ: Color32 = Color32::from_rgb(0x69, 0xdb, 0x7c);
const ARC_AZIMUTH: Color32 = Color32::from_rgb(0xff, 0x92, 0x2b);
const ARC_ELEVATION: Color32 = Color32::from_rgb(0xb1, 0x97, 0xfc);

const NEAR_PLANE: f32 = 0.05;

/// Perspective look-at camera projecting world points into a viewport
/// rectangle. Y-up, like the orbit controller that drives it.
#[derive(Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y: f32,
}

impl Camera {
    /// World point → viewport position, or `None` behind the near plane.
    pub fn project(&self, rect: &Rect, p: &Vec3) -> Option<Pos2> {
        let back = self.position - self.target;
        let right = Vec3::y().cross(&back);
        let right = if right.norm_squared() > 0.0 {
            right.normalize()
        } else {
            Vec3::x()
        };
        let up = back.normalize().cross(&right);
        let forward = -back.normalize();

        let rel = p - self.position;
        let depth = rel.dot(&forward);
        if depth < NEAR_PLANE {
            return None;
        }
        let focal = 0.5 * rect.height() / (self.fov_y / 2.0).tan();
        let x = rel.dot(&right) * focal / depth;
        let y = rel.dot(&up) * focal / depth;
        Some(rect.center() + vec2(x, -y))
    }
}

type Project<'a> = &'a dyn Fn(Vec3) -> Option<Pos2>;

fn line_3d(painter: &Painter, project: Project, a: Vec3, b: Vec3, stroke: Stroke) {
    if let (Some(pa), Some(pb)) = (project(a), project(b)) {
        painter.line_segment([pa, pb], stroke);
    }
}

fn polyline_3d(painter: &Painter, project: Project, points: &[Vec3], stroke: Stroke) {
    for pair in points.windows(2) {
        line_3d(painter, project, pair[0], pair[1], stroke);
    }
}

/// Flat arrow from `from` to `to` with a screen-space triangular head.
fn arrow_3d(painter: &Painter, project: Project, from: Vec3, to: Vec3, color: Color32, width: f32) {
    let (Some(start), Some(end)) = (project(from), project(to)) else {
        return;
    };
    let vec = end - start;
    let len = vec.length();
    if len < 1.0 {
        return;
    }
    painter.line_segment([start, end], Stroke::new(width, color));

    let head_len = (len * 0.15).clamp(5.0, 15.0);
    let dir = vec / len;
    let perp = vec2(-dir.y, dir.x) * (head_len * 0.4);
    let base = end - dir * head_len;
    painter.add(Shape::convex_polygon(
        vec![end, base + perp, base - perp],
        color,
        Stroke::NONE,
    ));
}

fn label_3d(painter: &Painter, project: Project, at: Vec3, text: &str, color: Color32) {
    if let Some(pos) = project(at) {
        painter.text(pos, Align2::CENTER_CENTER, text, FontId::proportional(14.0), color);
    }
}

/// Ground grid on the XZ plane, with brighter lines through the origin.
pub fn draw_grid(painter: &Painter, project: Project) {
    let s = GRID_EXTENT as f32;
    for i in -GRID_EXTENT..=GRID_EXTENT {
        let t = i as f32;
        let color = if i == 0 { GRID_MAJOR } else { GRID_LINE };
        let stroke = Stroke::new(1.0, color);
        line_3d(painter, project, Vec3::new(t, 0.0, -s), Vec3::new(t, 0.0, s), stroke);
        line_3d(painter, project, Vec3::new(-s, 0.0, t), Vec3::new(s, 0.0, t), stroke);
    }
}

/// Axis arrows with their user-editable labels just past the tips.
pub fn draw_axes(painter: &Painter, project: Project, labels: &[String; 3]) {
    let axes = [
        (Vec3::x(), AXIS_X, &labels[0]),
        (Vec3::y(), AXIS_Y, &labels[1]),
        (Vec3::z(), AXIS_Z, &labels[2]),
    ];
    for (dir, color, label) in axes {
        arrow_3d(painter, project, Vec3::zeros(), dir * AXIS_ARROW_LENGTH, color, 2.0);
        label_3d(painter, project, dir * (AXIS_ARROW_LENGTH + 0.5), label, color);
    }
}

/// Translucent cube centered at the origin with the configured extents.
pub fn draw_cube(painter: &Painter, project: Project, dims: Vec3) {
    let h = dims / 2.0;
    let corners = [
        Vec3::new(-h.x, -h.y, -h.z),
        Vec3::new(h.x, -h.y, -h.z),
        Vec3::new(h.x, h.y, -h.z),
        Vec3::new(-h.x, h.y, -h.z),
        Vec3::new(-h.x, -h.y, h.z),
        Vec3::new(h.x, -h.y, h.z),
        Vec3::new(h.x, h.y, h.z),
        Vec3::new(-h.x, h.y, h.z),
    ];
    let projected: Vec<Option<Pos2>> = corners.iter().map(|c| project(*c)).collect();

    let faces = [[0, 1, 2, 3], [4, 5, 6, 7], [0, 4, 7, 3], [1, 5, 6, 2], [0, 1, 5, 4], [3, 2, 6, 7]];
    for face in faces {
        let pts: Vec<Pos2> = face.iter().filter_map(|&i| projected[i]).collect();
        if pts.len() == 4 {
            painter.add(Shape::convex_polygon(pts, CUBE_FILL, Stroke::NONE));
        }
    }

    let edges = [
        [0, 1], [1, 2], [2, 3], [3, 0],
        [4, 5], [5, 6], [6, 7], [7, 4],
        [0, 4], [1, 5], [2, 6], [3, 7],
    ];
    let stroke = Stroke::new(1.0, CUBE_EDGE);
    for [a, b] in edges {
        if let (Some(pa), Some(pb)) = (projected[a], projected[b]) {
            painter.line_segment([pa, pb], stroke);
        }
    }
}

/// The current vector with its tip marker, projection segments, angle arcs
/// and floating angle annotations.
pub fn draw_vector(painter: &Painter, project: Project, scene: &Scene) {
    let Some(v) = scene.vector() else {
        return;
    };

    let proj_colors = [PROJ_XY, PROJ_XZ, PROJ_YZ];
    for (end, color) in scene.projections().iter().zip(proj_colors) {
        line_3d(painter, project, Vec3::zeros(), *end, Stroke::new(1.5, color));
    }

    polyline_3d(painter, project, scene.azimuth_arc(), Stroke::new(1.5, ARC_AZIMUTH));
    polyline_3d(painter, project, scene.elevation_arc(), Stroke::new(1.5, ARC_ELEVATION));

    arrow_3d(painter, project, Vec3::zeros(), v, VECTOR, 2.5);
    if let Some(tip) = project(v) {
        painter.circle_filled(tip, 3.0, Color32::WHITE);
    }

    let s = scene.spherical();
    let radius = scene.arc_radius();

    // Azimuth annotation at the arc midpoint, lifted off the grid.
    let t_az = s.azimuth / 2.0;
    let mut az_pos = Vec3::new(t_az.cos() * (radius + 0.1), 0.0, t_az.sin() * (radius + 0.1));
    az_pos.y += 0.02 * radius;
    label_3d(
        painter,
        project,
        az_pos,
        &format!("θ {:.1}°", s.azimuth.to_degrees()),
        ARC_AZIMUTH,
    );

    // Elevation annotation offset along the normal of the arc's plane.
    let bearing = Vec3::new(s.azimuth.cos(), 0.0, s.azimuth.sin());
    let t_el = s.elevation / 2.0;
    let el_point = (bearing * t_el.cos() + Vec3::y() * t_el.sin()) * (radius + 0.08);
    let normal = bearing.cross(&Vec3::y()).normalize() * (0.04 * radius);
    label_3d(
        painter,
        project,
        el_point + normal,
        &format!("φ {:.1}°", s.elevation.to_degrees()),
        ARC_ELEVATION,
    );
}

pub fn draw_scene(painter: &Painter, camera: &Camera, rect: Rect, scene: &Scene) {
    painter.rect_filled(rect, 0.0, BACKGROUND);
    let project = |p: Vec3| camera.project(&rect, &p);
    draw_grid(painter, &project);
    draw_cube(painter, &project, scene.cube());
    draw_axes(painter, &project, &scene.axis_labels);
    draw_vector(painter, &project, scene);
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    fn camera() -> Camera {
        Camera {
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::zeros(),
            fov_y: CAMERA_FOV_Y,
        }
    }

    fn rect() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 600.0))
    }

    #[test]
    fn target_projects_to_viewport_center() {
        let p = camera().project(&rect(), &Vec3::zeros()).unwrap();
        assert!((p - rect().center()).length() < 1e-3);
    }

    #[test]
    fn points_behind_the_camera_are_culled() {
        assert!(camera().project(&rect(), &Vec3::new(0.0, 0.0, 20.0)).is_none());
    }

    #[test]
    fn screen_axes_match_world_axes() {
        let cam = camera();
        let r = rect();
        let right = cam.project(&r, &Vec3::new(1.0, 0.0, 0.0)).unwrap();
        let up = cam.project(&r, &Vec3::new(0.0, 1.0, 0.0)).unwrap();
        assert!(right.x > r.center().x);
        assert!((right.y - r.center().y).abs() < 1e-3);
        assert!(up.y < r.center().y);
        assert!((up.x - r.center().x).abs() < 1e-3);
    }

    #[test]
    fn closer_points_project_larger() {
        let cam = camera();
        let r = rect();
        let near = cam.project(&r, &Vec3::new(1.0, 0.0, 5.0)).unwrap();
        let far = cam.project(&r, &Vec3::new(1.0, 0.0, -5.0)).unwrap();
        assert!((near.x - r.center().x) > (far.x - r.center().x));
    }
}
