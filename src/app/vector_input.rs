use eframe::egui::{TextEdit, Ui};

use crate::app::parse_input::*;
use crate::constants::*;
use crate::types::Vec3;

/// A triple of numeric text fields with prefix tags, e.g. X/Y/Z or W/H/D.
pub struct VectorInputData {
    pub xv: f32,
    pub yv: f32,
    pub zv: f32,
    pub xs: String,
    pub ys: String,
    pub zs: String,
    prefixes: [&'static str; 3],
}

impl VectorInputData {
    pub fn new(prefixes: [&'static str; 3], xv: f32, yv: f32, zv: f32) -> Self {
        Self {
            xv,
            yv,
            zv,
            xs: format!("{} {}", prefixes[0], xv),
            ys: format!("{} {}", prefixes[1], yv),
            zs: format!("{} {}", prefixes[2], zv),
            prefixes,
        }
    }

    pub fn show(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.add(TextEdit::singleline(&mut self.xs).desired_width(GUI_FIELD_INPUT_WIDTH));
            ui.add(TextEdit::singleline(&mut self.ys).desired_width(GUI_FIELD_INPUT_WIDTH));
            ui.add(TextEdit::singleline(&mut self.zs).desired_width(GUI_FIELD_INPUT_WIDTH));
        });
    }

    /// Parses all three fields; all must be accepted.
    pub fn parse(&mut self) -> bool {
        let mut success = true;
        success &= parse_field(self.prefixes[0], &mut self.xv, &mut self.xs);
        success &= parse_field(self.prefixes[1], &mut self.yv, &mut self.ys);
        success &= parse_field(self.prefixes[2], &mut self.zv, &mut self.zs);
        success
    }

    pub fn vec3(&self) -> Vec3 {
        Vec3::new(self.xv, self.yv, self.zv)
    }

    pub fn set(&mut self, v: Vec3) {
        self.xv = v.x;
        self.yv = v.y;
        self.zv = v.z;
        self.xs = format!("{} {}", self.prefixes[0], v.x);
        self.ys = format!("{} {}", self.prefixes[1], v.y);
        self.zs = format!("{} {}", self.prefixes[2], v.z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_all_fields_or_reports_failure() {
        let mut data = VectorInputData::new(["X:", "Y:", "Z:"], 1.0, 2.0, 3.0);
        data.xs = "4".to_string();
        assert!(data.parse());
        assert_eq!(data.vec3(), Vec3::new(4.0, 2.0, 3.0));

        data.ys = "oops".to_string();
        assert!(!data.parse());
        // The broken field keeps its prior value.
        assert_eq!(data.vec3(), Vec3::new(4.0, 2.0, 3.0));
    }

    #[test]
    fn set_resyncs_the_field_text() {
        let mut data = VectorInputData::new(["W:", "H:", "D:"], 2.0, 2.0, 2.0);
        data.set(Vec3::new(1.0, 3.5, 2.0));
        assert_eq!(data.xs, "W: 1");
        assert_eq!(data.ys, "H: 3.5");
    }
}
