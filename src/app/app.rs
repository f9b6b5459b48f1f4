use eframe::egui::{
    CentralPanel, Color32, Context, PointerButton, RichText, ScrollArea, Sense, SidePanel, TextEdit, Ui,
};
use eframe::{App as EguiApp, Frame};
use rand::Rng;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};

use crate::app::vector_input::*;
use crate::constants::*;
use crate::controls::{MouseButton, OrbitControls};
use crate::math::cartesian_to_spherical;
use crate::render::{draw_scene, Camera};
use crate::scene::{Scene, SceneConfig};
use crate::types::*;

#[derive(Clone, Copy, PartialEq)]
enum InputMode {
    Cartesian,
    Angles,
}

pub struct App {
    scene: Scene,
    controls: OrbitControls,

    mode: InputMode,
    cartesian: VectorInputData,
    angles: VectorInputData,
    cube: VectorInputData,
    show_projections: bool,

    warning: Option<String>,
    theme: Theme,
    show_info: bool,
}

impl Default for App {
    fn default() -> Self {
        let scene = Scene::default();
        let controls = OrbitControls::new(
            Vec3::from(CAMERA_HOME_POSITION),
            Vec3::from(CAMERA_HOME_TARGET),
            CAMERA_FOV_Y,
        );

        let v = scene.last_vector();
        let s = cartesian_to_spherical(&v);
        let cube = scene.cube();
        let show_projections = scene.show_projections();

        Self {
            cartesian: VectorInputData::new(["X:", "Y:", "Z:"], v.x, v.y, v.z),
            angles: VectorInputData::new(
                ["R:", "Az:", "El:"],
                s.range,
                s.azimuth.to_degrees(),
                s.elevation.to_degrees(),
            ),
            cube: VectorInputData::new(["W:", "H:", "D:"], cube.x, cube.y, cube.z),
            show_projections,
            scene,
            controls,
            mode: InputMode::Cartesian,
            warning: None,
            theme: Theme::Dark,
            show_info: false,
        }
    }
}

impl EguiApp for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        SidePanel::right("side_panel")
            .exact_width(GUI_SIDEBAR_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                ScrollArea::vertical().show(ui, |ui| {
                    self.side_panel_content(ui);
                });
            });

        CentralPanel::default().show(ctx, |ui| {
            self.central_panel_content(ui);
        });

        ctx.set_visuals(self.theme.visuals());
        // The viewport redraws every frame; the controller's change signal
        // is not used to gate repaints.
        ctx.request_repaint();
    }
}

impl App {
    fn side_panel_content(&mut self, ui: &mut Ui) {
        if ui.button("About").clicked() {
            self.show_info = !self.show_info;
        }
        if self.show_info {
            ui.separator();
            ui.label("Interactive 3D vector visualizer");
            ui.label("Azimuth/elevation arcs, planar projections,");
            ui.label("orbit camera: left dolly, middle pan, right rotate.");
        }

        ui.separator();
        ui.heading("Project");
        if ui.button("Save project").clicked() {
            if let Some(path) = rfd::FileDialog::new().save_file() {
                if let Err(e) = self.save_config(&path) {
                    log::error!("failed to save project: {e}");
                    self.warning = Some(format!("Could not save project: {e}"));
                }
            }
        }
        if ui.button("Load project").clicked() {
            if let Some(path) = rfd::FileDialog::new().pick_file() {
                if let Err(e) = self.load_config(&path) {
                    log::error!("failed to load project: {e}");
                    self.warning = Some(format!("Could not load project: {e}"));
                }
            }
        }

        ui.separator();
        ui.heading("Theme");
        ui.radio_value(&mut self.theme, Theme::Light, "Light");
        ui.radio_value(&mut self.theme, Theme::Dark, "Dark");

        ui.separator();
        ui.heading("Vector");
        ui.horizontal(|ui| {
            ui.radio_value(&mut self.mode, InputMode::Cartesian, "Cartesian");
            ui.radio_value(&mut self.mode, InputMode::Angles, "Spherical");
        });
        match self.mode {
            InputMode::Cartesian => self.cartesian.show(ui),
            InputMode::Angles => {
                self.angles.show(ui);
                ui.label("R range, Az/El degrees");
            }
        }
        ui.horizontal(|ui| {
            ui.label("Units:");
            if ui
                .add(TextEdit::singleline(&mut self.scene.units).desired_width(GUI_FIELD_INPUT_WIDTH))
                .changed()
            {
                self.scene.refresh_readout();
            }
        });
        ui.horizontal(|ui| {
            if ui.button("Update vector").clicked() {
                self.apply_vector_from_inputs();
            }
            if ui.button("Clear").clicked() {
                self.scene.clear_vector();
                self.warning = None;
            }
            if ui.button("Random").clicked() {
                self.random_vector();
            }
        });

        ui.separator();
        ui.heading("Cube");
        self.cube.show(ui);
        if ui.button("Apply dimensions").clicked() {
            self.apply_cube_from_inputs();
        }

        ui.separator();
        ui.heading("Axis labels");
        ui.horizontal(|ui| {
            for label in self.scene.axis_labels.iter_mut() {
                ui.add(TextEdit::singleline(label).desired_width(GUI_FIELD_INPUT_WIDTH));
            }
        });

        ui.separator();
        ui.heading("Display");
        if ui.checkbox(&mut self.show_projections, "Show projections").changed() {
            self.scene.set_show_projections(self.show_projections);
        }
        if ui.button("Reset view").clicked() {
            self.controls.reset();
        }

        ui.separator();
        if let Some(warning) = &self.warning {
            ui.colored_label(Color32::from_rgb(0xff, 0xb4, 0xb4), format!("⚠ {warning}"));
        }
        if !self.scene.readout().is_empty() {
            ui.label(
                RichText::new(self.scene.readout()).color(Color32::from_rgb(0xb8, 0xc1, 0xd1)),
            );
        }
    }

    fn central_panel_content(&mut self, ui: &mut Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;
        self.controls.set_viewport_height(rect.height());

        let buttons = [
            (PointerButton::Primary, MouseButton::Left),
            (PointerButton::Middle, MouseButton::Middle),
            (PointerButton::Secondary, MouseButton::Right),
        ];
        if let Some(pos) = response.interact_pointer_pos() {
            let pointer = Vec2::new(pos.x, pos.y);
            for (egui_button, button) in buttons {
                if response.drag_started_by(egui_button) {
                    self.controls.pointer_down(button, pointer);
                }
            }
            if response.dragged() {
                self.controls.pointer_move(pointer);
            }
        }
        if response.drag_stopped() {
            self.controls.pointer_up();
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                // Scroll up moves the camera closer.
                self.controls.wheel(-scroll);
            }
        }

        self.controls.update();

        let camera = Camera {
            position: self.controls.position,
            target: self.controls.target,
            fov_y: CAMERA_FOV_Y,
        };
        draw_scene(&painter, &camera, rect, &self.scene);
    }

    fn apply_vector_from_inputs(&mut self) {
        let result = match self.mode {
            InputMode::Cartesian => {
                if !self.cartesian.parse() {
                    Err("Enter numeric X, Y, Z.".to_string())
                } else {
                    self.scene
                        .apply_vector(self.cartesian.vec3())
                        .map_err(|e| e.to_string())
                }
            }
            InputMode::Angles => {
                if !self.angles.parse() {
                    Err("Enter numeric Range/Azimuth/Elevation.".to_string())
                } else {
                    self.scene
                        .apply_spherical(self.angles.xv, self.angles.yv, self.angles.zv)
                        .map_err(|e| e.to_string())
                }
            }
        };
        match result {
            Ok(()) => {
                self.warning = None;
                self.sync_fields_from_scene();
            }
            Err(message) => {
                log::warn!("vector update rejected: {message}");
                self.warning = Some(message);
            }
        }
    }

    fn apply_cube_from_inputs(&mut self) {
        if !self.cube.parse() {
            self.warning = Some("Enter numeric width/height/depth.".to_string());
            return;
        }
        match self.scene.set_cube(self.cube.vec3()) {
            Ok(()) => self.warning = None,
            Err(e) => {
                log::warn!("cube update rejected: {e}");
                self.warning = Some(e.to_string());
            }
        }
    }

    fn random_vector(&mut self) {
        let mut rng = rand::thread_rng();
        // Resample until a non-degenerate draw; only the all-zero triple
        // is rejected.
        loop {
            // Half-unit steps in [-3, 3] on each component.
            let v = Vec3::new(
                rng.gen_range(-6..=6) as f32 * 0.5,
                rng.gen_range(-6..=6) as f32 * 0.5,
                rng.gen_range(-6..=6) as f32 * 0.5,
            );
            if self.scene.apply_vector(v).is_ok() {
                self.warning = None;
                self.sync_fields_from_scene();
                return;
            }
        }
    }

    /// Pushes the accepted scene state back into the text fields so both
    /// entry modes show the displayed vector.
    fn sync_fields_from_scene(&mut self) {
        let v = self.scene.last_vector();
        let s = cartesian_to_spherical(&v);
        self.cartesian.set(v);
        self.angles
            .set(Vec3::new(s.range, s.azimuth.to_degrees(), s.elevation.to_degrees()));
        self.cube.set(self.scene.cube());
        self.show_projections = self.scene.show_projections();
    }

    fn save_config(&self, path: &std::path::Path) -> io::Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.scene.to_config())?;
        log::info!("project saved to {}", path.display());
        Ok(())
    }

    fn load_config(&mut self, path: &std::path::Path) -> io::Result<()> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: SceneConfig = serde_json::from_reader(reader)?;
        self.scene
            .apply_config(config)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        self.sync_fields_from_scene();
        self.warning = None;
        log::info!("project loaded from {}", path.display());
        Ok(())
    }
}

#[derive(PartialEq)]
enum Theme {
    Light,
    Dark,
}

impl Theme {
    fn visuals(&self) -> eframe::egui::Visuals {
        match self {
            Theme::Light => eframe::egui::Visuals::light(),
            Theme::Dark => eframe::egui::Visuals::dark(),
        }
    }
}
