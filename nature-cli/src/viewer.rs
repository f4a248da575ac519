//! Interactive viewer for the built-in demos
//!
//! Draws a scene through egui, forwards pointer and keyboard input to its
//! listeners, and rebuilds it whenever the config file changes on disk.

use crate::demos::Demo;
use crate::settings::SceneArgs;
use eframe::egui;
use nature_core::{
    FrameHandle, FrameScheduler, Hsl, InputEvent, NativeEvent, Scene, Surface, Vector, Viewport,
};
use notify::{Event, RecommendedWatcher, Watcher};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

const FRAME_SECONDS: f64 = 1.0 / 60.0;
const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(12, 12, 20);

pub fn run(demo: Demo, args: SceneArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.resolve(demo)?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("nature - {}", demo.name()))
            .with_inner_size([config.width + 16.0, config.height + 56.0]),
        ..Default::default()
    };
    eframe::run_native(
        "nature",
        options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(demo, args, cc)))),
    )?;
    Ok(())
}

/// Frame requests become egui repaint requests
struct RepaintScheduler {
    ctx: egui::Context,
    issued: u64,
}

impl FrameScheduler for RepaintScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.issued += 1;
        self.ctx.request_repaint();
        FrameHandle::new(self.issued)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        // egui cannot retract a repaint; a stopped scene ignores the frame.
        log::trace!("frame {} cancelled", handle.raw());
    }
}

/// Paints onto the canvas rect, with scene coordinates relative to its corner
struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self) {
        self.painter.rect_filled(self.rect, 0.0, BACKGROUND);
    }

    fn fill_disc(&mut self, center: Vector, radius: f32, color: Hsl) {
        let [r, g, b] = color.to_rgb();
        self.painter.circle_filled(
            self.rect.min + egui::vec2(center.x(), center.y()),
            radius,
            egui::Color32::from_rgb(r, g, b),
        );
    }
}

pub struct ViewerApp {
    demo: Demo,
    args: SceneArgs,
    egui_ctx: egui::Context,
    scene: Option<Scene>,
    last_error: Option<String>,
    playing: bool,
    last_frame: f64,
    last_hover: Option<egui::Pos2>,
    config_path: Option<PathBuf>,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
}

impl ViewerApp {
    pub fn new(demo: Demo, args: SceneArgs, cc: &eframe::CreationContext<'_>) -> Self {
        let (tx, rx) = mpsc::channel();
        let config_path = args.config_path().map(PathBuf::from);

        let mut watcher = None;
        if let Some(path) = &config_path {
            watcher = notify::recommended_watcher(move |res| {
                // The receiver is gone during shutdown
                let _ = tx.send(res);
            })
            .ok();
            if let Some(w) = watcher.as_mut() {
                if let Err(e) = w.watch(path, notify::RecursiveMode::NonRecursive) {
                    log::warn!("cannot watch {}: {}", path.display(), e);
                }
            }
        }

        let mut app = Self {
            demo,
            args,
            egui_ctx: cc.egui_ctx.clone(),
            scene: None,
            last_error: None,
            playing: true,
            last_frame: 0.0,
            last_hover: None,
            config_path,
            file_watcher: watcher,
            file_receiver: rx,
        };
        app.reload_scene();
        app
    }

    fn reload_scene(&mut self) {
        if let Some(old) = self.scene.as_mut() {
            old.stop();
        }
        let scheduler = RepaintScheduler {
            ctx: self.egui_ctx.clone(),
            issued: 0,
        };
        let started = self
            .args
            .resolve(self.demo)
            .and_then(|config| self.demo.builder(config).start(scheduler));
        match started {
            Ok(scene) => {
                self.scene = Some(scene);
                self.last_error = None;
            }
            Err(e) => {
                log::error!("cannot start {}: {}", self.demo.name(), e);
                self.last_error = Some(e.to_string());
                self.scene = None;
                self.playing = false;
            }
        }
    }

    fn check_file_changes(&mut self) {
        let mut needs_reload = false;
        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(Event {
                    kind: notify::EventKind::Modify(_),
                    paths,
                    ..
                }) => {
                    if let Some(path) = &self.config_path {
                        needs_reload |= paths.contains(path);
                    }
                }
                Ok(_) => {}
                Err(e) => log::warn!("file watcher error: {}", e),
            }
        }

        if needs_reload {
            log::info!("config changed, restarting {}", self.demo.name());
            self.reload_scene();
        }
    }

    /// Queue this update's pointer and keyboard input for the scene
    fn forward_input(&mut self, ctx: &egui::Context, response: &egui::Response) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };

        let hover = response.hover_pos();
        if hover.is_some() && hover != self.last_hover {
            if let Some(pos) = hover {
                scene.dispatch(InputEvent::PointerMove {
                    page: Vector::new(pos.x, pos.y),
                });
            }
        }
        self.last_hover = hover;

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                scene.dispatch(InputEvent::Click {
                    page: Vector::new(pos.x, pos.y),
                });
            }
        }

        let keys: Vec<egui::Key> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => Some(*key),
                    _ => None,
                })
                .collect()
        });
        for key in keys {
            scene.dispatch(InputEvent::Native(
                NativeEvent::new("keydown").with_key(key.name()),
            ));
        }
    }

    fn advance(&mut self, surface: &mut PainterSurface<'_>, now: f64, force_step: bool) -> bool {
        let Some(scene) = self.scene.as_mut() else {
            return false;
        };
        let due = self.playing && now - self.last_frame >= FRAME_SECONDS;
        if !(due || force_step) || scene.pending_tick().is_none() {
            return false;
        }
        self.last_frame = now;
        match scene.frame(surface) {
            Ok(report) => report.is_some(),
            Err(e) => {
                self.last_error = Some(e.to_string());
                self.playing = false;
                false
            }
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();
        let mut step_once = false;

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(if self.playing { "⏸ Pause" } else { "▶ Play" }).clicked() {
                    self.playing = !self.playing;
                }

                if ui.button("⏭ Step").clicked() {
                    step_once = true;
                }

                if ui.button("⏹ Stop").clicked() {
                    if let Some(scene) = self.scene.as_mut() {
                        scene.stop();
                    }
                    self.playing = false;
                }

                if ui.button("⏮ Restart").clicked() {
                    self.reload_scene();
                    self.playing = true;
                }

                ui.separator();

                if let Some(scene) = &self.scene {
                    ui.label(format!(
                        "{}  frame {}  entities {}{}",
                        self.demo.name(),
                        scene.age(),
                        scene.len(),
                        if scene.is_running() { "" } else { "  (stopped)" }
                    ));
                }
            });
        });

        if self.last_error.is_some() {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.set_max_height(100.0);
                if let Some(ref error) = self.last_error {
                    ui.label(
                        egui::RichText::new(format!("Error: {}", error)).color(egui::Color32::RED),
                    );
                }
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(size) = self
                .scene
                .as_ref()
                .map(|scene| egui::vec2(scene.width(), scene.height()))
            else {
                return;
            };
            let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
            let rect = response.rect;
            if let Some(scene) = self.scene.as_mut() {
                scene.set_viewport(Viewport::at(Vector::new(rect.min.x, rect.min.y)));
            }
            self.forward_input(ctx, &response);

            let mut surface = PainterSurface {
                painter: &painter,
                rect,
            };
            let now = ctx.input(|i| i.time);
            if !self.advance(&mut surface, now, step_once) {
                // egui repaints everything, so redraw the current state
                surface.clear();
                if let Some(scene) = &self.scene {
                    let info = scene.info();
                    for entity in scene.entities() {
                        entity.draw(&info, &mut surface);
                    }
                }
            }
        });

        if self.playing {
            ctx.request_repaint_after(Duration::from_secs_f64(FRAME_SECONDS));
        }
    }
}
