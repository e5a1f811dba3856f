use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};

use crate::network::{NetworkData, load_network};

mod graph;
mod highlight;
mod params;
mod physics;
mod presentation;
mod render_utils;
#[cfg(test)]
mod test_support;
mod ui;

pub use params::NetworkParams;

use graph::CenterPulse;
use physics::Simulation;
use presentation::Presentation;
use ui::{LoadingScreen, SearchState, TerminalLog};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Network,
    Presentation,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// File path or http(s) URL of the featuring-network JSON.
    pub source: String,
    pub params: NetworkParams,
    pub start_mode: ViewMode,
    pub skip_intro: bool,
}

pub struct AudiographApp {
    config: AppConfig,
    state: AppState,
    intro: Option<LoadingScreen>,
    mode: ViewMode,
    presentation: Presentation,
}

enum AppState {
    Loading {
        rx: Receiver<Result<NetworkData, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    data: Arc<NetworkData>,
    params: NetworkParams,
    default_params: NetworkParams,
    highlighted: Option<String>,
    hovered: Option<usize>,
    dragging: Option<usize>,
    canvas_size: Vec2,
    graph_dirty: bool,
    graph_cache: Option<RenderGraph>,
    pulse: CenterPulse,
    search: SearchState,
    controls_open: bool,
    narrative_open: bool,
    terminal: TerminalLog,
}

/// The capped subset of the network currently laid out on the canvas.
struct RenderGraph {
    nodes: Vec<RenderNode>,
    links: Vec<RenderLink>,
    index_by_id: HashMap<String, usize>,
    neighbors: Vec<Vec<usize>>,
    simulation: Simulation,
    frame: u64,
}

struct RenderNode {
    id: String,
    name: String,
    val: f64,
    hover_progress: f32,
    glitch_seed: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct RenderLink {
    source: usize,
    target: usize,
    weight: f64,
    /// Index into `NetworkData::edges`.
    edge: usize,
}

impl AudiographApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        ui::apply_terminal_style(&cc.egui_ctx);

        let state = Self::start_load(config.source.clone());
        let intro = (!config.skip_intro).then(LoadingScreen::new);
        Self {
            mode: config.start_mode,
            config,
            state,
            intro,
            presentation: Presentation::new(),
        }
    }

    fn spawn_load(source: String) -> Receiver<Result<NetworkData, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_network(&source).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(source: String) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(source),
        }
    }

    fn loaded_data(&self) -> Option<&Arc<NetworkData>> {
        match &self.state {
            AppState::Ready(model) => Some(&model.data),
            AppState::Loading { .. } | AppState::Error(_) => None,
        }
    }

    fn poll_loader(&mut self) {
        let AppState::Loading { rx } = &self.state else {
            return;
        };

        let next_state = match rx.try_recv() {
            Ok(Ok(data)) => AppState::Ready(Box::new(ViewModel::new(
                Arc::new(data),
                self.config.params,
            ))),
            Ok(Err(error)) => {
                tracing::error!(source = %self.config.source, %error, "failed to load network data");
                AppState::Error(error)
            }
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                AppState::Error("Background load worker disconnected".to_owned())
            }
        };
        self.state = next_state;
    }
}

impl eframe::App for AudiographApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_loader();

        if let Some(intro) = self.intro.as_mut() {
            if !intro.is_complete() {
                intro.show(ctx);
                return;
            }
            self.intro = None;
        }

        if self.mode == ViewMode::Presentation {
            if let AppState::Ready(model) = &mut self.state {
                model.pause();
            }
            let data = self.loaded_data().cloned();
            self.presentation.show(ctx, data.as_deref(), &mut self.mode);
            return;
        }

        let mut transition = None;
        match &mut self.state {
            AppState::Loading { .. } => {
                ui::show_navigation_shell(ctx, &mut self.mode);
                egui::CentralPanel::default()
                    .frame(egui::Frame::NONE.fill(egui::Color32::BLACK))
                    .show(ctx, |ui| {
                        ui::show_stats_box(ui.ctx(), ui.max_rect(), None);
                        ui.vertical_centered(|ui| {
                            ui.add_space(160.0);
                            ui.monospace("> FETCHING_NETWORK_DATA...");
                            ui.add_space(8.0);
                            ui.spinner();
                        });
                    });
                ctx.request_repaint();
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the featuring network");
                    ui.add_space(6.0);
                    ui.label(format!("source: {}", self.config.source));
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.config.source.clone()));
                    }
                });
            }
            AppState::Ready(model) => model.show(ctx, &mut self.mode),
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
