mod app;
mod logger;
mod network;
mod util;

use clap::Parser;

use app::{AppConfig, AudiographApp, NetworkParams, ViewMode};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Featuring-network JSON, as a file path or an http(s) URL.
    #[arg(long, default_value = "spotify_featuring_network.json")]
    data: String,

    /// Start in the slide deck instead of the network view.
    #[arg(long)]
    presentation: bool,

    /// Skip the vinyl loading animation.
    #[arg(long)]
    skip_intro: bool,

    #[arg(short, long)]
    verbose: bool,

    #[arg(long, allow_negative_numbers = true)]
    link_distance: Option<f32>,

    #[arg(long, allow_negative_numbers = true)]
    charge_strength: Option<f32>,

    #[arg(long, allow_negative_numbers = true)]
    center_strength: Option<f32>,

    #[arg(long, allow_negative_numbers = true)]
    collision_radius: Option<f32>,

    #[arg(long)]
    node_size: Option<f32>,

    #[arg(long)]
    max_nodes: Option<usize>,

    #[arg(long)]
    max_edges: Option<usize>,
}

impl Args {
    /// Overrides are clamped to the slider ranges.
    fn params(&self) -> NetworkParams {
        let defaults = NetworkParams::default();
        NetworkParams {
            link_distance: self.link_distance.unwrap_or(defaults.link_distance),
            charge_strength: self.charge_strength.unwrap_or(defaults.charge_strength),
            center_strength: self.center_strength.unwrap_or(defaults.center_strength),
            collision_radius: self.collision_radius.unwrap_or(defaults.collision_radius),
            node_size: self.node_size.unwrap_or(defaults.node_size),
            max_nodes: self.max_nodes.unwrap_or(defaults.max_nodes),
            max_edges: self.max_edges.unwrap_or(defaults.max_edges),
        }
        .clamped()
    }
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    logger::init_logger(args.verbose);

    let config = AppConfig {
        source: args.data.clone(),
        params: args.params(),
        start_mode: if args.presentation {
            ViewMode::Presentation
        } else {
            ViewMode::Network
        },
        skip_intro: args.skip_intro,
    };
    tracing::info!(source = %config.source, mode = ?config.start_mode, "starting audiograph");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1440.0, 920.0])
            .with_title("AUDIOGRAPH"),
        ..Default::default()
    };

    eframe::run_native(
        "AUDIOGRAPH",
        options,
        Box::new(move |cc| Ok(Box::new(AudiographApp::new(cc, config)))),
    )
}
