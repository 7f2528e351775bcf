// SPDX-License-Identifier: MIT OR Apache-2.0
//! Flowdeck - node graph editor
//!
//! A small desktop host embedding the `flowdeck_graph` editor:
//! - Pannable/zoomable canvas with a background grid
//! - Right-click node palette fed by the built-in kind registry
//! - Status bar with graph and view readouts
//!
//! The host owns the view transform and the tracing subscriber; all
//! graph logic lives in the framework crate.

mod app;

use app::FlowdeckApp;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> eframe::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("flowdeck_app=debug".parse().unwrap())
        .add_directive("flowdeck_graph=debug".parse().unwrap());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("starting Flowdeck");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Flowdeck")
            .with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Flowdeck",
        native_options,
        Box::new(|cc| Ok(Box::new(FlowdeckApp::new(cc)))),
    )
}
