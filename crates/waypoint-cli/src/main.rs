//! Waypoint CLI Application
//!
//! Command-line interface for the waypoint trip planner.

mod args;
mod cli;
mod commands;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use waypoint_core::{RankConfig, TripPlannerBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        json,
        user,
        rank_precision,
        rebalance_threshold,
        command,
    } = Args::parse();

    let mut rank_config = RankConfig::default();
    if let Some(precision) = rank_precision {
        rank_config.precision = precision;
    }
    if let Some(threshold) = rebalance_threshold {
        rank_config.rebalance_threshold = threshold;
    }

    let planner = TripPlannerBuilder::new()
        .with_database_path(database_file)
        .with_rank_config(rank_config)
        .build()
        .await
        .context("Failed to initialize planner")?;

    let cli = Cli::new(planner, TerminalRenderer::new(!no_color), user, json);

    info!("Waypoint started");

    match command {
        Some(User { command }) => cli.handle_user_command(command).await,
        Some(Trip { command }) => cli.handle_trip_command(command).await,
        Some(Day { command }) => cli.handle_day_command(command).await,
        Some(Place { command }) => cli.handle_place_command(command).await,
        Some(Item { command }) => cli.handle_item_command(command).await,
        None => cli.list_trips(false).await,
    }
}
