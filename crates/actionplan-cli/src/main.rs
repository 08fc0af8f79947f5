//! Action plan CLI
//!
//! Command-line host for the action plan engine: edits named plans stored
//! in SQLite and prints them as markdown.

mod args;
mod cli;
mod renderer;

use actionplan_core::{DanglingPolicy, WorkspaceBuilder};
use anyhow::{Context, Result};
use args::{Args, Commands, ShowArgs, ViewArg};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        plan,
        no_color,
        history_limit,
        prune_dangling,
        default_duration,
        command,
    } = Args::parse();

    let mut builder = WorkspaceBuilder::new().with_database_path(database_file);
    if let Some(limit) = history_limit {
        builder = builder.with_history_limit(limit);
    }
    if prune_dangling {
        builder = builder.with_dangling_policy(DanglingPolicy::Prune);
    }
    if let Some(days) = default_duration {
        builder = builder.with_default_duration_days(days);
    }
    let workspace = builder
        .build()
        .await
        .context("Failed to initialize workspace")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Working on plan '{plan}'");
    let cli = Cli::new(workspace, renderer, plan);

    match command {
        Some(Show(args)) => cli.show(args).await,
        Some(List) => cli.list_plans().await,
        Some(Summary) => cli.summary().await,
        Some(Action { command }) => cli.handle_action_command(command).await,
        Some(Task { command }) => cli.handle_task_command(command).await,
        Some(Subtask { command }) => cli.handle_subtask_command(command).await,
        Some(Node { command }) => cli.handle_node_command(command).await,
        Some(Dep { command }) => cli.handle_dep_command(command).await,
        Some(Autopilot(args)) => cli.autopilot(args).await,
        Some(Gantt(args)) => cli.gantt(args.action).await,
        Some(Undo) => cli.undo().await,
        Some(Export(args)) => cli.export(args).await,
        Some(Import(args)) => cli.import(args).await,
        Some(DeletePlan(args)) => cli.delete_plan(args.confirm).await,
        None => {
            cli.show(ShowArgs {
                view: ViewArg::List,
                action: None,
            })
            .await
        }
    }
}
