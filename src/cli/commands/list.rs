//! List command handler

use anyhow::Context;
use std::sync::Arc;

use crate::cli::ListArgs;
use crate::client::{
    HttpEpisodeApi, JsonFileOverrideStore, ListController, ListFilters, ListSnapshot, LoadOutcome,
    offline,
};
use crate::config::Config;

pub async fn cmd_list(config: &Config, args: &ListArgs, pages: u32) -> anyhow::Result<()> {
    let controller = build_controller(config, args.filters()).await?;

    controller.load_initial().await;
    for _ in 1..pages {
        if controller.load_more().await == LoadOutcome::Skipped {
            break;
        }
    }

    print_snapshot(&controller.snapshot().await);
    Ok(())
}

pub(super) async fn build_controller(
    config: &Config,
    filters: ListFilters,
) -> anyhow::Result<ListController> {
    let api = HttpEpisodeApi::from_config(&config.client).context("Failed to create API client")?;
    let store = JsonFileOverrideStore::from_config(&config.client)?;
    let dataset = offline::bundled_episodes().context("Bundled offline data is invalid")?;

    Ok(ListController::new(
        Arc::new(api),
        Arc::new(store),
        dataset,
        config.client.page_size,
        filters,
    )
    .await)
}

pub(super) fn print_snapshot(snapshot: &ListSnapshot) {
    if let Some(notice) = &snapshot.notice {
        println!("! {notice}");
        println!();
    }

    if snapshot.items.is_empty() {
        println!("No episodes match the current filters.");
        return;
    }

    for episode in &snapshot.items {
        println!("{}", episode.display_line());
        println!("  ID: {}", episode.id);
    }

    println!();
    if snapshot.has_more {
        println!(
            "{} shown, more available (use --pages {})",
            snapshot.items.len(),
            snapshot.next_page
        );
    } else {
        println!("{} shown", snapshot.items.len());
    }
}
