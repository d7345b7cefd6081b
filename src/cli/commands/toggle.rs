//! Toggle command handler

use crate::cli::ListArgs;
use crate::client::{LoadOutcome, SyncOutcome};
use crate::config::Config;
use crate::domain::EpisodeId;
use crate::models::Episode;

use super::list::build_controller;

pub async fn cmd_toggle(config: &Config, id: &str, args: &ListArgs) -> anyhow::Result<()> {
    let controller = build_controller(config, args.filters()).await?;
    let id = EpisodeId::from(id);

    // Only loaded episodes can be toggled, so page until it shows up.
    controller.load_initial().await;
    while !contains(&controller.snapshot().await.items, &id) {
        if controller.load_more().await == LoadOutcome::Skipped {
            break;
        }
    }

    let Some(pending) = controller.commit_local(&id).await else {
        println!("Episode {id} is not in the list for these filters.");
        println!("Try again with --show-watched or a --search term.");
        return Ok(());
    };

    let episode = &pending.episode;
    println!("{}", episode.display_line());

    match controller.sync_remote(&pending).await {
        SyncOutcome::Synced => println!("Saved."),
        SyncOutcome::Absorbed => println!("Saved locally; the backend could not be updated."),
    }

    Ok(())
}

fn contains(items: &[Episode], id: &EpisodeId) -> bool {
    items.iter().any(|e| &e.id == id)
}
