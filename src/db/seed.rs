//! Startup data for the in-memory store.

use anyhow::{Context, Result, bail};
use std::path::Path;
use tracing::info;

use crate::models::Episode;

const BUNDLED_SEED: &str = include_str!("../../data/seed_episodes.json");

/// The catalog compiled into the binary.
pub fn bundled() -> Result<Vec<Episode>> {
    let episodes: Vec<Episode> =
        serde_json::from_str(BUNDLED_SEED).context("Failed to parse bundled seed episodes")?;
    check_numbering(&episodes).context("Invalid bundled seed episodes")?;
    Ok(episodes)
}

pub fn load_from_path(path: &Path) -> Result<Vec<Episode>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file: {}", path.display()))?;

    let episodes: Vec<Episode> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse seed file: {}", path.display()))?;
    check_numbering(&episodes)
        .with_context(|| format!("Invalid seed file: {}", path.display()))?;
    Ok(episodes)
}

/// Season and episode numbers are 1-based.
fn check_numbering(episodes: &[Episode]) -> Result<()> {
    for episode in episodes {
        if episode.season == 0 {
            bail!("Episode {} has season 0; numbering starts at 1", episode.id);
        }
        if episode.episode == 0 {
            bail!("Episode {} has episode number 0; numbering starts at 1", episode.id);
        }
    }
    Ok(())
}

/// Loads the seed file when one is configured, otherwise the bundled catalog.
pub fn load(path: Option<&Path>) -> Result<Vec<Episode>> {
    let episodes = match path {
        Some(path) => load_from_path(path)?,
        None => bundled()?,
    };

    info!(
        count = episodes.len(),
        source = path.map_or_else(|| "bundled".to_string(), |p| p.display().to_string()),
        "Loaded seed episodes"
    );

    Ok(episodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_seed_parses() {
        let episodes = bundled().unwrap();
        assert_eq!(episodes.len(), 14);
        assert!(episodes.iter().any(|e| e.watched));
        assert!(episodes.iter().any(|e| !e.watched));
    }

    #[test]
    fn load_from_missing_path_fails_with_context() {
        let err = load(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read seed file"));
    }

    #[test]
    fn load_from_path_reads_custom_file() {
        let path = std::env::temp_dir().join(format!("episodic-seed-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"[{"id":"x","seriesId":"s","seriesTitle":"S","season":1,"episode":1,
                "title":"T","description":"D","durationSeconds":10,
                "airDate":"2022-02-02","watched":true}]"#,
        )
        .unwrap();

        let episodes = load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].id.as_str(), "x");
        assert!(episodes[0].watched);
    }

    #[test]
    fn zero_season_or_episode_is_rejected() {
        let path = std::env::temp_dir().join(format!("episodic-seed-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"[{"id":"zero","seriesId":"s","seriesTitle":"S","season":0,"episode":3,
                "title":"T","description":"D","durationSeconds":10,
                "airDate":"2022-02-02","watched":false}]"#,
        )
        .unwrap();
        let err = load(Some(&path)).unwrap_err();
        std::fs::remove_file(&path).ok();

        let message = format!("{err:#}");
        assert!(message.contains("Invalid seed file"));
        assert!(message.contains("Episode zero has season 0"));

        let mut episodes = bundled().unwrap();
        episodes[0].episode = 0;
        let err = check_numbering(&episodes).unwrap_err();
        assert!(err.to_string().contains("episode number 0"));
    }
}
