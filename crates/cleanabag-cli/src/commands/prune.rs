use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use cleanabag_core::{
    api::WallabagClient,
    prune::{select_prunable, PruneCriteria},
    Credentials,
};

/// Pause between delete calls so the instance is not hammered.
const DELETE_PACING: Duration = Duration::from_millis(500);

pub async fn run(
    credentials: &Credentials,
    date: &str,
    include_unread: bool,
    include_starred: bool,
    delete: bool,
) -> Result<()> {
    // Validate the cutoff before touching the network.
    let cutoff = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("wrong date format {:?}, expected \"YYYY-MM-DD\"", date))?;

    let client = WallabagClient::connect(credentials).await?;

    let total = client.total_entries().await?;
    println!("There are {} articles saved on your wallabag instance.", total);

    if total == 0 {
        println!("Nothing to delete, leaving.");
        return Ok(());
    }

    let entries = client.all_entries(total).await?;

    println!(
        "Will remove articles older than {} (unread: {}, starred: {}).",
        cutoff.format("%Y-%m-%d"),
        include_unread,
        include_starred
    );

    let criteria = PruneCriteria {
        cutoff,
        include_unread,
        include_starred,
    };
    let doomed = select_prunable(&entries, &criteria);

    if doomed.is_empty() {
        println!("Nothing to delete, leaving.");
        return Ok(());
    }

    println!("This command will remove {} entries:", doomed.len());
    for entry in &doomed {
        let unread_marker = if entry.is_unread() { "🆕" } else { "  " };
        let starred_marker = if entry.is_starred { "⭐" } else { "  " };

        println!(
            "-  {} {}{} {}",
            entry.updated_at.format("%Y-%m-%d"),
            unread_marker,
            starred_marker,
            entry.display_title()
        );
    }

    if !delete {
        println!("\nDry run only. Re-run with --delete to remove these entries.");
        return Ok(());
    }

    // One delete per call; the bulk endpoint is not reliable server-side.
    for entry in &doomed {
        tracing::debug!("Deleting entry {}", entry.id);

        let deleted = client.delete_entry(entry.id).await?;
        println!(
            "Entry {} ({}) has been deleted.",
            deleted.display_title(),
            deleted.url.as_deref().unwrap_or("-")
        );

        tokio::time::sleep(DELETE_PACING).await;
    }

    Ok(())
}
