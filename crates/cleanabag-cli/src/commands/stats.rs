use anyhow::Result;

use cleanabag_core::{api::WallabagClient, Credentials};

pub async fn run(credentials: &Credentials) -> Result<()> {
    let client = WallabagClient::connect(credentials).await?;

    let total = client.total_entries().await?;
    let archived = client.archived_entries().await?;
    let starred = client.starred_entries().await?;
    let unread = total.saturating_sub(archived);

    println!("Entries on your wallabag instance:");
    println!("  total:    {}", total);
    println!("  unread:   {}", unread);
    println!("  archived: {}", archived);
    println!("  starred:  {}", starred);

    Ok(())
}
