use gogo::GogoBuilder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let gogo = GogoBuilder::new().build()?;

    let results = gogo.search("one piece").await?;
    println!("results: {results:#?}");

    let episodes = gogo.fetch_episode_list(&results[0].url).await?;
    println!("episodes: {}", episodes.len());

    let resolved = gogo.resolve_episode(&episodes[0].url).await?;

    println!("play: {}", resolved.play_url);
    println!("download: {}", resolved.download_url);
    Ok(())
}
