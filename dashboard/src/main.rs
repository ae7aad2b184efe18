use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dashboard::launcher::launch("config/settings").await?;
    Ok(())
}
