#[tokio::main]
async fn main() -> anyhow::Result<()> {
    feedtrack_server::main_lib::run().await
}
