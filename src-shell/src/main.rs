#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rsvp_shell::run().await
}
