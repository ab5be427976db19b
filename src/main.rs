#[tokio::main]
async fn main() {
    payments_backend::run().await;
}
