#[tokio::main]
async fn main() {
    salon_backend::run().await;
}
