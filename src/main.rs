#[tokio::main]
async fn main() {
    gym_scheduler::run().await;
}
