#[tokio::main]
async fn main() {
    polyclinic_lib::run().await
}
