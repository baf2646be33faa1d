#[tokio::main]
async fn main() {
    if let Err(e) = atomic_swap_watch::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
