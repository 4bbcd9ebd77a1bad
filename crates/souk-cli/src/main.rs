mod cli;

#[tokio::main]
async fn main() {
    souk_core::init_logging();

    if let Err(e) = cli::run().await {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
