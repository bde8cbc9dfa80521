use quota_levy_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("quota-levy-api: {err}");
        std::process::exit(1);
    }
}
