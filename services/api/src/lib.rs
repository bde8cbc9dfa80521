mod cli;
mod infra;
mod report;
mod routes;
mod server;

use quota_levy::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
