mod cli;
mod infra;
mod routes;
mod server;
mod validate;

use candidate_intake::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
