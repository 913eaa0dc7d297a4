mod cli;
mod config;
mod demo;
mod error;
mod infra;
mod telemetry;

pub use error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
