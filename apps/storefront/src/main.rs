//! # GoMarketplace Storefront Shell
//!
//! Development entry point: drives the cart store from a terminal.
//! The actual setup is in lib.rs so mobile hosts can link the same code.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match gomarket_storefront::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Storefront exited with an error");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
