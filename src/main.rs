use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    carepulse_lib::init_tracing();

    match carepulse_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "CarePulse stopped");
            eprintln!("carepulse: {e}");
            ExitCode::FAILURE
        }
    }
}
