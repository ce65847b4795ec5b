use std::process::ExitCode;

use corsserve::server::{self, Server};
use corsserve::{logger, Config, ServerError};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_startup_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ServerError> {
    let cfg = Config::load()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(ServerError::Runtime)?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), ServerError> {
    let server = Server::bind(cfg)?;
    let addr = server.local_addr().map_err(ServerError::Bind)?;

    logger::log_server_start(&addr, server.root());
    server::spawn_signal_handler(server.shutdown_handle());

    server.run().await;
    logger::log_server_stopped();
    Ok(())
}
