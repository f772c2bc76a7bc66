fn main() -> std::process::ExitCode {
    match docfinder_lib::run() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("docfinder: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}
