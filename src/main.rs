use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = gw_deviations::telemetry::init_tracing() {
        eprintln!("{err}");
    }

    match gw_deviations::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
