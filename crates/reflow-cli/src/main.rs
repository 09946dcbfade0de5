#![forbid(unsafe_code)]

use clap::Parser;

fn main() {
    let cli = reflow_cli::Cli::parse();
    reflow_cli::logging::init(cli.verbose);
    let json = cli.wants_json();

    if let Err(error) = reflow_cli::run(cli) {
        if json {
            eprintln!(
                "{}",
                serde_json::json!({
                    "status": "error",
                    "error": error.to_string(),
                    "exit_code": error.exit_code(),
                })
            );
        } else {
            eprintln!("reflow: {error}");
        }
        std::process::exit(error.exit_code());
    }
}
