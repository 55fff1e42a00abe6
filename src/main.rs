use clap::Parser;

mod cli;
mod commands;
mod domain;
mod services;

pub use cli::*;
pub use commands::*;
pub use domain::constants::*;
pub use domain::models::*;
pub use services::compose::*;
pub use services::library::*;
pub use services::output::*;
pub use services::packaging::*;
pub use services::placement::*;
pub use services::storage::*;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        if cli.json {
            let code = e
                .downcast_ref::<CodedError>()
                .map(|c| c.code)
                .unwrap_or("INTERNAL");
            println!(
                "{}",
                serde_json::json!({
                    "ok": false,
                    "error": {"code": code, "message": format!("{:#}", e)}
                })
            );
        } else {
            eprintln!("error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if handle_config_commands(cli)? {
        return Ok(());
    }
    if handle_bundle_commands(cli)? {
        return Ok(());
    }

    let cfg = load_config(cli.config.as_deref())?;
    handle_runtime_commands(cli, &cfg)
}
