// CLI modules
mod args;
mod logging;
mod op;
mod ops;
mod shell;
mod state;

use args::Args;
use clap::{Parser, Subcommand};
use op::Op;
use ops::{Demo, Init, Shell, Version};

command_enum! {
    (Demo, Demo),
    (Init, Init),
    (Shell, Shell),
    (Version, Version),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Build context - falls back to the default config if never initialized
    let ctx = match op::OpContext::new(args.config_path) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let level = logging::resolve_level(args.log_level, &ctx.state.config.log_level);
    let guard = logging::init_logging(level);

    let code = match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    // flush buffered log lines before exiting
    drop(guard);
    std::process::exit(code);
}
