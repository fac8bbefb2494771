use anyhow::Context;
use clap::Parser;
use tilekit::{init_logging, Cli, EditorConfig, LevelController, Script, SystemClipboard};

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging()?;

    let config = match &args.config {
        Some(path) => EditorConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EditorConfig::load_or_default(),
    };
    let script = Script::load(&args.script)?;

    let mut controller = LevelController::from_config(&config);
    if args.system_clipboard {
        controller = controller.with_clipboard(Box::new(SystemClipboard::service()));
    }

    tracing::info!(
        "Replaying {} steps from {}",
        script.steps.len(),
        args.script.display()
    );
    let summary = script.run(&mut controller)?;
    tracing::info!("Replay finished: {}", summary);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
