use std::path::PathBuf;
use std::process::ExitCode;

use hidemoreless_lib::command::execute_json_batch;
use hidemoreless_lib::harness::TestHarness;
use hidemoreless_lib::state::AppSettings;

/// Command line arguments
#[derive(Debug, Default)]
struct Args {
    scene: Option<PathBuf>,
    script: Option<PathBuf>,
    config: Option<PathBuf>,
    /// Persist the effective settings to the config dir
    save_config: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hidemoreless=info".into()),
        )
        .init();

    match run(parse_args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), String> {
    let settings = match &args.config {
        Some(path) => AppSettings::load_from(path)?,
        None => AppSettings::load(),
    };
    if args.save_config {
        settings.save();
    }
    let mut harness = TestHarness::with_settings(settings);

    // Parse --scene <path> argument
    if let Some(path) = &args.scene {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scene file {}: {e}", path.display()))?;
        let id = harness.load_scene_json(&json)?;
        tracing::info!("Loaded scene from {} as document {id}", path.display());
    }

    let Some(path) = &args.script else {
        tracing::info!("No --script given, nothing to run");
        return Ok(());
    };
    let script = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read script {}: {e}", path.display()))?;
    let responses = execute_json_batch(&mut harness, &script)?;

    let failed = responses.iter().filter(|r| !r.success).count();
    let json = serde_json::to_string_pretty(&responses)
        .map_err(|e| format!("Failed to serialize responses: {e}"))?;
    println!("{json}");

    if failed > 0 {
        tracing::warn!("{failed} of {} commands failed", responses.len());
    }
    harness.reload_extension();
    Ok(())
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        let slot = match arg.as_str() {
            "--save-config" => {
                args.save_config = true;
                continue;
            }
            "--scene" => &mut args.scene,
            "--script" => &mut args.script,
            "--config" => &mut args.config,
            other => {
                tracing::warn!("Ignoring unknown argument: {other}");
                continue;
            }
        };
        match iter.next() {
            Some(value) => *slot = Some(PathBuf::from(value)),
            None => tracing::warn!("Missing value for {arg}"),
        }
    }
    args
}
