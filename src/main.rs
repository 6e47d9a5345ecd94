use anyhow::Context;
use clap::Parser;
use easier::display::{CONTACT, shutdown_notice};
use easier::{Cli, Console, ExitCode, HistoryRecorder, Router, Settings, Toolbox};

fn main() {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        Settings::default()
    });
    easier::logging::init_with_config(&settings.logging);
    install_panic_hook();

    let code = match run(&cli.args, settings) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {e}");
            ExitCode::Failure
        }
    };
    std::process::exit(i32::from(code));
}

fn run(args: &[String], settings: Settings) -> anyhow::Result<ExitCode> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.spawn(shutdown_on_signal());

    let workdir = std::env::current_dir().context("Cannot determine working directory")?;
    let recorder = HistoryRecorder::from_config(&settings.history);
    let toolbox = Toolbox::new(settings, workdir).with_runtime(runtime.handle().clone());
    let mut router = Router::new(toolbox, recorder, Console::stdio());

    let result = router.dispatch(args);
    runtime.shutdown_background();
    Ok(result?)
}

/// Unexpected failures print a report address and exit 1.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let message = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        tracing::error!("panic at {:?}: {message}", info.location());
        eprintln!("💥 Unexpected error: {message}");
        eprintln!("📧 Please report this issue to: {CONTACT}");
        std::process::exit(1);
    }));
}

/// Interrupt and terminate end the process immediately with status 0.
async fn shutdown_on_signal() {
    #[cfg(unix)]
    let signal = {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => "SIGINT",
                    _ = terminate.recv() => "SIGTERM",
                }
            }
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                "SIGINT"
            }
        }
    };
    #[cfg(not(unix))]
    let signal = {
        let _ = tokio::signal::ctrl_c().await;
        "SIGINT"
    };

    tracing::info!("received {signal}");
    println!("{}", shutdown_notice(signal));
    std::process::exit(0);
}
