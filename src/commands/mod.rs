//! Command dispatch and handlers.

pub mod allocate;
pub mod create;
pub mod families;
pub mod list;

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::family::ListingFamily;

/// Dispatch a parsed command to its handler.
///
/// When `LISTING_ID_RECORD` is set to a directory path, all port
/// interactions are recorded to per-port cassette files in that directory.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the selected
/// command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let settings = Settings::from_env().map_err(|e| e.to_string())?;

    let (ctx, session) = match &settings.record_dir {
        Some(dir) => {
            let (ctx, session) =
                ServiceContext::recording_at(dir, &settings.store_root, settings.allocator)?;
            (ctx, Some(session))
        }
        None => (ServiceContext::live(&settings.store_root, settings.allocator), None),
    };

    let result = dispatch_with_context(command, &ctx);

    // Finish recording after the command completes, even on error.
    if let Some(session) = session {
        // Adapters hold Arc clones of the recorders until the context drops.
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the command fails.
pub fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    let output = match command {
        Command::Families => families::render(),
        Command::Allocate(args) => block_on(allocate::run(ctx, args))??,
        Command::Create { family, fields } => block_on(create::run(ctx, family, fields))??,
        Command::List { family } => list::run(ctx, family)?,
    };
    print!("{output}");
    Ok(())
}

/// Resolve a family key, listing the valid keys when it is unknown.
pub(crate) fn resolve_family(key: &str) -> Result<&'static ListingFamily, String> {
    ListingFamily::by_key(key).ok_or_else(|| {
        let known: Vec<&str> = crate::family::FAMILIES.iter().map(|f| f.key).collect();
        format!("Unknown listing family {key:?}. Known families: {}", known.join(", "))
    })
}

fn block_on<F: std::future::Future>(future: F) -> Result<F::Output, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;
    let output = runtime.block_on(future);
    // A read abandoned by the store timeout may still be parked on the
    // blocking pool; don't wait for it.
    runtime.shutdown_background();
    Ok(output)
}

/// Finish a recording session and report the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
