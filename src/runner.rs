//! Runs the blocking listener until it ends or an interrupt arrives.

use std::future::Future;
use std::io::Write;

use tracing::{info, warn};

use crate::io::{EventListener, ListenerConfig, MidiTransport, ShutdownTrigger};
use crate::Result;

/// Run the listener on a blocking task, firing `trigger` when `interrupt`
/// completes first.
///
/// `trigger` must pair with the `Shutdown` the transport's ports observe;
/// after it fires the port reports closure, the loop returns and the port is
/// released before this function returns. An `Err` from `interrupt` still
/// stops the listener, then surfaces as `Error::Io` unless the listener
/// itself failed.
pub async fn run_until<T, W, F>(
    transport: T,
    config: ListenerConfig,
    mut out: W,
    trigger: ShutdownTrigger,
    interrupt: F,
) -> Result<()>
where
    T: MidiTransport + Send + 'static,
    W: Write + Send + 'static,
    F: Future<Output = std::io::Result<()>>,
{
    let mut listening = tokio::task::spawn_blocking(move || {
        EventListener::new(transport, config).run(&mut out)
    });

    let interrupted = tokio::select! {
        finished = &mut listening => return Ok(finished??),
        res = interrupt => res,
    };

    match &interrupted {
        Ok(()) => info!("interrupted, closing MIDI input"),
        Err(e) => warn!(error = %e, "interrupt source failed, closing MIDI input"),
    }
    trigger.fire();

    listening.await??;
    interrupted?;
    Ok(())
}

/// Run until Ctrl-C, printing events to stdout.
pub async fn run_until_ctrl_c<T>(
    transport: T,
    config: ListenerConfig,
    trigger: ShutdownTrigger,
) -> Result<()>
where
    T: MidiTransport + Send + 'static,
{
    run_until(
        transport,
        config,
        std::io::stdout(),
        trigger,
        tokio::signal::ctrl_c(),
    )
    .await
}
