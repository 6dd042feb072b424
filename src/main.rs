//! midiwatch binary. Prints MIDI from the configured controller until Ctrl-C.

use midiwatch::prelude::*;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    midiwatch::init_logging();

    let config = ListenerConfig::default();
    let (trigger, shutdown) = shutdown_channel();
    let transport = MidirTransport::new(&config).with_shutdown(shutdown);

    midiwatch::run_until_ctrl_c(transport, config, trigger).await
}
