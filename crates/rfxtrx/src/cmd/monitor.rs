use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rfxtrx::packet::Event;
use rfxtrx::session::{Session, SessionConfig};
use rfxtrx::transport::SerialConfig;

use crate::cmd::MonitorArgs;
use crate::exit::{session_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::output::{print_event, print_status, OutputFormat};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn run(args: MonitorArgs, serial: SerialConfig, format: OutputFormat) -> CliResult<i32> {
    let device = serial.path.clone();
    let session = Arc::new(Session::new(SessionConfig {
        serial,
        enable_undecoded: args.undecoded,
        ..SessionConfig::default()
    }));

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    session
        .init()
        .map_err(|err| session_error("handshake failed", err))?;
    print_status(&device, session.firmware_revision(), format);

    let printed = Arc::new(AtomicUsize::new(0));
    let handler = {
        let running = running.clone();
        let printed = printed.clone();
        let count = args.count;
        move |event: Event| {
            if !running.load(Ordering::SeqCst) {
                return;
            }
            print_event(&event, format);
            let seen = printed.fetch_add(1, Ordering::SeqCst) + 1;
            if count.is_some_and(|count| seen >= count) {
                running.store(false, Ordering::SeqCst);
            }
        }
    };

    let receiver = session
        .spawn(handler)
        .map_err(|err| session_error("receive loop failed to start", err))?;

    while running.load(Ordering::SeqCst) && !receiver.is_finished() {
        std::thread::sleep(POLL_INTERVAL);
    }
    session.halt();

    match receiver.join() {
        Ok(Ok(())) => Ok(SUCCESS),
        Ok(Err(err)) => Err(session_error("receive failed", err)),
        Err(_) => Err(CliError::new(INTERNAL, "receive thread panicked")),
    }
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| CliError::new(INTERNAL, format!("signal handler setup failed: {err}")))
}
