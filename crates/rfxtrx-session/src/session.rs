use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::JoinHandle;

use bytes::BytesMut;
use rfxtrx_frame::{Frame, FrameReader, FrameWriter};
use rfxtrx_packet::{decode, encode_interface_command, Event, InterfaceCommand, Message, SwitchCommand};
use rfxtrx_transport::{CloneStream, ReadHandle, SerialStream, SharedStream};
use tracing::debug;

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::handler::EventHandler;
use crate::observer::{Diagnostic, Observer, TracingObserver};
use crate::sequence::InterfaceSequence;

const RECEIVE_THREAD_NAME: &str = "rfxtrx-rx";

/// Lifecycle of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Initializing,
    Ready,
    Stopped,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Closed => "closed",
            SessionState::Initializing => "initializing",
            SessionState::Ready => "ready",
            SessionState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

type Opener<T> = Box<dyn Fn() -> rfxtrx_transport::Result<T> + Send + Sync>;

struct Lifecycle {
    state: SessionState,
    receiving: bool,
}

/// A connection to one transceiver.
///
/// Share it behind an [`Arc`]: one thread runs [`run`](Self::run) (or use
/// [`spawn`](Self::spawn)), others call [`set_switch`](Self::set_switch) and
/// finally [`halt`](Self::halt).
pub struct Session<T: CloneStream> {
    config: SessionConfig,
    opener: Opener<T>,
    stream: SharedStream<T>,
    reader: Mutex<Option<FrameReader<ReadHandle<T>>>>,
    observer: Arc<dyn Observer>,
    sequence: InterfaceSequence,
    firmware_revision: Mutex<Option<u8>>,
    stop: AtomicBool,
    lifecycle: Mutex<Lifecycle>,
    lifecycle_changed: Condvar,
}

impl Session<SerialStream> {
    /// Session over the serial device named in `config.serial`.
    pub fn new(config: SessionConfig) -> Self {
        let serial = config.serial.clone();
        Self::with_opener(config, move || SerialStream::open(&serial))
    }
}

impl<T: CloneStream> Session<T> {
    /// Session over whatever stream `opener` produces when `init` runs.
    pub fn with_opener<F>(config: SessionConfig, opener: F) -> Self
    where
        F: Fn() -> rfxtrx_transport::Result<T> + Send + Sync + 'static,
    {
        Self {
            config,
            opener: Box::new(opener),
            stream: SharedStream::detached(),
            reader: Mutex::new(None),
            observer: Arc::new(TracingObserver),
            sequence: InterfaceSequence::new(),
            firmware_revision: Mutex::new(None),
            stop: AtomicBool::new(false),
            lifecycle: Mutex::new(Lifecycle {
                state: SessionState::Closed,
                receiving: false,
            }),
            lifecycle_changed: Condvar::new(),
        }
    }

    /// Replace the diagnostics sink.
    pub fn with_observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        lock(&self.lifecycle).state
    }

    /// Firmware revision from the last status response, if any arrived.
    pub fn firmware_revision(&self) -> Option<u8> {
        *lock(&self.firmware_revision)
    }

    /// Open the device and run the handshake.
    ///
    /// RESET, wait for the reboot, ENABLE_ALL (or ENABLE_UNDECODED), STATUS.
    /// A missing response is tolerated; transport errors are not, and leave
    /// the session closed. A concurrent [`halt`](Self::halt) aborts the
    /// handshake and leaves the session stopped.
    pub fn init(&self) -> Result<()> {
        {
            let mut lc = lock(&self.lifecycle);
            if lc.state != SessionState::Closed {
                return Err(SessionError::InvalidState {
                    operation: "init",
                    state: lc.state,
                });
            }
            self.set_state(&mut lc, SessionState::Initializing);
        }

        let result = self.handshake();

        let mut lc = lock(&self.lifecycle);
        let result = match result {
            Ok(reader) if !self.stop.load(Ordering::SeqCst) => {
                *lock(&self.reader) = Some(reader);
                self.set_state(&mut lc, SessionState::Ready);
                Ok(())
            }
            Ok(_) => {
                self.stream.close();
                self.set_state(&mut lc, SessionState::Stopped);
                Err(halted())
            }
            Err(err) => {
                self.stream.close();
                let next = if self.stop.load(Ordering::SeqCst) {
                    SessionState::Stopped
                } else {
                    SessionState::Closed
                };
                self.set_state(&mut lc, next);
                Err(err)
            }
        };
        self.lifecycle_changed.notify_all();
        result
    }

    fn handshake(&self) -> Result<FrameReader<ReadHandle<T>>> {
        let device = (self.opener)()?;
        self.stream.attach(device)?;
        // halt() may have closed the stream before this attach.
        self.ensure_not_halted()?;
        let mut reader = FrameReader::new(self.stream.reader());

        self.send_interface_command(InterfaceCommand::Reset)?;
        debug!(settle = ?self.config.boot_settle, "waiting for transceiver to boot");
        std::thread::sleep(self.config.boot_settle);
        self.ensure_not_halted()?;
        self.stream.discard_input()?;
        reader.clear();

        let enable = if self.config.enable_undecoded {
            InterfaceCommand::EnableUndecoded
        } else {
            InterfaceCommand::EnableAll
        };
        self.send_interface_command(enable)?;
        self.await_response(&mut reader, enable)?;

        self.send_interface_command(InterfaceCommand::Status)?;
        self.await_response(&mut reader, InterfaceCommand::Status)?;

        Ok(reader)
    }

    fn ensure_not_halted(&self) -> Result<()> {
        if self.stop.load(Ordering::SeqCst) {
            return Err(halted());
        }
        Ok(())
    }

    fn send_interface_command(&self, command: InterfaceCommand) -> Result<()> {
        let sequence = self.sequence.next();
        let mut payload = BytesMut::new();
        encode_interface_command(command, sequence, &mut payload);
        FrameWriter::new(self.stream.writer()).send(&payload)?;
        self.observer
            .observe(&Diagnostic::CommandSent { command, sequence });
        Ok(())
    }

    fn await_response(
        &self,
        reader: &mut FrameReader<ReadHandle<T>>,
        command: InterfaceCommand,
    ) -> Result<()> {
        match reader.read_frame()? {
            Some(frame) => {
                if let Some(event) = self.process_frame(&frame) {
                    if !matches!(event, Event::Status(_)) {
                        self.observer
                            .observe(&Diagnostic::EventDroppedDuringInit(event));
                    }
                }
            }
            None => self
                .observer
                .observe(&Diagnostic::ResponseTimeout { command }),
        }
        Ok(())
    }

    /// Decode a frame, report diagnostics, and return its event.
    fn process_frame(&self, frame: &Frame) -> Option<Event> {
        let message = match decode(frame.as_bytes()) {
            Ok(message) => message,
            Err(err) => {
                self.observer.observe(&Diagnostic::DecodeFailed(err));
                return None;
            }
        };

        match &message {
            Message::Status(status) => {
                *lock(&self.firmware_revision) = Some(status.firmware_revision);
                self.observer
                    .observe(&Diagnostic::FirmwareRevision(status.firmware_revision));
            }
            Message::Temperature(reading) if reading.battery_low => {
                self.observer.observe(&Diagnostic::BatteryLow {
                    sensor_address: reading.sensor_address,
                });
            }
            Message::InterfaceResponse { command } => {
                self.observer
                    .observe(&Diagnostic::UnhandledResponse { command: *command });
            }
            Message::Undecoded { subtype, dump } => {
                self.observer.observe(&Diagnostic::Undecoded {
                    subtype: *subtype,
                    dump: dump.clone(),
                });
            }
            Message::Temperature(_) | Message::DeviceState(_) => {}
        }

        message.into_event()
    }

    /// Receive and dispatch frames until [`halt`](Self::halt).
    ///
    /// Blocks the calling thread. Returns an error if the transport fails;
    /// either way the session ends up stopped.
    pub fn run<H: EventHandler + ?Sized>(&self, handler: &mut H) -> Result<()> {
        {
            let mut lc = lock(&self.lifecycle);
            if lc.receiving {
                return Err(SessionError::AlreadyRunning);
            }
            if lc.state != SessionState::Ready {
                return Err(SessionError::InvalidState {
                    operation: "run",
                    state: lc.state,
                });
            }
            lc.receiving = true;
        }

        let result = match lock(&self.reader).take() {
            Some(mut reader) => self.receive_loop(&mut reader, handler),
            None => Ok(()),
        };

        self.stream.close();
        let mut lc = lock(&self.lifecycle);
        lc.receiving = false;
        if lc.state != SessionState::Stopped {
            self.set_state(&mut lc, SessionState::Stopped);
        }
        self.lifecycle_changed.notify_all();
        result
    }

    fn receive_loop<H: EventHandler + ?Sized>(
        &self,
        reader: &mut FrameReader<ReadHandle<T>>,
        handler: &mut H,
    ) -> Result<()> {
        while !self.stop.load(Ordering::SeqCst) {
            match reader.read_frame() {
                Ok(Some(frame)) => {
                    if let Some(event) = self.process_frame(&frame) {
                        handler.handle_event(event);
                    }
                }
                Ok(None) => continue,
                Err(_) if self.stop.load(Ordering::SeqCst) => break,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    /// Run the receive loop on a dedicated thread.
    pub fn spawn<H>(self: &Arc<Self>, mut handler: H) -> Result<JoinHandle<Result<()>>>
    where
        H: EventHandler + Send + 'static,
    {
        let session = Arc::clone(self);
        std::thread::Builder::new()
            .name(RECEIVE_THREAD_NAME.to_string())
            .spawn(move || session.run(&mut handler))
            .map_err(SessionError::Thread)
    }

    /// Stop the session.
    ///
    /// Closes the device, which ends a blocked read within one read timeout,
    /// then waits for the receive loop or an in-progress `init` to exit. On
    /// return the session is stopped and the device closed. Must not be
    /// called from the event handler.
    pub fn halt(&self) {
        self.stop.store(true, Ordering::SeqCst);
        self.stream.close();

        let mut lc = lock(&self.lifecycle);
        while lc.receiving || lc.state == SessionState::Initializing {
            lc = self
                .lifecycle_changed
                .wait(lc)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        if lc.state != SessionState::Stopped {
            self.set_state(&mut lc, SessionState::Stopped);
        }
    }

    /// Switch a Lighting2/AC device on or off.
    ///
    /// The frame is written `resend_times` times with `resend_delay` after
    /// each write. Nothing is awaited: the protocol has no acknowledgement.
    pub fn set_switch(
        &self,
        device_address: u32,
        unit_id: u8,
        sequence: u8,
        state_on: bool,
    ) -> Result<()> {
        let state = self.state();
        if state != SessionState::Ready {
            return Err(SessionError::InvalidState {
                operation: "set switch",
                state,
            });
        }

        let command = SwitchCommand {
            device_address,
            unit_id,
            state_on,
            sequence,
        };
        let frame = Frame::encode(&command.to_payload())?;
        let mut writer = FrameWriter::new(self.stream.writer());

        let of = self.config.resend_times;
        for attempt in 1..=of {
            writer.write_frame(&frame)?;
            self.observer.observe(&Diagnostic::SwitchSent {
                command,
                attempt,
                of,
            });
            std::thread::sleep(self.config.resend_delay);
        }
        Ok(())
    }

    fn set_state(&self, lc: &mut Lifecycle, to: SessionState) {
        let from = lc.state;
        lc.state = to;
        self.observer.observe(&Diagnostic::StateChanged { from, to });
    }
}

fn halted() -> SessionError {
    SessionError::InvalidState {
        operation: "init",
        state: SessionState::Stopped,
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
