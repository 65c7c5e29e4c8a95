use crate::session::SessionState;

/// Errors that can occur in session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Transport-level error.
    #[error("transport error: {0}")]
    Transport(#[from] rfxtrx_transport::TransportError),

    /// Frame-level error.
    #[error("frame error: {0}")]
    Frame(#[from] rfxtrx_frame::FrameError),

    /// The operation is not valid in the current lifecycle state.
    #[error("cannot {operation} while session is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    /// `run` was called while another receive loop is active.
    #[error("receive loop already running")]
    AlreadyRunning,

    /// The receive thread could not be started.
    #[error("failed to spawn receive thread: {0}")]
    Thread(std::io::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;
