//! Newline-delimited JSON emission to the host process

use std::io::Write;

use crate::message::BridgeMessage;

/// Writes messages to the host, one JSON line per call, in call order
///
/// The emitter never fails outward: a message that cannot be serialized is
/// replaced by a single `error` message built through an infallible path,
/// and I/O errors are logged and swallowed (the host going away is the
/// supervisor's problem, not the reconciler's).
pub struct OutputEmitter<W: Write> {
    sink: W,
}

impl<W: Write> OutputEmitter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Serialize and write one message, newline-terminated, then flush
    pub fn emit(&mut self, message: &BridgeMessage) {
        let line = match serde_json::to_string(message) {
            Ok(line) => line,
            Err(err) => {
                tracing::error!("failed to serialize outgoing message: {err}");
                fallback_error_line(&err.to_string())
            }
        };

        if let Err(err) = writeln!(self.sink, "{line}").and_then(|()| self.sink.flush()) {
            tracing::warn!("failed to write message to host: {err}");
        }
    }

    /// Consume the emitter and return the underlying sink
    pub fn into_inner(self) -> W {
        self.sink
    }
}

/// Build an `error` message line by hand
///
/// JSON string serialization cannot fail, so this path cannot recurse into
/// another serialization failure.
fn fallback_error_line(detail: &str) -> String {
    let message = format!("serialization failure: {detail}");
    let escaped = serde_json::to_string(&message)
        .unwrap_or_else(|_| "\"serialization failure\"".to_string());
    format!("{{\"type\":\"error\",\"message\":{escaped}}}")
}
