//! Probe decoding: annotation JSON -> `ProbeHandler`.
//!
//! # Accepted shapes
//! - `{"exec":{"command":[...]}}`
//! - `{"httpGet":{"path":..,"port":..,"host":..,"scheme":..,"httpHeaders":[..]}}`
//! - `{"tcpSocket":{"port":..,"host":..}}`
//! - `{"grpc":{"port":..,"service":..}}`
//!
//! Exactly one mechanism must be present. Unknown keys are ignored.

use serde::Deserialize;

use crate::domain::{ExecAction, GrpcAction, HttpGetAction, ProbeHandler, TcpSocketAction};
use crate::error::DecodeError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProbeHandler {
    #[serde(default)]
    exec: Option<ExecAction>,
    #[serde(default)]
    http_get: Option<HttpGetAction>,
    #[serde(default)]
    tcp_socket: Option<TcpSocketAction>,
    #[serde(default)]
    grpc: Option<GrpcAction>,
}

impl RawProbeHandler {
    fn into_handler(self) -> Result<ProbeHandler, DecodeError> {
        let mut found: Vec<ProbeHandler> = [
            self.exec.map(ProbeHandler::Exec),
            self.http_get.map(ProbeHandler::HttpGet),
            self.tcp_socket.map(ProbeHandler::TcpSocket),
            self.grpc.map(ProbeHandler::Grpc),
        ]
        .into_iter()
        .flatten()
        .collect();

        match found.len() {
            1 => Ok(found.remove(0)),
            n => Err(DecodeError::Mechanism { found: n }),
        }
    }
}

/// Decodes a JSON probe handler, as found in a probe annotation.
pub fn decode_probe_handler(text: &str) -> Result<ProbeHandler, DecodeError> {
    let raw: RawProbeHandler = serde_json::from_str(text)?;
    raw.into_handler()
}
