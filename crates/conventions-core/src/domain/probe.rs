//! Probe model: health-check mechanisms attached to a container.
//!
//! `Probe` keeps the Kubernetes wire shape (handler fields inline next to the
//! timing fields), while `ProbeHandler` is the typed "exactly one mechanism"
//! view that conventions decode from annotations.

use serde::{Deserialize, Serialize};

/// A port given either as a number or as a named container port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntOrString {
    Int(i32),
    String(String),
}

impl From<i32> for IntOrString {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for IntOrString {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecAction {
    #[serde(default)]
    pub command: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpHeader {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpGetAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    pub port: IntOrString,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// `HTTP` or `HTTPS`; Kubernetes defaults to `HTTP` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_headers: Option<Vec<HttpHeader>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TcpSocketAction {
    pub port: IntOrString,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrpcAction {
    pub port: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

/// ProbeHandler is exactly one health-check mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeHandler {
    Exec(ExecAction),
    HttpGet(HttpGetAction),
    TcpSocket(TcpSocketAction),
    Grpc(GrpcAction),
}

impl ProbeHandler {
    /// Wire name of the mechanism, as used in the probe JSON.
    pub fn mechanism(&self) -> &'static str {
        match self {
            Self::Exec(_) => "exec",
            Self::HttpGet(_) => "httpGet",
            Self::TcpSocket(_) => "tcpSocket",
            Self::Grpc(_) => "grpc",
        }
    }
}

/// A container probe in its Kubernetes JSON shape.
///
/// A probe whose four handler fields are all unset is "empty": conventions
/// treat it like a missing probe and may fill the handler in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Probe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec: Option<ExecAction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_get: Option<HttpGetAction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp_socket: Option<TcpSocketAction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grpc: Option<GrpcAction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_delay_seconds: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_seconds: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_threshold: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_threshold: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination_grace_period_seconds: Option<i64>,
}

impl Probe {
    pub fn from_handler(handler: ProbeHandler) -> Self {
        let mut probe = Self::default();
        probe.set_handler(handler);
        probe
    }

    pub fn has_handler(&self) -> bool {
        self.exec.is_some()
            || self.http_get.is_some()
            || self.tcp_socket.is_some()
            || self.grpc.is_some()
    }

    /// Returns the first mechanism set on this probe, in exec, httpGet,
    /// tcpSocket, grpc order.
    pub fn handler(&self) -> Option<ProbeHandler> {
        if let Some(exec) = &self.exec {
            return Some(ProbeHandler::Exec(exec.clone()));
        }
        if let Some(http_get) = &self.http_get {
            return Some(ProbeHandler::HttpGet(http_get.clone()));
        }
        if let Some(tcp_socket) = &self.tcp_socket {
            return Some(ProbeHandler::TcpSocket(tcp_socket.clone()));
        }
        self.grpc.clone().map(ProbeHandler::Grpc)
    }

    /// Replaces the handler fields; timing fields are left as they are.
    pub fn set_handler(&mut self, handler: ProbeHandler) {
        self.exec = None;
        self.http_get = None;
        self.tcp_socket = None;
        self.grpc = None;
        match handler {
            ProbeHandler::Exec(action) => self.exec = Some(action),
            ProbeHandler::HttpGet(action) => self.http_get = Some(action),
            ProbeHandler::TcpSocket(action) => self.tcp_socket = Some(action),
            ProbeHandler::Grpc(action) => self.grpc = Some(action),
        }
    }
}
