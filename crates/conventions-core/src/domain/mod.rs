//! Domain model (templates, containers, probes, image metadata).

pub mod image;
pub mod probe;
pub mod template;

pub use self::image::{Bom, ImageMetadata};
pub use self::probe::{
    ExecAction, GrpcAction, HttpGetAction, HttpHeader, IntOrString, Probe, ProbeHandler,
    TcpSocketAction,
};
pub use self::template::{Container, EnvVar, PodSpec, TemplateMetadata, WorkloadTemplate};
