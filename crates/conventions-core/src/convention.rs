//! Convention trait and the parameterized rules behind the built-in set.
//!
//! # Structure
//! - **`Convention`**: object-safe capability (id, is_applicable, apply).
//!   The registry stores `Arc<dyn Convention>`, so custom rules plug in too.
//! - **`Rule`**: tagged enum over the two rule shapes we ship,
//!   `ProbeRule` (annotation -> probe field) and `EnvVarRule` (label -> env var).

use tracing::{debug, info};

use crate::codec::decode_probe_handler;
use crate::domain::{Container, EnvVar, ImageMetadata, Probe, WorkloadTemplate};
use crate::env;
use crate::error::DecodeError;
use crate::metadata;

/// Convention is a named rule: a predicate plus a mutation.
///
/// # Usage
/// ```ignore
/// struct AddTeamLabelEnv;
///
/// impl Convention for AddTeamLabelEnv {
///     fn id(&self) -> &str { "example.org-team" }
///     fn is_applicable(&self, t: &WorkloadTemplate, _: &[ImageMetadata]) -> bool {
///         !metadata::label(t, "example.org/team").is_empty()
///     }
///     fn apply(&self, t: &mut WorkloadTemplate, _: &[ImageMetadata]) -> Result<(), DecodeError> {
///         Ok(())
///     }
/// }
/// ```
///
/// # Contract
/// - `is_applicable` must not mutate anything.
/// - `apply` walks every container itself and must leave containers it has
///   already handled untouched on a second run.
/// - An error from `apply` leaves earlier container mutations in place.
pub trait Convention: Send + Sync {
    fn id(&self) -> &str;

    fn is_applicable(&self, template: &WorkloadTemplate, images: &[ImageMetadata]) -> bool;

    fn apply(
        &self,
        template: &mut WorkloadTemplate,
        images: &[ImageMetadata],
    ) -> Result<(), DecodeError>;
}

/// The probe field a `ProbeRule` targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    Readiness,
    Liveness,
    Startup,
}

impl ProbeKind {
    pub fn slot(self, container: &mut Container) -> &mut Option<Probe> {
        match self {
            Self::Readiness => &mut container.readiness_probe,
            Self::Liveness => &mut container.liveness_probe,
            Self::Startup => &mut container.startup_probe,
        }
    }

    pub fn get(self, container: &Container) -> Option<&Probe> {
        match self {
            Self::Readiness => container.readiness_probe.as_ref(),
            Self::Liveness => container.liveness_probe.as_ref(),
            Self::Startup => container.startup_probe.as_ref(),
        }
    }

    /// Annotation key suffix, e.g. `readinessProbe`.
    pub fn annotation_name(self) -> &'static str {
        match self {
            Self::Readiness => "readinessProbe",
            Self::Liveness => "livenessProbe",
            Self::Startup => "startupProbe",
        }
    }

    /// Short name used in convention ids, e.g. `readiness`.
    pub fn rule_name(self) -> &'static str {
        match self {
            Self::Readiness => "readiness",
            Self::Liveness => "liveness",
            Self::Startup => "startup",
        }
    }
}

/// ProbeRule installs the probe handler found in an annotation on every
/// container whose targeted probe has no handler yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRule {
    id: String,
    annotation: String,
    kind: ProbeKind,
}

impl ProbeRule {
    pub fn new(id: impl Into<String>, annotation: impl Into<String>, kind: ProbeKind) -> Self {
        Self {
            id: id.into(),
            annotation: annotation.into(),
            kind,
        }
    }

    /// `<prefix>-<rule>` reading annotation `<prefix>/<rule>Probe`.
    pub fn with_prefix(prefix: &str, kind: ProbeKind) -> Self {
        Self::new(
            format!("{prefix}-{}", kind.rule_name()),
            format!("{prefix}/{}", kind.annotation_name()),
            kind,
        )
    }

    pub fn annotation(&self) -> &str {
        &self.annotation
    }

    pub fn kind(&self) -> ProbeKind {
        self.kind
    }
}

impl Convention for ProbeRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_applicable(&self, template: &WorkloadTemplate, _images: &[ImageMetadata]) -> bool {
        !metadata::annotation(template, &self.annotation).is_empty()
    }

    fn apply(
        &self,
        template: &mut WorkloadTemplate,
        _images: &[ImageMetadata],
    ) -> Result<(), DecodeError> {
        let raw = metadata::annotation(template, &self.annotation).to_owned();

        for container in template.spec.containers.iter_mut() {
            if self.kind.get(container).is_some_and(Probe::has_handler) {
                debug!(
                    convention = %self.id,
                    container = %container.name,
                    "probe already set, skipping"
                );
                continue;
            }

            // only containers still missing the probe reach the decoder
            let handler = decode_probe_handler(&raw)?;
            info!(
                convention = %self.id,
                container = %container.name,
                mechanism = handler.mechanism(),
                "adding {}",
                self.kind.annotation_name()
            );
            self.kind
                .slot(container)
                .get_or_insert_with(Probe::default)
                .set_handler(handler);
        }
        Ok(())
    }
}

/// EnvVarRule copies a label value into an env var on every container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVarRule {
    id: String,
    label: String,
    env_name: String,
}

impl EnvVarRule {
    pub fn new(id: impl Into<String>, label: impl Into<String>, env_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            env_name: env_name.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn env_name(&self) -> &str {
        &self.env_name
    }
}

impl Convention for EnvVarRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_applicable(&self, template: &WorkloadTemplate, _images: &[ImageMetadata]) -> bool {
        !metadata::label(template, &self.label).is_empty()
    }

    fn apply(
        &self,
        template: &mut WorkloadTemplate,
        _images: &[ImageMetadata],
    ) -> Result<(), DecodeError> {
        let value = metadata::label(template, &self.label).to_owned();

        for container in template.spec.containers.iter_mut() {
            if env::merge(container, EnvVar::new(&self.env_name, &value)) {
                info!(
                    convention = %self.id,
                    container = %container.name,
                    "adding env {}",
                    self.env_name
                );
            } else {
                debug!(
                    convention = %self.id,
                    container = %container.name,
                    "env {} already set, skipping",
                    self.env_name
                );
            }
        }
        Ok(())
    }
}

/// Rule is the closed set of rule shapes the built-in registry is made of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Probe(ProbeRule),
    EnvVar(EnvVarRule),
}

impl From<ProbeRule> for Rule {
    fn from(rule: ProbeRule) -> Self {
        Self::Probe(rule)
    }
}

impl From<EnvVarRule> for Rule {
    fn from(rule: EnvVarRule) -> Self {
        Self::EnvVar(rule)
    }
}

impl Convention for Rule {
    fn id(&self) -> &str {
        match self {
            Self::Probe(rule) => rule.id(),
            Self::EnvVar(rule) => rule.id(),
        }
    }

    fn is_applicable(&self, template: &WorkloadTemplate, images: &[ImageMetadata]) -> bool {
        match self {
            Self::Probe(rule) => rule.is_applicable(template, images),
            Self::EnvVar(rule) => rule.is_applicable(template, images),
        }
    }

    fn apply(
        &self,
        template: &mut WorkloadTemplate,
        images: &[ImageMetadata],
    ) -> Result<(), DecodeError> {
        match self {
            Self::Probe(rule) => rule.apply(template, images),
            Self::EnvVar(rule) => rule.apply(template, images),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExecAction, IntOrString, ProbeHandler, TcpSocketAction};
    use rstest::rstest;

    const READINESS: &str = "example.org/readinessProbe";

    fn two_containers() -> WorkloadTemplate {
        WorkloadTemplate::new(vec![Container::new("app"), Container::new("sidecar")])
    }

    #[test]
    fn with_prefix_builds_id_and_annotation() {
        let rule = ProbeRule::with_prefix("example.org", ProbeKind::Liveness);
        assert_eq!(rule.id(), "example.org-liveness");
        assert_eq!(rule.annotation(), "example.org/livenessProbe");
        assert_eq!(rule.kind(), ProbeKind::Liveness);
    }

    #[rstest]
    #[case::missing(two_containers(), false)]
    #[case::empty(two_containers().with_annotation(READINESS, ""), false)]
    #[case::label_only(two_containers().with_label(READINESS, "{}"), false)]
    #[case::present(two_containers().with_annotation(READINESS, "{}"), true)]
    fn probe_rule_applicability(#[case] template: WorkloadTemplate, #[case] expected: bool) {
        let rule = ProbeRule::with_prefix("example.org", ProbeKind::Readiness);
        assert_eq!(rule.is_applicable(&template, &[]), expected);
    }

    #[test]
    fn probe_rule_sets_every_container() {
        let mut template =
            two_containers().with_annotation(READINESS, r#"{"tcpSocket":{"port":8080}}"#);
        let rule = ProbeRule::with_prefix("example.org", ProbeKind::Readiness);

        rule.apply(&mut template, &[]).unwrap();

        for c in template.containers() {
            let handler = c.readiness_probe.as_ref().and_then(Probe::handler);
            assert_eq!(
                handler,
                Some(ProbeHandler::TcpSocket(TcpSocketAction {
                    port: IntOrString::Int(8080),
                    host: None,
                }))
            );
            assert!(c.liveness_probe.is_none());
            assert!(c.startup_probe.is_none());
        }
    }

    #[test]
    fn probe_rule_keeps_existing_handler() {
        let mut template =
            two_containers().with_annotation(READINESS, r#"{"tcpSocket":{"port":8080}}"#);
        let existing = Probe::from_handler(ProbeHandler::Exec(ExecAction {
            command: vec!["true".into()],
        }));
        template.spec.containers[0].readiness_probe = Some(existing.clone());
        let rule = ProbeRule::with_prefix("example.org", ProbeKind::Readiness);

        rule.apply(&mut template, &[]).unwrap();

        assert_eq!(template.containers()[0].readiness_probe, Some(existing));
        assert!(template.containers()[1].readiness_probe.as_ref().is_some_and(Probe::has_handler));
    }

    #[test]
    fn probe_rule_fills_empty_probe_and_keeps_timing() {
        let mut template = WorkloadTemplate::new(vec![Container::new("app")])
            .with_annotation(READINESS, r#"{"grpc":{"port":9090}}"#);
        template.spec.containers[0].readiness_probe = Some(Probe {
            initial_delay_seconds: Some(10),
            ..Probe::default()
        });
        let rule = ProbeRule::with_prefix("example.org", ProbeKind::Readiness);

        rule.apply(&mut template, &[]).unwrap();

        let probe = template.containers()[0].readiness_probe.as_ref().unwrap();
        assert_eq!(probe.initial_delay_seconds, Some(10));
        assert_eq!(probe.grpc.as_ref().map(|g| g.port), Some(9090));
    }

    #[test]
    fn probe_rule_skips_decoding_when_every_probe_is_set() {
        let mut template = WorkloadTemplate::new(vec![Container::new("app")])
            .with_annotation(READINESS, "{not valid json");
        template.spec.containers[0].readiness_probe = Some(Probe::from_handler(
            ProbeHandler::Exec(ExecAction::default()),
        ));
        let rule = ProbeRule::with_prefix("example.org", ProbeKind::Readiness);

        assert!(rule.apply(&mut template, &[]).is_ok());
    }

    #[test]
    fn probe_rule_decodes_only_for_unprobed_containers() {
        let mut template = two_containers().with_annotation(READINESS, "{}");
        // first container already probed, second one hits the bad annotation
        template.spec.containers[0].readiness_probe = Some(Probe::from_handler(
            ProbeHandler::Exec(ExecAction::default()),
        ));
        let rule = ProbeRule::with_prefix("example.org", ProbeKind::Readiness);

        let err = rule.apply(&mut template, &[]).unwrap_err();
        assert!(matches!(err, DecodeError::Mechanism { found: 0 }));
        assert!(template.containers()[1].readiness_probe.is_none());
    }

    #[test]
    fn env_var_rule_injects_label_value() {
        let mut template = two_containers().with_label("example.org/owner", "team-a");
        template.spec.containers[1].env = Some(vec![EnvVar::new("OWNER", "someone-else")]);
        let rule = EnvVarRule::new("example.org-owner", "example.org/owner", "OWNER");

        assert!(rule.is_applicable(&template, &[]));
        rule.apply(&mut template, &[]).unwrap();

        let values: Vec<Option<&str>> = template
            .containers()
            .iter()
            .map(|c| c.env_var("OWNER").and_then(|e| e.value.as_deref()))
            .collect();
        assert_eq!(values, vec![Some("team-a"), Some("someone-else")]);
    }

    #[test]
    fn env_var_rule_not_applicable_without_label() {
        let template = two_containers().with_annotation("example.org/owner", "team-a");
        let rule = EnvVarRule::new("example.org-owner", "example.org/owner", "OWNER");
        assert!(!rule.is_applicable(&template, &[]));
    }

    #[test]
    fn rule_enum_delegates() {
        let rule: Rule = EnvVarRule::new("id-env", "l", "E").into();
        assert_eq!(rule.id(), "id-env");

        let rule: Rule = ProbeRule::with_prefix("p", ProbeKind::Startup).into();
        assert_eq!(rule.id(), "p-startup");
        let mut template = two_containers().with_annotation("p/startupProbe", r#"{"exec":{"command":["ls"]}}"#);
        assert!(rule.is_applicable(&template, &[]));
        rule.apply(&mut template, &[]).unwrap();
        assert!(template.containers().iter().all(|c| ProbeKind::Startup.get(c).is_some()));
    }
}
