//! Unit-file and config-file templates.
//!
//! A template is parsed into typed segments before rendering, so an unknown
//! `{{TOKEN}}`, an unterminated `{{`, or a placeholder with no supplied
//! value is reported instead of leaking into the rendered file.

use std::collections::BTreeMap;

use crate::domain::error::TemplateError;

/// A substitutable template field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemplateField {
    Name,
    GatewayPort,
    BridgePort,
    DnsPrimary,
    DnsFallback,
    Memory,
    Cpus,
    Image,
    UserMapping,
    OpenclawHome,
    StateDir,
    WorkspaceDir,
    SharedSkillsDir,
}

impl TemplateField {
    pub const ALL: [TemplateField; 13] = [
        TemplateField::Name,
        TemplateField::GatewayPort,
        TemplateField::BridgePort,
        TemplateField::DnsPrimary,
        TemplateField::DnsFallback,
        TemplateField::Memory,
        TemplateField::Cpus,
        TemplateField::Image,
        TemplateField::UserMapping,
        TemplateField::OpenclawHome,
        TemplateField::StateDir,
        TemplateField::WorkspaceDir,
        TemplateField::SharedSkillsDir,
    ];

    /// Placeholder token as written between `{{` and `}}`.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            TemplateField::Name => "NAME",
            TemplateField::GatewayPort => "GATEWAY_PORT",
            TemplateField::BridgePort => "BRIDGE_PORT",
            TemplateField::DnsPrimary => "DNS_PRIMARY",
            TemplateField::DnsFallback => "DNS_FALLBACK",
            TemplateField::Memory => "MEMORY",
            TemplateField::Cpus => "CPUS",
            TemplateField::Image => "IMAGE",
            TemplateField::UserMapping => "USER_MAPPING",
            TemplateField::OpenclawHome => "OPENCLAW_HOME",
            TemplateField::StateDir => "STATE_DIR",
            TemplateField::WorkspaceDir => "WORKSPACE_DIR",
            TemplateField::SharedSkillsDir => "SHARED_SKILLS_DIR",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.token() == token)
    }
}

/// Which artifact a template produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Quadlet `.container` unit.
    Unit,
    /// Gateway `openclaw.json` config.
    Config,
}

impl TemplateKind {
    /// File name looked up in the template directory.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            TemplateKind::Unit => "openclaw.container.template",
            TemplateKind::Config => "openclaw.json.template",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TemplateKind::Unit => "unit",
            TemplateKind::Config => "config",
        }
    }

    /// Fields this kind of template may reference.
    #[must_use]
    pub fn allowed_fields(self) -> &'static [TemplateField] {
        match self {
            TemplateKind::Unit => &TemplateField::ALL,
            TemplateKind::Config => &[TemplateField::GatewayPort, TemplateField::BridgePort],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(TemplateField),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    kind: TemplateKind,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse template text.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Unterminated`] for a `{{` with no closing
    /// `}}`, or [`TemplateError::UnknownPlaceholder`] for a token that is not a
    /// known field or not allowed in this kind of template.
    pub fn parse(kind: TemplateKind, text: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = text;
        let mut offset = 0;
        while let Some(open) = rest.find("{{") {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let after_open = &rest[open + 2..];
            let close = after_open
                .find("}}")
                .ok_or(TemplateError::Unterminated(offset + open, kind.label()))?;
            let token = after_open[..close].trim();
            let field = TemplateField::from_token(token)
                .filter(|f| kind.allowed_fields().contains(f))
                .ok_or_else(|| TemplateError::UnknownPlaceholder(token.to_string(), kind.label()))?;
            segments.push(Segment::Field(field));
            let consumed = open + 2 + close + 2;
            offset += consumed;
            rest = &rest[consumed..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }
        Ok(Self { kind, segments })
    }

    /// Distinct fields referenced by this template.
    #[must_use]
    pub fn fields(&self) -> Vec<TemplateField> {
        let mut fields: Vec<TemplateField> = self
            .segments
            .iter()
            .filter_map(|s| match s {
                Segment::Field(f) => Some(*f),
                Segment::Literal(_) => None,
            })
            .collect();
        fields.sort();
        fields.dedup();
        fields
    }

    /// Substitute every placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingValue`] naming the first referenced
    /// field without a value. Nothing is rendered in that case.
    pub fn render(&self, values: &TemplateValues) -> Result<String, TemplateError> {
        if let Some(missing) = self.fields().into_iter().find(|f| values.get(*f).is_none()) {
            return Err(TemplateError::MissingValue(missing.token(), self.kind.label()));
        }
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => out.push_str(values.get(*field).unwrap_or_default()),
            }
        }
        Ok(out)
    }
}

/// Values substituted into templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateValues(BTreeMap<TemplateField, String>);

impl TemplateValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, field: TemplateField, value: impl Into<String>) -> Self {
        self.0.insert(field, value.into());
        self
    }

    #[must_use]
    pub fn get(&self, field: TemplateField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }
}
