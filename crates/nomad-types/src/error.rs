use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A wire key outside one of the closed sets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnknownKey {
    #[error("unknown action kind '{0}'")]
    Action(String),
}

/// Diagnostic severity. Only errors make a graph invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Diagnostic category, determined by code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Structure,
    Edge,
    Connectivity,
    Payload,
    Level,
}

/// Numeric diagnostic code (E100–E599).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DiagnosticCode(pub u16);

impl DiagnosticCode {
    // ── Structure (E100–E199) ──
    pub const NO_ENTRY: Self = Self(100);
    pub const MULTIPLE_ENTRIES: Self = Self(101);
    pub const NO_EXIT: Self = Self(102);
    pub const DUPLICATE_NODE_ID: Self = Self(103);

    // ── Edges (E200–E299) ──
    pub const UNKNOWN_EDGE_SOURCE: Self = Self(200);
    pub const UNKNOWN_EDGE_TARGET: Self = Self(201);

    // ── Connectivity (E300–E399) ──
    pub const ENTRY_WITHOUT_OUTGOING: Self = Self(300);
    pub const EXIT_WITHOUT_INCOMING: Self = Self(301);
    pub const DISCONNECTED_NODE: Self = Self(302);
    pub const UNREACHABLE_NODE: Self = Self(303);

    // ── Payload (E400–E499) ──
    pub const MISSING_ACTION: Self = Self(400);
    pub const UNKNOWN_PREDICATE: Self = Self(401);
    pub const MISSING_BRANCH: Self = Self(402);
    pub const LOOP_SINGLE_EDGE: Self = Self(403);
    pub const UNKNOWN_ACTION: Self = Self(404);

    // ── Level (E500–E599) ──
    pub const REQUIRED_ACTION_UNUSED: Self = Self(500);
    pub const UNKNOWN_REQUIRED_ACTION: Self = Self(501);
    pub const START_NOT_OPEN: Self = Self(502);
    pub const GOAL_NOT_OPEN: Self = Self(503);

    pub fn category(self) -> DiagnosticCategory {
        match self.0 {
            100..=199 => DiagnosticCategory::Structure,
            200..=299 => DiagnosticCategory::Edge,
            300..=399 => DiagnosticCategory::Connectivity,
            400..=499 => DiagnosticCategory::Payload,
            _ => DiagnosticCategory::Level,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structure => write!(f, "structure"),
            Self::Edge => write!(f, "edge"),
            Self::Connectivity => write!(f, "connectivity"),
            Self::Payload => write!(f, "payload"),
            Self::Level => write!(f, "level"),
        }
    }
}

/// One structural complaint about a graph (or a graph/level pair).
///
/// The editor highlights `nodeId` / `edgeId` when present; it must not
/// parse `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub category: DiagnosticCategory,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_id: Option<String>,
}

impl Diagnostic {
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Error,
            category: code.category(),
            message: message.into(),
            node_id: None,
            edge_id: None,
        }
    }

    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(code, message)
        }
    }

    pub fn with_node(mut self, id: impl Into<String>) -> Self {
        self.node_id = Some(id.into());
        self
    }

    pub fn with_edge(mut self, id: impl Into<String>) -> Self {
        self.edge_id = Some(id.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.code, self.category, self.message)
    }
}

/// Every diagnostic found in one pass. Nothing is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub total_errors: usize,
    pub total_warnings: usize,
}

impl Diagnostics {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    /// Route by severity.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => {
                self.errors.push(diagnostic);
                self.total_errors += 1;
            }
            Severity::Warning => {
                self.warnings.push(diagnostic);
                self.total_warnings += 1;
            }
        }
    }

    pub fn has_code(&self, code: DiagnosticCode) -> bool {
        self.errors
            .iter()
            .chain(&self.warnings)
            .any(|d| d.code == code)
    }
}

/// The editor-facing verdict: `{ valid, errors }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl From<&Diagnostics> for ValidationResult {
    fn from(diagnostics: &Diagnostics) -> Self {
        Self {
            valid: !diagnostics.has_errors(),
            errors: diagnostics.errors.iter().map(|d| d.message.clone()).collect(),
        }
    }
}
