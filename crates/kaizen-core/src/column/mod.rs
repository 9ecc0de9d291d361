//! Column-type classification.
//!
//! Columns carry an explicit [`ColumnType`] tag when they are created by this
//! crate. Columns coming from older data only have an id such as
//! `dept1-problems-analysis` and a human title in English or Spanish; for
//! those the keyword classifier below derives the type.

use serde::{Deserialize, Serialize};

/// Abstract status bucket of a board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnType {
    ToDo,
    InProgress,
    Done,
    New,
    Analysis,
    CorrectiveActions,
    Resolved,
    Idea,
    Approved,
    Implementation,
    Completed,
    Unclassified,
}

/// Keyword groups in match order, English then Spanish. The first group with
/// a keyword contained in the lowercased input wins, so groups holding words
/// that are substrings of other groups' words ("implemented" /
/// "implementation") are ordered first.
const KEYWORD_GROUPS: &[(ColumnType, &[&str], &[&str])] = &[
    (
        ColumnType::Completed,
        &["completed", "implemented", "finalized"],
        &["completad", "implementad", "finalizad"],
    ),
    (
        ColumnType::Resolved,
        &["resolved", "solved"],
        &["resuelt", "solucionad"],
    ),
    (ColumnType::Done, &["done", "finished"], &["hecho", "terminad"]),
    (
        ColumnType::CorrectiveActions,
        &["corrective", "actions"],
        &["correctiv", "acciones"],
    ),
    (ColumnType::Analysis, &["analysis"], &["análisis", "analisis"]),
    (
        ColumnType::Implementation,
        &["implementation"],
        &["implementación", "implementacion"],
    ),
    (ColumnType::Approved, &["approved"], &["aprobad"]),
    (
        ColumnType::InProgress,
        &["in-progress", "inprogress", "in_progress", "in progress", "doing", "ongoing"],
        &["en-progreso", "enprogreso", "en_progreso", "en progreso", "haciendo", "en curso"],
    ),
    (
        ColumnType::ToDo,
        &["to-do", "todo", "to_do", "to do", "pending"],
        &["por-hacer", "porhacer", "por_hacer", "por hacer", "pendiente"],
    ),
    (ColumnType::New, &["new"], &["nuevo", "nueva"]),
    (ColumnType::Idea, &["idea"], &["idea"]),
];

/// Keywords that mark a column as a finishing stage, English then Spanish.
const COMPLETION_KEYWORDS: (&[&str], &[&str]) = (
    &["done", "finished", "resolved", "solved", "implemented", "completed", "finalized"],
    &["hecho", "terminad", "resuelt", "solucionad", "implementad", "completad", "finalizad"],
);

impl ColumnType {
    /// Every classifiable type, in declaration order.
    pub const ALL: [ColumnType; 11] = [
        Self::ToDo,
        Self::InProgress,
        Self::Done,
        Self::New,
        Self::Analysis,
        Self::CorrectiveActions,
        Self::Resolved,
        Self::Idea,
        Self::Approved,
        Self::Implementation,
        Self::Completed,
    ];

    /// Classify free text (a column title or an extracted id suffix).
    pub fn classify(text: &str) -> Self {
        let normalized = text.trim().to_lowercase();
        if normalized.is_empty() {
            return Self::Unclassified;
        }

        KEYWORD_GROUPS
            .iter()
            .find(|(_, english, spanish)| {
                english.iter().chain(spanish.iter()).any(|k| normalized.contains(k))
            })
            .map(|(kind, _, _)| *kind)
            .unwrap_or(Self::Unclassified)
    }

    /// Parse the canonical slug produced by [`ColumnType::as_str`].
    pub fn from_slug(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Canonical slug, also used as the last segment of generated column ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToDo => "to-do",
            Self::InProgress => "in-progress",
            Self::Done => "done",
            Self::New => "new",
            Self::Analysis => "analysis",
            Self::CorrectiveActions => "corrective-actions",
            Self::Resolved => "resolved",
            Self::Idea => "idea",
            Self::Approved => "approved",
            Self::Implementation => "implementation",
            Self::Completed => "completed",
            Self::Unclassified => "unclassified",
        }
    }

    /// Whether reaching a column of this type finishes the work item.
    pub fn is_completion(&self) -> bool {
        matches!(self, Self::Done | Self::Resolved | Self::Completed)
    }

    /// Default column title for a locale (`"es"` or anything else for English).
    pub fn title(&self, locale: &str) -> &'static str {
        let spanish = locale.eq_ignore_ascii_case("es");
        match (self, spanish) {
            (Self::ToDo, false) => "To Do",
            (Self::ToDo, true) => "Por hacer",
            (Self::InProgress, false) => "In Progress",
            (Self::InProgress, true) => "En progreso",
            (Self::Done, false) => "Done",
            (Self::Done, true) => "Hecho",
            (Self::New, false) => "New",
            (Self::New, true) => "Nuevo",
            (Self::Analysis, false) => "Analysis",
            (Self::Analysis, true) => "Análisis",
            (Self::CorrectiveActions, false) => "Corrective Actions",
            (Self::CorrectiveActions, true) => "Acciones correctivas",
            (Self::Resolved, false) => "Resolved",
            (Self::Resolved, true) => "Resuelto",
            (Self::Idea, false) => "Ideas",
            (Self::Idea, true) => "Ideas",
            (Self::Approved, false) => "Approved",
            (Self::Approved, true) => "Aprobado",
            (Self::Implementation, false) => "Implementation",
            (Self::Implementation, true) => "Implementación",
            (Self::Completed, false) => "Completed",
            (Self::Completed, true) => "Completado",
            (Self::Unclassified, false) => "Other",
            (Self::Unclassified, true) => "Otros",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Return the column-type part of a `<departmentId>-<category>-<columnType>` id.
///
/// Ids with fewer than three segments are returned unchanged.
pub fn extract_column_type(full_column_id: &str) -> &str {
    let mut parts = full_column_id.splitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(_), Some(rest)) => rest,
        _ => full_column_id,
    }
}

/// Whether a column type string names a finishing stage.
pub fn is_completion_column(column_type: &str) -> bool {
    let normalized = column_type.to_lowercase();
    let (english, spanish) = COMPLETION_KEYWORDS;
    english.iter().chain(spanish.iter()).any(|k| normalized.contains(k))
}
