//! Schedule export request and delivery types

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_ACADEMIC_YEAR;

/// The five supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    HorarioExcel,
    CargaHoraria,
    HorarioCsv,
    SectionSchedule,
    TeacherSchedule,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::HorarioExcel,
        ExportFormat::CargaHoraria,
        ExportFormat::HorarioCsv,
        ExportFormat::SectionSchedule,
        ExportFormat::TeacherSchedule,
    ];

    /// URL path segment of the export endpoint for this format.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::HorarioExcel => "horario_excel",
            Self::CargaHoraria => "carga_horaria",
            Self::HorarioCsv => "horario_csv",
            Self::SectionSchedule => "section_schedule",
            Self::TeacherSchedule => "teacher_schedule",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::HorarioExcel => "Horario Completo (Excel)",
            Self::CargaHoraria => "Carga Horaria (Excel)",
            Self::HorarioCsv => "Horario (CSV)",
            Self::SectionSchedule => "Horario por Sección (PDF)",
            Self::TeacherSchedule => "Horario por Profesor (PDF)",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::HorarioExcel => "Horario completo en formato Excel venezolano",
            Self::CargaHoraria => "Resumen de carga horaria por profesor",
            Self::HorarioCsv => "Datos del horario en formato CSV",
            Self::SectionSchedule => "Horario individual de cada sección",
            Self::TeacherSchedule => "Horario individual de cada profesor",
        }
    }

    /// File extension of the produced artifact.
    pub fn extension(self) -> &'static str {
        match self {
            Self::HorarioExcel | Self::CargaHoraria => "xlsx",
            Self::HorarioCsv => "csv",
            Self::SectionSchedule | Self::TeacherSchedule => "pdf",
        }
    }
}

/// What subset of the schedule an export covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportScope {
    #[default]
    All,
    Sections,
    Teachers,
    Subjects,
}

impl ExportScope {
    pub fn description(self) -> &'static str {
        match self {
            Self::All => "Todos los datos disponibles",
            Self::Sections => "Secciones específicas",
            Self::Teachers => "Profesores específicos",
            Self::Subjects => "Materias específicas",
        }
    }
}

/// Transient export configuration, one per wizard session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub format: ExportFormat,
    pub academic_year: String,
    pub scope: ExportScope,
    pub selected_items: Vec<i64>,
    pub include_conflicts: bool,
    pub include_workload: bool,
    pub report_title: String,
    pub institution_name: String,
}

impl ExportConfig {
    /// Configuration defaults for a freshly selected format.
    pub fn for_format(format: ExportFormat, institution_name: &str) -> Self {
        Self {
            format,
            academic_year: DEFAULT_ACADEMIC_YEAR.to_string(),
            scope: ExportScope::All,
            selected_items: Vec::new(),
            include_conflicts: true,
            include_workload: true,
            report_title: format!("{} {}", format.display_name(), DEFAULT_ACADEMIC_YEAR),
            institution_name: institution_name.to_string(),
        }
    }
}

/// Wire request body for the export endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    pub academic_year: String,
    pub scope: ExportScope,
    pub include_conflicts: bool,
    pub include_workload: bool,
    pub report_title: String,
    pub institution_name: String,
    pub export_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_items: Option<Vec<i64>>,
}

/// JSON body variant of an export response: the artifact is fetched from a
/// URL instead of riding in the response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportReceipt {
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

/// How a completed export reaches the user.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportDelivery {
    /// The backend responded with a URL to download from.
    Url { url: String, filename: Option<String> },
    /// The backend streamed the file directly.
    File { bytes: Vec<u8>, filename: Option<String> },
}

impl ExportDelivery {
    pub fn filename(&self) -> Option<&str> {
        match self {
            Self::Url { filename, .. } | Self::File { filename, .. } => filename.as_deref(),
        }
    }
}

/// One selectable scope item (section, teacher or subject).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
}

/// Selectable items for scoped exports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScopeCatalog {
    #[serde(default)]
    pub sections: Vec<CatalogItem>,
    #[serde(default)]
    pub teachers: Vec<CatalogItem>,
    #[serde(default)]
    pub subjects: Vec<CatalogItem>,
}

impl ScopeCatalog {
    /// Items selectable under the given scope; empty for [`ExportScope::All`].
    pub fn items_for(&self, scope: ExportScope) -> &[CatalogItem] {
        match scope {
            ExportScope::All => &[],
            ExportScope::Sections => &self.sections,
            ExportScope::Teachers => &self.teachers,
            ExportScope::Subjects => &self.subjects,
        }
    }
}
