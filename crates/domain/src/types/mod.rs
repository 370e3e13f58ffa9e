//! Domain types and models

pub mod conflict;
pub mod dashboard;
pub mod export;
pub mod optimize;
pub mod schedule;
pub mod session;
pub mod workload;

pub use conflict::{ConflictFact, ConflictSummary, ConflictType, Severity};
pub use dashboard::{
    AdminDashboard, ClassSlot, PlatformOverview, SectionCompletion, TeacherDashboard,
};
pub use export::{
    CatalogItem, ExportConfig, ExportDelivery, ExportFormat, ExportReceipt, ExportRequest,
    ExportScope, ScopeCatalog,
};
pub use optimize::{
    Algorithm, AlgorithmParameters, ApplyOutcome, ConstraintParams, GeneticParams,
    ObjectiveWeights, OptimizationDraft, OptimizationOutcome, OptimizerRemoteConfig,
    PreviewAssignment, RunStatus, ScheduleConstraints, SchedulePreview,
    StartOptimizationRequest,
};
pub use schedule::{Assignment, NewAssignment, Period, WeekSchedule, Weekday, PERIODS};
pub use session::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, SessionTokens, UserProfile,
    UserRole,
};
pub use workload::{AlertType, TeacherAlert, WorkloadAlerts, WorkloadStatus};
