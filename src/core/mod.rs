pub mod clock;
pub mod diagnostics;
pub mod imaging;
pub mod models;
pub mod orchestrator;
pub mod runner;
pub mod serial;
pub mod session_log;

pub use diagnostics::DiagnosticRunner;
pub use imaging::AcquisitionCommandBuilder;
pub use models::{
    AcquisitionCommand, AcquisitionConfig, Backend, DiagnosticReport, HashAlgorithm, SerialNumber,
};
pub use orchestrator::{Orchestrator, SessionSummary};
pub use runner::{AcquisitionOutcome, AcquisitionRunner};
pub use serial::SerialExtractor;
pub use session_log::SessionLog;
