//! The seven phases of a release run, one file per step.

mod checksums;
mod cover;
mod create_jobs;
mod encode;
mod playlist;
mod report;
mod setup;

pub use checksums::ChecksumsStep;
pub use cover::CoverCopyStep;
pub use create_jobs::CreateJobsStep;
pub use encode::EncodeStep;
pub use playlist::PlaylistStep;
pub use report::ReportStep;
pub use setup::SetupStep;
