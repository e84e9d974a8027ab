//! Persisted collections: templates (bounded) and submissions (append-only).
//!
//! Both repositories load their collection once when opened and write the
//! whole collection through to the blob store on every change. A change is
//! only applied in memory after its write succeeded, so a failed write leaves
//! the repository exactly as it was.

pub mod submissions;
pub mod templates;

pub use submissions::SubmissionRepository;
pub use templates::{TEMPLATE_LIMIT, TemplateRepository};
