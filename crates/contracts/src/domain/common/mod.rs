//! Common types shared by all workflow entities

pub mod status;

// Re-exports
pub use status::{
    color_tag, label, normalization_key, normalize, normalize_with, CanonicalStatus, ColorTag,
    LogDiagnostics, NoopDiagnostics, StatusDiagnostics, StatusVocabulary,
};
