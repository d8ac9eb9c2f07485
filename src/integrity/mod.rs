//! Integrity Module
//!
//! Dual-signal agent integrity evaluation:
//! - Behavioral drift against an adaptive EWMA baseline
//! - Model-fingerprint tamper signal from an external registry

pub mod evaluator;
pub mod registry;

pub use evaluator::{
    Confidence, IntegrityAction, IntegrityAssessment, IntegrityEvaluator, DRIFT_RATIO,
    EVALUATION_WINDOW,
};
pub use registry::{ModelRegistry, TamperSignal, DEFAULT_MODEL_VERSION};
