//! SongBrief End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the flows a pack goes through:
//!
//! - Loading: markdown, YAML and JSON analyses -> canonical analysis
//! - Generation: analysis -> style, lyrics and image prompt
//! - Validation: generated or hand-edited artifacts -> validation report
//! - **Determinism**: the same analysis always yields byte-identical artifacts
//!
//! ## Running Tests
//!
//! ```bash
//! # Run everything
//! cargo test -p songbrief-tests
//!
//! # Property tests with more cases
//! PROPTEST_CASES=1000 cargo test -p songbrief-tests --test proptest_properties
//! ```
//!
//! ## Determinism Testing
//!
//! ```rust,ignore
//! use songbrief_tests::determinism::verify_determinism;
//! use songbrief_tests::test_determinism;
//!
//! let result = verify_determinism(|| generate_style(&analysis), 3);
//! assert!(result.is_deterministic);
//!
//! test_determinism!(style_full, {
//!     generate_style(&full_analysis())
//! });
//! ```

pub mod determinism;
pub mod fixtures;

// Re-export commonly used items
pub use determinism::{assert_deterministic, compute_hash, verify_determinism, DeterminismResult};
pub use fixtures::DataDirFixture;
