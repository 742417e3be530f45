//! Determinism verification for text artifacts.
//!
//! Every generator is a pure function of its analysis, so repeated runs
//! must produce byte-identical text. Failures report the first differing
//! line rather than a byte offset, since the artifacts are prompts meant
//! to be read.

use std::fmt;

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Size of the output in bytes.
    pub output_size: usize,
    /// BLAKE3 hash of the first run's output.
    pub hash: String,
    /// If non-deterministic, the first differing line found.
    pub diff_info: Option<DiffInfo>,
}

/// The first line that differs between two runs.
#[derive(Debug, Clone)]
pub struct DiffInfo {
    /// 1-based line number.
    pub line: usize,
    /// Line from the first run (empty past its end).
    pub expected: String,
    /// Line from the differing run (empty past its end).
    pub actual: String,
    /// Which run (0-indexed) produced the differing output.
    pub run_index: usize,
}

impl fmt::Display for DiffInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Difference at line {} (run {}):\n  expected: {:?}\n  actual:   {:?}",
            self.line, self.run_index, self.expected, self.actual
        )
    }
}

impl DeterminismResult {
    /// Panic with a detailed message if not deterministic.
    pub fn assert_deterministic(&self) {
        if let Some(diff) = &self.diff_info {
            panic!(
                "Non-deterministic output detected!\n\
                 Runs: {}\n\
                 Output size: {} bytes\n\
                 Hash: {}\n\
                 {}",
                self.runs, self.output_size, self.hash, diff
            );
        }
    }
}

/// Computes the BLAKE3 hash of `data` as lowercase hex.
pub fn compute_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Run generation N times and verify all outputs are identical.
///
/// # Arguments
///
/// * `generate_fn` - A function that generates text output
/// * `runs` - Number of times to run the generation (minimum 2)
///
/// # Returns
///
/// A `DeterminismResult` describing the first difference, if any.
pub fn verify_determinism<F, O>(generate_fn: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> O,
    O: AsRef<str>,
{
    assert!(runs >= 2, "Must run at least 2 times to verify determinism");

    let reference = generate_fn();
    let reference = reference.as_ref();
    let hash = compute_hash(reference.as_bytes());

    for run_index in 1..runs {
        let output = generate_fn();
        let output = output.as_ref();
        if output == reference {
            continue;
        }
        return DeterminismResult {
            is_deterministic: false,
            runs: run_index + 1,
            output_size: reference.len(),
            hash,
            diff_info: Some(first_difference(reference, output, run_index)),
        };
    }

    DeterminismResult {
        is_deterministic: true,
        runs,
        output_size: reference.len(),
        hash,
        diff_info: None,
    }
}

/// Asserts that `generate_fn` is deterministic over `runs` runs.
pub fn assert_deterministic<F, O>(generate_fn: F, runs: usize)
where
    F: Fn() -> O,
    O: AsRef<str>,
{
    verify_determinism(generate_fn, runs).assert_deterministic();
}

fn first_difference(expected: &str, actual: &str, run_index: usize) -> DiffInfo {
    let mut expected_lines = expected.lines();
    let mut actual_lines = actual.lines();
    let mut line = 0;
    loop {
        line += 1;
        match (expected_lines.next(), actual_lines.next()) {
            (Some(e), Some(a)) if e == a => continue,
            (None, None) => {
                // Same lines, so the difference is in line endings.
                return DiffInfo {
                    line,
                    expected: format!("{} bytes", expected.len()),
                    actual: format!("{} bytes", actual.len()),
                    run_index,
                };
            }
            (e, a) => {
                return DiffInfo {
                    line,
                    expected: e.unwrap_or_default().to_string(),
                    actual: a.unwrap_or_default().to_string(),
                    run_index,
                };
            }
        }
    }
}

/// Generates a test that runs a text-producing expression three times and
/// asserts identical output.
///
/// # Example
///
/// ```rust,ignore
/// use songbrief_tests::test_determinism;
///
/// test_determinism!(lyrics_full, {
///     generate_lyrics(&full_analysis())
/// });
/// ```
#[macro_export]
macro_rules! test_determinism {
    ($name:ident, runs = $runs:expr, $generate:expr) => {
        #[test]
        fn $name() {
            $crate::determinism::assert_deterministic(|| $generate, $runs);
        }
    };

    ($name:ident, $generate:expr) => {
        #[test]
        fn $name() {
            $crate::determinism::assert_deterministic(|| $generate, 3);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_constant_output_is_deterministic() {
        let result = verify_determinism(|| "[Intro]\n[Chorus]".to_string(), 4);
        assert!(result.is_deterministic);
        assert_eq!(result.runs, 4);
        assert_eq!(result.output_size, 16);
        assert_eq!(result.hash, compute_hash(b"[Intro]\n[Chorus]"));
    }

    #[test]
    fn test_changing_output_reports_line() {
        let counter = Cell::new(0);
        let result = verify_determinism(
            || {
                counter.set(counter.get() + 1);
                format!("Genre:\nPop\nTempo: {} BPM", counter.get())
            },
            3,
        );
        assert!(!result.is_deterministic);
        let diff = result.diff_info.unwrap();
        assert_eq!(diff.line, 3);
        assert_eq!(diff.expected, "Tempo: 1 BPM");
        assert_eq!(diff.actual, "Tempo: 2 BPM");
        assert_eq!(diff.run_index, 1);
    }

    #[test]
    fn test_extra_line_reported() {
        let diff = first_difference("a\nb", "a\nb\nc", 2);
        assert_eq!(diff.line, 3);
        assert_eq!(diff.expected, "");
        assert_eq!(diff.actual, "c");
    }

    #[test]
    #[should_panic(expected = "Non-deterministic")]
    fn test_assert_panics_on_difference() {
        let counter = Cell::new(0);
        assert_deterministic(
            || {
                counter.set(counter.get() + 1);
                counter.get().to_string()
            },
            2,
        );
    }
}
