//! Section-structure resolution.
//!
//! Expands a partial section list into a full song form for the target
//! length. Short lists are replaced by the canonical template; longer ones
//! only gain the mandatory sections they lack.

use tracing::debug;

use crate::analysis::TargetLength;
use crate::section::Section;

/// Section lists shorter than this are replaced by the canonical template.
pub const MIN_EXPLICIT_SECTIONS: usize = 8;

const THREE_MINUTE_TEMPLATE: &[Section] = &[
    Section::Intro,
    Section::Verse1,
    Section::PreChorus,
    Section::Chorus,
    Section::PostChorus,
    Section::Verse2,
    Section::PreChorus,
    Section::Chorus,
    Section::Instrumental,
    Section::Bridge,
    Section::FinalChorus,
    Section::FinalChorusRepeat,
    Section::Outro,
];

const FOUR_MINUTE_TEMPLATE: &[Section] = &[
    Section::Intro,
    Section::Verse1,
    Section::PreChorus,
    Section::Chorus,
    Section::PostChorus,
    Section::Verse2,
    Section::PreChorus,
    Section::Chorus,
    Section::PostChorus,
    Section::Instrumental,
    Section::Bridge,
    Section::FinalChorus,
    Section::FinalChorusRepeat,
    Section::Outro,
];

const FIVE_MINUTE_TEMPLATE: &[Section] = &[
    Section::Intro,
    Section::Verse1,
    Section::PreChorus,
    Section::Chorus,
    Section::PostChorus,
    Section::Verse2,
    Section::PreChorus,
    Section::Chorus,
    Section::PostChorus,
    Section::Instrumental,
    Section::Verse3,
    Section::PreChorus,
    Section::Bridge,
    Section::Breakdown,
    Section::FinalChorus,
    Section::FinalChorusRepeat,
    Section::Outro,
];

/// Canonical section sequence for a target length.
pub fn default_sections(length: TargetLength) -> &'static [Section] {
    match length {
        TargetLength::ThreeMinutes => THREE_MINUTE_TEMPLATE,
        TargetLength::FourMinutes => FOUR_MINUTE_TEMPLATE,
        TargetLength::FiveMinutes => FIVE_MINUTE_TEMPLATE,
    }
}

/// Sections every resolved structure of this length must contain.
pub fn mandatory_sections(length: TargetLength) -> &'static [Section] {
    match length {
        TargetLength::ThreeMinutes => &[
            Section::Verse2,
            Section::Instrumental,
            Section::Bridge,
            Section::FinalChorus,
        ],
        TargetLength::FourMinutes | TargetLength::FiveMinutes => {
            &[Section::Verse2, Section::Bridge, Section::FinalChorus]
        }
    }
}

/// Position of the first occurrence of `section` in the template.
fn rank(template: &[Section], section: Section) -> Option<usize> {
    template.iter().position(|s| *s == section)
}

/// Resolves the full section sequence for a song.
///
/// # Arguments
/// * `provided` - Sections as supplied by the analysis, in order
/// * `length` - Target song length
///
/// # Returns
/// The canonical template when fewer than 8 sections are supplied,
/// otherwise `provided` with each missing mandatory section inserted after
/// the last supplied section that ranks before it in the template (or at
/// the front). Supplied sections are never removed or reordered.
///
/// # Example
/// ```
/// use songbrief_spec::{Section, TargetLength};
/// use songbrief_spec::structure::resolve_sections;
///
/// let resolved = resolve_sections(&[], TargetLength::ThreeMinutes);
/// assert_eq!(resolved.len(), 13);
/// assert_eq!(resolved[0], Section::Intro);
/// ```
pub fn resolve_sections(provided: &[Section], length: TargetLength) -> Vec<Section> {
    let template = default_sections(length);

    if provided.len() < MIN_EXPLICIT_SECTIONS {
        debug!(
            provided = provided.len(),
            length = length.as_str(),
            "using canonical section template"
        );
        return template.to_vec();
    }

    let mut resolved = provided.to_vec();
    for &missing in mandatory_sections(length) {
        if resolved.contains(&missing) {
            continue;
        }
        let Some(missing_rank) = rank(template, missing) else {
            continue;
        };
        let insert_at = resolved
            .iter()
            .rposition(|s| rank(template, *s).is_some_and(|r| r < missing_rank))
            .map_or(0, |i| i + 1);
        debug!(
            section = missing.as_str(),
            index = insert_at,
            "inserting missing mandatory section"
        );
        resolved.insert(insert_at, missing);
    }
    resolved
}
