//! Song section vocabulary.

use serde::{Deserialize, Serialize};

/// A structural segment of a song.
///
/// The set is closed: every consumer matches exhaustively, so adding a
/// section forces each renderer to decide how to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Intro,
    Verse1,
    Verse2,
    Verse3,
    PreChorus,
    Chorus,
    PostChorus,
    Instrumental,
    Drop,
    Breakdown,
    Bridge,
    FinalChorus,
    FinalChorusRepeat,
    Outro,
}

impl Section {
    /// Returns the identifier used in analysis files (e.g. "PreChorus").
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Intro => "Intro",
            Section::Verse1 => "Verse1",
            Section::Verse2 => "Verse2",
            Section::Verse3 => "Verse3",
            Section::PreChorus => "PreChorus",
            Section::Chorus => "Chorus",
            Section::PostChorus => "PostChorus",
            Section::Instrumental => "Instrumental",
            Section::Drop => "Drop",
            Section::Breakdown => "Breakdown",
            Section::Bridge => "Bridge",
            Section::FinalChorus => "FinalChorus",
            Section::FinalChorusRepeat => "FinalChorusRepeat",
            Section::Outro => "Outro",
        }
    }

    /// Returns the name used inside bracketed markers (e.g. "Pre-Chorus").
    pub fn display_name(&self) -> &'static str {
        match self {
            Section::Intro => "Intro",
            Section::Verse1 => "Verse 1",
            Section::Verse2 => "Verse 2",
            Section::Verse3 => "Verse 3",
            Section::PreChorus => "Pre-Chorus",
            Section::Chorus => "Chorus",
            Section::PostChorus => "Post-Chorus",
            Section::Instrumental => "Instrumental",
            Section::Drop => "Drop",
            Section::Breakdown => "Breakdown",
            Section::Bridge => "Bridge",
            Section::FinalChorus => "Final Chorus",
            Section::FinalChorusRepeat => "Final Chorus Repeat",
            Section::Outro => "Outro",
        }
    }

    pub fn is_verse(&self) -> bool {
        matches!(self, Section::Verse1 | Section::Verse2 | Section::Verse3)
    }

    /// True for every chorus variant, including the final ones.
    pub fn is_chorus(&self) -> bool {
        matches!(
            self,
            Section::Chorus | Section::FinalChorus | Section::FinalChorusRepeat
        )
    }

    /// True for the climax choruses at the end of the song.
    pub fn is_final_chorus(&self) -> bool {
        matches!(self, Section::FinalChorus | Section::FinalChorusRepeat)
    }

    /// True for sections that carry no sung lyrics by default.
    pub fn is_instrumental(&self) -> bool {
        matches!(
            self,
            Section::Intro
                | Section::Instrumental
                | Section::Drop
                | Section::Breakdown
                | Section::Outro
        )
    }

    /// Maps a free-form section label (as written in analysis markdown) to a section.
    ///
    /// Accepts English labels in any spacing/case ("Verse 2", "pre-chorus",
    /// "Final Chorus (repeat)") and the common Japanese labels (Aメロ, Bメロ,
    /// サビ, 大サビ, 間奏, ...). Trailing annotations after a parenthesis,
    /// colon or dash are ignored.
    pub fn from_label(label: &str) -> Option<Section> {
        let head = label
            .split(['(', '（', ':', '：', '—'])
            .next()
            .unwrap_or("")
            .split(" - ")
            .next()
            .unwrap_or("");

        let normalized: String = head
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '/' | '_' | '.'))
            .flat_map(char::to_lowercase)
            .collect();

        let section = match normalized.as_str() {
            "intro" | "イントロ" => Section::Intro,
            "verse" | "verse1" | "aメロ" | "ａメロ" => Section::Verse1,
            "verse2" | "2aメロ" => Section::Verse2,
            "verse3" => Section::Verse3,
            "prechorus" | "bメロ" | "ｂメロ" => Section::PreChorus,
            "chorus" | "hook" | "サビ" => Section::Chorus,
            "postchorus" | "後サビ" => Section::PostChorus,
            "instrumental" | "interlude" | "solo" | "間奏" => Section::Instrumental,
            "drop" | "ドロップ" => Section::Drop,
            "breakdown" => Section::Breakdown,
            "bridge" | "cメロ" | "ｃメロ" | "ブリッジ" => Section::Bridge,
            "finalchorus" | "lastchorus" | "大サビ" | "ラスサビ" => Section::FinalChorus,
            "finalchorusrepeat" | "finalchorusrepeated" => Section::FinalChorusRepeat,
            "outro" | "ending" | "アウトロ" => Section::Outro,
            _ => return None,
        };
        Some(section)
    }

    /// Returns all sections in declaration order.
    pub fn all() -> &'static [Section] {
        &[
            Section::Intro,
            Section::Verse1,
            Section::Verse2,
            Section::Verse3,
            Section::PreChorus,
            Section::Chorus,
            Section::PostChorus,
            Section::Instrumental,
            Section::Drop,
            Section::Breakdown,
            Section::Bridge,
            Section::FinalChorus,
            Section::FinalChorusRepeat,
            Section::Outro,
        ]
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::all()
            .iter()
            .copied()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| format!("unknown section: {}", s))
    }
}
