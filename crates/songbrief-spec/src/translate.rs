//! Japanese to English term translation for prompt text.
//!
//! Prompts sent to the generation service must be English. Analyses are
//! often written in Japanese, so every free-text field passes through
//! [`translate`] before it is rendered. Translation is table driven and
//! best effort: words missing from the tables pass through unchanged.

use std::sync::OnceLock;

/// Music and imagery terms, substituted longest key first.
const MUSIC_TERMS: &[(&str, &str)] = &[
    // Instruments
    ("ピアノ", "piano"),
    ("シンセ", "synth"),
    ("ギター", "guitar"),
    ("アコギ", "acoustic guitar"),
    ("エレキ", "electric guitar"),
    ("ベース", "bass"),
    ("ドラム", "drums"),
    ("ストリングス", "strings"),
    ("オーケストラ", "orchestra"),
    ("ブラス", "brass"),
    ("808ベース", "808 bass"),
    ("打ち込み", "programmed "),
    ("生", "live"),
    ("シンセベース", "synth bass"),
    ("シンセアルペジオ", "synth arpeggio"),
    // Effects and techniques
    ("ボーカルチョップ", "vocal chop"),
    ("シンセスタブ", "synth stab"),
    ("グリッチ", "glitch"),
    ("リバーブ", "reverb"),
    ("ディレイ", "delay"),
    ("フィルター", "filter"),
    ("サイドチェイン", "sidechain"),
    ("ハイハット", "hi-hat"),
    ("キック", "kick"),
    ("スネア", "snare"),
    ("アルペジオ", "arpeggio"),
    // Sections and energy
    ("サビ", "chorus"),
    ("バース", "verse"),
    ("ブリッジ", "bridge"),
    ("イントロ", "intro"),
    ("アウトロ", "outro"),
    ("ドロップ", "drop"),
    ("ビルドアップ", "buildup"),
    ("軽快", "lively"),
    ("切迫感", "urgency"),
    ("疾走感", "driving energy"),
    // Descriptions
    ("爆発", "explosive"),
    ("解決", "resolution"),
    ("不安定", "unstable"),
    ("安定", "stable"),
    ("上昇", "ascending"),
    ("下降", "descending"),
    ("期待", "anticipation"),
    ("違和感", "unease"),
    ("開放", "release"),
    ("緊張", "tension"),
    ("高密度", "dense"),
    ("低密度", "sparse"),
    ("中密度", "medium density"),
    ("静寂", "silence"),
    ("覚悟", "determination"),
    ("メランコリック", "melancholic"),
    ("ポップ", "pop"),
    ("ロック", "rock"),
    // Emotion
    ("語る", "narrate"),
    ("救う", "save"),
    ("救わない", "without salvation"),
    ("宣言", "declaration"),
    ("執着", "obsession"),
    ("焦燥", "anxiety"),
    ("切なさ", "longing"),
    ("届かない", "unreachable"),
    ("苦しさ", "anguish"),
    // Concepts
    ("完璧", "perfection"),
    ("嘘", "lies"),
    ("愛されたい", "desire to be loved"),
    ("虚構", "illusion"),
    ("演技", "performance"),
    ("光", "light"),
    ("影", "shadow"),
    ("光と影", "light and shadow"),
    ("孤独", "solitude"),
    ("仮面", "mask"),
    ("本音", "true feelings"),
    ("夜", "night"),
    ("駆ける", "running"),
    ("追いかける", "chasing"),
    ("手を伸ばす", "reaching out"),
    ("希望", "hope"),
    ("絶望", "despair"),
    ("命", "life"),
    ("瀬戸際", "edge"),
    ("呼びかけ", "calling out"),
    ("夏", "summer"),
    ("空", "sky"),
    ("風", "wind"),
    ("雨", "rain"),
    ("海", "sea"),
    ("桜", "cherry blossoms"),
    ("夢", "dream"),
    ("夕暮れ", "dusk"),
    ("窓", "window"),
    ("余韻", "lingering echo"),
    ("記憶", "memory"),
    ("都会", "city"),
    ("街", "town"),
    ("涙", "tears"),
    ("炎", "flame"),
    // Perspective
    ("一人称", "first person"),
    ("二人称", "second person"),
    ("三人称", "third person"),
    // Mood
    ("明るい", "bright"),
    ("暗い", "dark"),
    ("切ない", "bittersweet"),
    ("熱い", "passionate"),
    ("冷たい", "cold"),
    ("穏やか", "calm"),
    ("激しい", "intense"),
    // Structure
    ("短尺", "short form"),
    ("長尺", "long form"),
    ("ループ", "loop"),
    ("リピート", "repeat"),
    // Compound phrases, so they also match inside longer text
    ("軽快なのに切迫感がある", "lively yet urgent"),
    ("一瞬の", "momentary "),
    (
        "ポップだが少しメランコリックなマイナー感",
        "pop with a melancholic minor feel",
    ),
    (
        "命の瀬戸際にいる人への呼びかけ",
        "calling out to someone on the edge",
    ),
    ("追いかける焦燥", "desperate chase"),
    (
        "焦燥、切なさ、届かない苦しさ",
        "anxiety, longing, unreachable anguish",
    ),
];

/// Whole-input overrides for idioms whose word-by-word rendering is wrong.
const PHRASE_OVERRIDES: &[(&str, &str)] = &[
    ("軽快なのに切迫感がある", "lively yet urgent"),
    (
        "ポップだが少しメランコリックなマイナー感",
        "pop with a melancholic minor feel",
    ),
    (
        "命の瀬戸際にいる人への呼びかけ",
        "calling out to someone on the edge",
    ),
    ("追いかける焦燥", "desperate chase"),
    (
        "焦燥、切なさ、届かない苦しさ",
        "anxiety, longing, unreachable anguish",
    ),
    (
        "焦燥, 切なさ, 届かない苦しさ",
        "anxiety, longing, unreachable anguish",
    ),
    ("光と影の対比", "contrast of light and shadow"),
];

const CHORD_FEEL_IDIOMS: &[(&str, &str)] = &[
    (
        "不安定なマイナーループ、期待と違和感を同時に作る",
        "Unstable minor loop creating both anticipation and unease",
    ),
    ("上昇感を作る", "Creating ascending tension"),
    ("一時的な開放", "Temporary release"),
    ("解決しない", "Without resolution"),
    ("ダーク", "Dark"),
    ("明るい", "Bright"),
    (
        "ポップだが少しメランコリックなマイナー感",
        "Pop with a melancholic minor feel",
    ),
    ("上昇する期待感と焦燥", "Rising anticipation and anxiety"),
    ("一瞬の静寂、覚悟", "Momentary silence, determination"),
];

const DYNAMICS_IDIOMS: &[(&str, &str)] = &[
    (
        "サビで爆発させるが、解決はしない",
        "Explosive choruses without resolution",
    ),
    ("語るが、救わない", "Narrating without salvation"),
    ("軽快なのに切迫感がある", "Lively yet urgent"),
    ("激しい", "Intense"),
    ("穏やか", "Calm"),
    ("ドラマチック", "Dramatic"),
    ("エネルギッシュ", "Energetic"),
];

/// Keyword renderings tuned for image prompts rather than literal meaning.
const CONCEPT_IMAGERY: &[(&str, &str)] = &[
    ("完璧", "perfection"),
    ("嘘", "deception"),
    ("愛されたい", "longing for love"),
    ("虚構", "facade"),
    ("演技", "act"),
    ("光と影", "light and shadow"),
    ("孤独", "isolation"),
    ("仮面", "mask behind the smile"),
    ("本音", "hidden truth"),
    ("反逆", "rebellion"),
    ("叫び", "scream"),
    ("内省", "introspection"),
    ("葛藤", "inner conflict"),
    ("記憶", "memories"),
    ("別れ", "farewell"),
    ("夏", "summer"),
    ("夜", "night"),
    ("駆ける", "running through"),
    ("追いかける", "chasing"),
    ("手を伸ばす", "reaching out"),
    ("届かない", "unreachable"),
    ("焦燥", "desperation"),
    ("希望", "hope"),
    ("絶望", "despair"),
    ("光", "radiant light"),
];

/// Punctuation and particle cleanups, applied in order after term substitution.
const CLEANUPS: &[(&str, &str)] = &[
    ("（", " ("),
    ("）", ") "),
    ("、", ", "),
    ("・", ", "),
    ("，", ", "),
    ("。", "."),
    ("．", "."),
    ("！", "."),
    ("にいる", " at "),
    ("への", " to "),
    ("の", " of "),
    ("人", " person "),
    ("側", " perspective"),
];

static SORTED_TERMS: OnceLock<Vec<(&'static str, &'static str)>> = OnceLock::new();

fn sorted_terms() -> &'static [(&'static str, &'static str)] {
    SORTED_TERMS.get_or_init(|| {
        let mut terms = MUSIC_TERMS.to_vec();
        // Stable sort keeps table order among equal-length keys.
        terms.sort_by_key(|(ja, _)| std::cmp::Reverse(ja.chars().count()));
        terms
    })
}

fn lookup(table: &[(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(from, _)| *from == key)
        .map(|(_, to)| *to)
}

fn is_japanese(c: char) -> bool {
    matches!(c, '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}' | '\u{4E00}'..='\u{9FAF}')
}

/// Returns true if the text contains hiragana, katakana or CJK ideographs.
pub fn contains_japanese(text: &str) -> bool {
    text.chars().any(is_japanese)
}

/// Translates Japanese music terms in `text` to English.
///
/// Text without Japanese characters is returned unchanged. The function is
/// idempotent: translating its own output is a no-op.
///
/// # Example
/// ```
/// use songbrief_spec::translate::translate;
///
/// assert_eq!(translate("ピアノ + シンセ"), "piano + synth");
/// assert_eq!(translate("Indie Pop"), "Indie Pop");
/// ```
pub fn translate(text: &str) -> String {
    if !contains_japanese(text) {
        return text.to_string();
    }

    if let Some(phrase) = lookup(PHRASE_OVERRIDES, text) {
        return phrase.to_string();
    }

    let mut result = text.to_string();
    for (ja, en) in sorted_terms() {
        if result.contains(ja) {
            result = result.replace(ja, en);
        }
    }

    result = space_plus_signs(&result);
    for (from, to) in CLEANUPS {
        if result.contains(from) {
            result = result.replace(from, to);
        }
    }

    result.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes `a+b`, `a +  b` and friends to `a + b`.
fn space_plus_signs(text: &str) -> String {
    if !text.contains('+') {
        return text.to_string();
    }
    text.split('+')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Translates every item.
pub fn translate_array<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items.iter().map(|item| translate(item.as_ref())).collect()
}

/// Translates a chord feel, preferring the idiom table.
pub fn translate_chord_feel(feel: &str) -> String {
    lookup(CHORD_FEEL_IDIOMS, feel)
        .map(str::to_string)
        .unwrap_or_else(|| translate(feel))
}

/// Translates a dynamics description, preferring the idiom table.
pub fn translate_dynamics(dynamics: &str) -> String {
    lookup(DYNAMICS_IDIOMS, dynamics)
        .map(str::to_string)
        .unwrap_or_else(|| translate(dynamics))
}

/// Translates concept keywords into image-friendly English.
pub fn translate_concept_keywords<S: AsRef<str>>(keywords: &[S]) -> Vec<String> {
    keywords
        .iter()
        .map(|keyword| {
            let keyword = keyword.as_ref();
            lookup(CONCEPT_IMAGERY, keyword)
                .map(str::to_string)
                .unwrap_or_else(|| translate(keyword))
        })
        .collect()
}
