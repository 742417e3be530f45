//! Instrument table extraction.

use serde::Serialize;

/// One row of the instrument table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstrumentEntry {
    pub part: String,
    pub instrument: String,
    pub role: String,
}

fn is_header_row(line: &str) -> bool {
    line.contains('|') && (line.contains("パート") || line.contains("Part"))
}

fn is_separator_row(line: &str) -> bool {
    let line = line.trim();
    line.starts_with('|')
        && line.contains('-')
        && line.chars().all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

/// Extracts part/instrument/role rows from the table whose header row
/// mentions パート or Part.
///
/// Rows with fewer than three non-empty cells are skipped; the table ends
/// at the first line without a pipe.
pub fn instruments(text: &str) -> Vec<InstrumentEntry> {
    let mut entries = Vec::new();
    let mut in_table = false;
    let mut header_passed = false;

    for line in text.lines() {
        if !in_table {
            in_table = is_header_row(line);
            continue;
        }
        if !header_passed {
            header_passed = is_separator_row(line);
            if !header_passed {
                break;
            }
            continue;
        }
        if !line.contains('|') {
            break;
        }

        let cells: Vec<&str> = line
            .split('|')
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .collect();
        if let [part, instrument, role, ..] = cells.as_slice() {
            entries.push(InstrumentEntry {
                part: part.to_string(),
                instrument: instrument.to_string(),
                role: role.to_string(),
            });
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_japanese_table() {
        let text = "\
- **ジャンル**: J-Pop

| パート | 楽器 | 役割 |
|--------|------|------|
| メイン | ピアノ | 主旋律 |
| リズム | 打ち込みドラム | 疾走感 |
| | | |
| ベース | シンセベース | 低音 |

after";
        let rows = instruments(text);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].part, "メイン");
        assert_eq!(rows[1].instrument, "打ち込みドラム");
        assert_eq!(rows[2].role, "低音");
    }

    #[test]
    fn test_english_table_with_alignment() {
        let text = "| Part | Instrument | Role |\n|:---|:---:|---:|\n| Lead | Guitar | Hook |";
        let rows = instruments(text);
        assert_eq!(
            rows,
            vec![InstrumentEntry {
                part: "Lead".into(),
                instrument: "Guitar".into(),
                role: "Hook".into(),
            }]
        );
    }

    #[test]
    fn test_no_table() {
        assert!(instruments("- just bullets\n| a | b |").is_empty());
    }
}
