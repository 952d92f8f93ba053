//! # Tablature Rendering
//!
//! Renders a fingering as fixed-width ASCII tab, one line per string in
//! string order. The fret number sits at a column proportional to its depth
//! along the neck; an unplayed string gets an `x` marker at the nut.
//!
//! ```text
//! E4|0--------------
//! B3|1--------------
//! G3|0--------------
//! D3|-2-------------
//! A2|--3------------
//! E2|0--------------
//! ```

use crate::error::FretworkError;
use crate::fingering::Fingering;
use crate::fretboard::Fretboard;

/// Minimum line width, in columns, after the string-name gutter.
const MIN_WIDTH: usize = 15;

/// Render `fingering` against `fretboard`, labeling each line with the open
/// string's name. The fingering must have one slot per string.
pub fn render(fingering: &Fingering, fretboard: &Fretboard<'_>) -> Result<String, FretworkError> {
    if fingering.len() != fretboard.len() {
        return Err(FretworkError::configuration(format!(
            "fingering has {} slots but the fretboard has {} strings",
            fingering.len(),
            fretboard.len()
        )));
    }
    let labels: Vec<String> = fretboard
        .strings()
        .iter()
        .map(|tone| tone.full_name())
        .collect();
    let gutter = labels.iter().map(String::len).max().unwrap_or(0);

    // Wide enough for the deepest fret digit run.
    let width = fingering
        .frets()
        .iter()
        .flatten()
        .map(|f| *f as usize + f.to_string().len())
        .max()
        .unwrap_or(0)
        .max(MIN_WIDTH);

    let mut out = String::new();
    for (label, fret) in labels.iter().zip(fingering.frets()) {
        out.push_str(label);
        for _ in label.len()..gutter {
            out.push(' ');
        }
        out.push('|');
        out.push_str(&line(*fret, width));
        out.push('\n');
    }
    Ok(out)
}

/// One tab line: the fret number at column `fret` (or `fret - 1` for fretted
/// notes, hugging the nut side), `x` at the nut when unplayed.
fn line(fret: Option<u32>, width: usize) -> String {
    let mut line: Vec<char> = std::iter::repeat('-').take(width).collect();
    let (column, text) = match fret {
        None => (0, "x".to_string()),
        Some(0) => (0, "0".to_string()),
        Some(f) => (f as usize - 1, f.to_string()),
    };
    for (i, c) in text.chars().enumerate() {
        if column + i < line.len() {
            line[column + i] = c;
        }
    }
    line.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::ToneSystem;

    #[test]
    fn renders_one_line_per_string() {
        let system = ToneSystem::western();
        let board = Fretboard::standard_guitar(&system);
        let fingering = Fingering::new(vec![Some(0), Some(1), Some(0), Some(2), Some(3), None]);
        let tab = render(&fingering, &board).unwrap();
        let lines: Vec<&str> = tab.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "E4|0--------------");
        assert_eq!(lines[1], "B3|1--------------");
        assert_eq!(lines[3], "D3|-2-------------");
        assert_eq!(lines[4], "A2|--3------------");
        assert_eq!(lines[5], "E2|x--------------");
    }

    #[test]
    fn wide_frets_stretch_the_line() {
        let system = ToneSystem::western();
        let board = Fretboard::from_names(&system, &["E4"]).unwrap();
        let fingering = Fingering::new(vec![Some(17)]);
        let tab = render(&fingering, &board).unwrap();
        let line = tab.lines().next().unwrap();
        assert!(line.contains("17"));
        // Column 16 (fret depth minus one), after the "E4|" gutter.
        assert_eq!(line.find("17"), Some(3 + 16));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let system = ToneSystem::western();
        let board = Fretboard::standard_guitar(&system);
        let fingering = Fingering::new(vec![Some(0)]);
        assert!(render(&fingering, &board).is_err());
    }
}
