//! Operator dialogue: highway and category selection on the console.
//!
//! The loops are written against `BufRead`/`Write` so they can be driven by
//! `Cursor` in tests. Invalid input re-prompts without limit; only the end
//! of the input stream terminates a loop early.

use std::io::{BufRead, Write};

use einsatz_common::model::{IncidentBundle, IncidentRecord};

/// Normalizes raw operator input to a highway identifier: the digits of the
/// input in original order, prefixed with "A". Everything else is stripped.
pub fn normalize_road(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("A{digits}")
}

/// Incident category the operator wants in the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    All,
    Roadworks,
    Warnings,
    Closures,
}

impl Category {
    /// `1`/`2`/`3` select a single category; every other number, negative
    /// ones included, means all. Non-numeric or empty input is rejected and
    /// must be re-prompted.
    pub fn parse(input: &str) -> Option<Category> {
        match input.trim().parse::<i64>().ok()? {
            1 => Some(Category::Roadworks),
            2 => Some(Category::Warnings),
            3 => Some(Category::Closures),
            _ => Some(Category::All),
        }
    }

    /// Splits a bundle into the three collections the prompt builder takes.
    /// Unselected categories become empty collections, never omitted.
    pub fn filter(
        self,
        bundle: IncidentBundle,
    ) -> (Vec<IncidentRecord>, Vec<IncidentRecord>, Vec<IncidentRecord>) {
        match self {
            Category::All => (bundle.roadworks, bundle.warnings, bundle.closures),
            Category::Roadworks => (bundle.roadworks, Vec::new(), Vec::new()),
            Category::Warnings => (Vec::new(), bundle.warnings, Vec::new()),
            Category::Closures => (Vec::new(), Vec::new(), bundle.closures),
        }
    }
}

fn read_line<R: BufRead>(reader: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn eof() -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "Eingabe beendet")
}

/// Prompts until the normalized input names a highway from the catalog.
pub fn select_road<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    roads: &[String],
) -> std::io::Result<String> {
    writeln!(writer, "Bitte geben Sie die Bezeichnung der gewünschten Autobahn ein (z.B. A8):")?;
    writeln!(writer, "{}.", roads.join(", "))?;
    loop {
        write!(writer, "Ihre Auswahl: ")?;
        writer.flush()?;
        let Some(line) = read_line(reader)? else {
            return Err(eof());
        };
        let road = normalize_road(&line);
        if roads.iter().any(|known| known == &road) {
            writeln!(writer, "Sie haben die Autobahn {road} ausgewählt.")?;
            return Ok(road);
        }
        writeln!(writer, "Ungültige Eingabe {road}. Bitte geben Sie eine Autobahn aus der Liste ein.")?;
    }
}

/// Prompts until the operator enters a number; 1/2/3 pick one category,
/// anything else numeric picks all.
pub fn select_category<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> std::io::Result<Category> {
    writeln!(writer, "Welche Kategorie soll berücksichtigt werden?")?;
    writeln!(writer, "0 = alle, 1 = Baustellen, 2 = Verkehrsmeldungen, 3 = Sperrungen")?;
    loop {
        write!(writer, "Ihre Auswahl: ")?;
        writer.flush()?;
        let Some(line) = read_line(reader)? else {
            return Err(eof());
        };
        match Category::parse(&line) {
            Some(category) => return Ok(category),
            None => {
                writeln!(writer, "Ungültige Eingabe. Bitte geben Sie eine Zahl ein.")?;
            }
        }
    }
}

/// Asks whether the generated text should be mailed. Only an explicit
/// "j"/"J" confirms; everything else (including EOF) declines.
pub fn confirm_send<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> std::io::Result<bool> {
    write!(writer, "Soll der Einsatzhinweis per E-Mail versendet werden? (j/n): ")?;
    writer.flush()?;
    let Some(line) = read_line(reader)? else {
        return Ok(false);
    };
    Ok(line.trim().eq_ignore_ascii_case("j"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn roads(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_road_strips_non_digits() {
        assert_eq!(normalize_road("8"), "A8");
        assert_eq!(normalize_road("a 8"), "A8");
        assert_eq!(normalize_road("A980"), "A980");
        assert_eq!(normalize_road("x9y8z0"), "A980");
        assert_eq!(normalize_road("keine Ziffern"), "A");
        assert_eq!(normalize_road(""), "A");
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("1"), Some(Category::Roadworks));
        assert_eq!(Category::parse("2"), Some(Category::Warnings));
        assert_eq!(Category::parse("3"), Some(Category::Closures));
        assert_eq!(Category::parse("0"), Some(Category::All));
        assert_eq!(Category::parse("7"), Some(Category::All));
        assert_eq!(Category::parse("-1"), Some(Category::All));
        assert_eq!(Category::parse(" 2 "), Some(Category::Warnings));
        assert_eq!(Category::parse(""), None);
        assert_eq!(Category::parse("abc"), None);
        assert_eq!(Category::parse("1a"), None);
    }

    #[test]
    fn test_category_filter_keeps_unselected_empty() {
        let bundle = IncidentBundle {
            roadworks: vec![IncidentRecord::default()],
            warnings: vec![IncidentRecord::default(), IncidentRecord::default()],
            closures: vec![IncidentRecord::default()],
        };

        let (r, w, c) = Category::Warnings.filter(bundle.clone());
        assert!(r.is_empty());
        assert_eq!(w.len(), 2);
        assert!(c.is_empty());

        let (r, w, c) = Category::All.filter(bundle);
        assert_eq!((r.len(), w.len(), c.len()), (1, 2, 1));
    }

    #[test]
    fn test_select_road_reprompts_until_known() {
        let mut input = Cursor::new("keine Ziffern\nA99\nx9y8z0\n");
        let mut output = Vec::new();
        let road = select_road(&mut input, &mut output, &roads(&["A8", "A980"])).unwrap();
        assert_eq!(road, "A980");

        let text = String::from_utf8(output).unwrap();
        // Two invalid attempts before the accepted one: "A" and "A99".
        assert_eq!(text.matches("Ungültige Eingabe").count(), 2);
        assert!(text.contains("Sie haben die Autobahn A980 ausgewählt."));
    }

    #[test]
    fn test_select_road_eof_is_an_error() {
        let mut input = Cursor::new("unbekannt\n");
        let mut output = Vec::new();
        let err = select_road(&mut input, &mut output, &roads(&["A8"])).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_select_category_reprompts_on_non_numeric() {
        let mut input = Cursor::new("abc\n\n3\n");
        let mut output = Vec::new();
        let category = select_category(&mut input, &mut output).unwrap();
        assert_eq!(category, Category::Closures);

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Ungültige Eingabe").count(), 2);
    }

    #[test]
    fn test_confirm_send() {
        let mut output = Vec::new();
        assert!(confirm_send(&mut Cursor::new("j\n"), &mut output).unwrap());
        assert!(confirm_send(&mut Cursor::new("J\n"), &mut output).unwrap());
        assert!(!confirm_send(&mut Cursor::new("n\n"), &mut output).unwrap());
        assert!(!confirm_send(&mut Cursor::new("ja bitte\n"), &mut output).unwrap());
        assert!(!confirm_send(&mut Cursor::new(""), &mut output).unwrap());
    }
}
