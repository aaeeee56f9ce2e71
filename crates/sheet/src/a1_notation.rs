use crate::error::{Result, SheetError};

/// Parse A1-style cell notation (e.g., "A1", "Z99", "AA1")
/// Returns (row, column) as 0-based indices
pub fn parse_a1(notation: &str) -> Result<(usize, usize)> {
    let upper = notation.trim().to_uppercase();
    let split_pos = upper
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| SheetError::InvalidCellNotation(notation.to_string()))?;

    let (col_part, row_part) = upper.split_at(split_pos);
    let col = parse_column(col_part)?;
    let row = row_part
        .parse::<usize>()
        .map_err(|_| SheetError::InvalidCellNotation(notation.to_string()))?;

    // Rows are 1-based in notation
    if row == 0 {
        return Err(SheetError::InvalidCellNotation(notation.to_string()));
    }

    Ok((row - 1, col))
}

/// Convert column letters to a 0-based column index (case-insensitive).
/// A=0, B=1, ... Z=25, AA=26, AB=27, ...
pub fn parse_column(letters: &str) -> Result<usize> {
    let letters = letters.trim();
    if letters.is_empty() {
        return Err(SheetError::InvalidCellNotation(letters.to_string()));
    }

    let mut col = 0usize;
    for b in letters.bytes() {
        if !b.is_ascii_alphabetic() {
            return Err(SheetError::InvalidCellNotation(letters.to_string()));
        }
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add(usize::from(b.to_ascii_uppercase() - b'A') + 1))
            .ok_or_else(|| SheetError::InvalidCellNotation(letters.to_string()))?;
    }

    Ok(col - 1)
}

/// Parse a whole-column range such as "A:A", "B:D" or a bare "C".
/// Returns the (start, end) 0-based column indices, ordered.
pub fn parse_column_range(notation: &str) -> Result<(usize, usize)> {
    match notation.split_once(':') {
        Some((start, end)) => {
            let start = parse_column(start)?;
            let end = parse_column(end)?;
            Ok((start.min(end), start.max(end)))
        }
        None => {
            let col = parse_column(notation)?;
            Ok((col, col))
        }
    }
}

/// Convert 0-based column index to column letters
/// 0=A, 1=B, ... 25=Z, 26=AA, 27=AB, ...
pub fn column_index_to_letters(mut col: usize) -> String {
    let mut result = String::new();
    col += 1;

    while col > 0 {
        col -= 1;
        result.insert(0, ((col % 26) as u8 + b'A') as char);
        col /= 26;
    }

    result
}

/// Convert (row, col) to A1 notation
/// (0, 0) = "A1", (0, 1) = "B1", etc.
pub fn to_a1_notation(row: usize, col: usize) -> String {
    format!("{}{}", column_index_to_letters(col), row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_a1() {
        assert_eq!(parse_a1("A1").unwrap(), (0, 0));
        assert_eq!(parse_a1("C2").unwrap(), (1, 2));
        assert_eq!(parse_a1("AA1").unwrap(), (0, 26));
        assert_eq!(parse_a1("f10").unwrap(), (9, 5));
    }

    #[test]
    fn test_parse_a1_errors() {
        assert!(parse_a1("").is_err());
        assert!(parse_a1("A").is_err());
        assert!(parse_a1("1").is_err());
        assert!(parse_a1("A0").is_err());
    }

    #[test]
    fn test_parse_column_range() {
        assert_eq!(parse_column_range("A:A").unwrap(), (0, 0));
        assert_eq!(parse_column_range("D:B").unwrap(), (1, 3));
        assert_eq!(parse_column_range("f").unwrap(), (5, 5));
        assert!(parse_column_range("A1:A").is_err());
        assert!(parse_column_range(":").is_err());
    }

    #[test]
    fn test_column_letters_roundtrip() {
        assert_eq!(column_index_to_letters(0), "A");
        assert_eq!(column_index_to_letters(25), "Z");
        assert_eq!(column_index_to_letters(26), "AA");
        assert_eq!(column_index_to_letters(702), "AAA");
        for col in 0..200 {
            assert_eq!(parse_column(&column_index_to_letters(col)).unwrap(), col);
        }
        assert_eq!(to_a1_notation(99, 25), "Z100");
    }

    #[test]
    fn test_parse_column_overflow() {
        let result = parse_column("ZZZZZZZZZZZZZZZZZZZZ");
        assert!(matches!(result, Err(SheetError::InvalidCellNotation(_))));
        assert!(parse_column_range("A:ZZZZZZZZZZZZZZZZZZZZ").is_err());
    }
}
