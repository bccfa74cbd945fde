//! Key/value extraction from footer tables

use crate::parser::parse_key_values;
use crate::types::MetadataMap;

/// Merge the key/value pairs of every cell in `rows`.
///
/// Cells are visited row by row, left to right. Each non-blank cell is parsed
/// on its own with [`parse_key_values`], so a two-column `Key | Value` table
/// only contributes when a cell itself holds `key: value` text. Later cells
/// overwrite earlier keys.
///
/// # Examples
///
/// ```rust
/// use docfoot_core::flatten_rows;
///
/// let rows = vec![vec!["Key: X", ""], vec!["Owner: Ops", "Rev: 4"]];
/// let map = flatten_rows(&rows);
/// assert_eq!(map.len(), 3);
/// assert_eq!(map["Key"], "X");
/// ```
#[must_use = "returns the merged key/value pairs"]
pub fn flatten_rows<R, C>(rows: &[R]) -> MetadataMap
where
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let mut map = MetadataMap::new();
    for row in rows {
        for cell in row.as_ref() {
            let text = cell.as_ref();
            if !text.trim().is_empty() {
                map.extend(parse_key_values(text));
            }
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cell_skipped() {
        let rows = vec![vec!["Key: X", ""]];
        let map = flatten_rows(&rows);
        assert_eq!(map.len(), 1);
        assert_eq!(map["Key"], "X");
    }

    #[test]
    fn test_whitespace_cells_skipped() {
        let rows = vec![vec!["  ", "\n\t"]];
        assert!(flatten_rows(&rows).is_empty());
    }

    #[test]
    fn test_multiline_cell() {
        let rows = vec![vec!["Author: Jane\nDept: R&D".to_string()]];
        let map = flatten_rows(&rows);
        assert_eq!(map["Author"], "Jane");
        assert_eq!(map["Dept"], "R&D");
    }

    #[test]
    fn test_key_value_columns_without_colon() {
        // Plain "Key" | "Value" cells carry no delimiter
        let rows = vec![vec!["Author", "Jane"]];
        assert!(flatten_rows(&rows).is_empty());
    }

    #[test]
    fn test_row_then_column_order() {
        let rows = vec![
            vec!["Status: draft", "Status: review"],
            vec!["Status: final"],
        ];
        let map = flatten_rows(&rows);
        assert_eq!(map["Status"], "final");

        let rows = vec![vec!["Status: draft", "Status: review"]];
        assert_eq!(flatten_rows(&rows)["Status"], "review");
    }

    #[test]
    fn test_no_rows() {
        let rows: Vec<Vec<String>> = Vec::new();
        assert!(flatten_rows(&rows).is_empty());
    }
}
