//! Numeric table parsing and rendering

use crate::config::OutputFormat;
use ndarray::Array2;
use thiserror::Error;

/// Errors reading the input table
#[derive(Debug, Error)]
pub enum InputError {
    /// Token that does not parse as a number
    #[error("line {line}: '{token}' is not a number")]
    InvalidNumber { line: usize, token: String },

    /// Row length differs from the first row
    #[error("line {line} has {found} values, expected {expected}")]
    RaggedRow {
        line: usize,
        found: usize,
        expected: usize,
    },

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

/// Parse one row per non-empty line, values separated by whitespace or commas
///
/// Lines starting with `#` are comments. Returns a `rows x cols` table, or a
/// `0 x 0` table when there is no data.
pub fn parse_table(text: &str) -> Result<Array2<f64>, InputError> {
    let mut values = Vec::new();
    let mut cols = None;
    let mut rows = 0;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let before = values.len();
        for token in line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
        {
            let value = token.parse::<f64>().map_err(|_| InputError::InvalidNumber {
                line: line_no,
                token: token.to_string(),
            })?;
            values.push(value);
        }

        let found = values.len() - before;
        match cols {
            None => cols = Some(found),
            Some(expected) if expected != found => {
                return Err(InputError::RaggedRow {
                    line: line_no,
                    found,
                    expected,
                })
            }
            Some(_) => {}
        }
        rows += 1;
    }

    Ok(Array2::from_shape_vec((rows, cols.unwrap_or(0)), values)?)
}

/// Render a filtered table in the requested format
pub fn render(table: &Array2<f64>, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Lines => {
            let mut out = String::new();
            for row in table.rows() {
                let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
                out.push_str(&line.join(" "));
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let (rows, cols) = table.dim();
            let mut out = if rows == 1 || cols == 1 {
                serde_json::to_string(&table.iter().copied().collect::<Vec<f64>>())?
            } else {
                let nested: Vec<Vec<f64>> = table.rows().into_iter().map(|row| row.to_vec()).collect();
                serde_json::to_string(&nested)?
            };
            out.push('\n');
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_parse_column() {
        let table = parse_table("1\n2.5\n\n-3\n").unwrap();
        assert_eq!(table, arr2(&[[1.0], [2.5], [-3.0]]));
    }

    #[test]
    fn test_parse_mixed_separators_and_comments() {
        let table = parse_table("# header\n1, 2 3\n4\t5,6\n").unwrap();
        assert_eq!(table, arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]));
    }

    #[test]
    fn test_parse_empty() {
        let table = parse_table("\n# nothing\n").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_parse_bad_token() {
        let err = parse_table("1 2\n3 x\n").unwrap_err();
        assert!(matches!(err, InputError::InvalidNumber { line: 2, ref token } if token == "x"));
    }

    #[test]
    fn test_parse_ragged() {
        let err = parse_table("1 2\n3\n").unwrap_err();
        assert!(matches!(
            err,
            InputError::RaggedRow {
                line: 2,
                found: 1,
                expected: 2
            }
        ));
    }

    #[test]
    fn test_render_lines() {
        let out = render(&arr2(&[[1.0, 2.5], [3.0, 4.0]]), OutputFormat::Lines).unwrap();
        assert_eq!(out, "1 2.5\n3 4\n");
    }

    #[test]
    fn test_render_json() {
        let column = render(&arr2(&[[1.0], [1.5]]), OutputFormat::Json).unwrap();
        assert_eq!(column, "[1.0,1.5]\n");

        let grid = render(&arr2(&[[1.0, 2.0], [3.0, 4.0]]), OutputFormat::Json).unwrap();
        assert_eq!(grid, "[[1.0,2.0],[3.0,4.0]]\n");
    }
}
