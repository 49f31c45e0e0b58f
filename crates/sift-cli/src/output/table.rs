#[derive(Clone, Copy, Debug, Default)]
pub struct TableOptions {
    pub max_width: Option<usize>,
}

impl TableOptions {
    /// Width limit from `COLUMNS`, when the shell exports it.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            max_width: std::env::var("COLUMNS")
                .ok()
                .and_then(|value| value.trim().parse().ok())
                .filter(|width: &usize| *width > 0),
        }
    }
}

/// Render an aligned table of string cells. Numbers are right-aligned.
#[must_use]
pub fn render_aligned(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
                .max(MIN_WIDTH)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| pad(&truncate_text(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(SEPARATOR);

    let divider = "-".repeat(header_line.chars().count());

    let row_lines = rows.iter().map(|row| {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let truncated = truncate_text(value, *width);
                pad(&truncated, *width, looks_numeric(&truncated))
            })
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    });

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line);
    lines.push(divider);
    lines.extend(row_lines);
    lines.join("\n")
}

const MIN_WIDTH: usize = 6;
const SEPARATOR: &str = "  ";

fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * SEPARATOR.len();
    let mut total = widths.iter().sum::<usize>() + separators;

    while total > max_width {
        // Shrink the widest column that is still above its floor.
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > headers[*idx].chars().count().max(MIN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);

        let Some(idx) = candidate else {
            break;
        };
        widths[idx] -= 1;
        total -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().is_ok()
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Vec<String>> {
        vec![
            vec!["age".into(), "34".into(), "0.125".into()],
            vec!["cohort_label".into(), "-".into(), "12.5".into()],
        ]
    }

    #[test]
    fn columns_align_and_numbers_right_align() {
        let out = render_aligned(&["column", "n", "mean"], &rows(), TableOptions::default());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("column"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2].chars().count(), lines[3].chars().count());
        assert!(lines[2].ends_with(" 0.125"));
        assert!(lines[3].ends_with("  12.5"));
    }

    #[test]
    fn max_width_truncates_widest_column() {
        let out = render_aligned(
            &["column", "n", "mean"],
            &rows(),
            TableOptions { max_width: Some(24) },
        );
        assert!(out.lines().all(|line| line.chars().count() <= 24));
        assert!(out.contains('…'));
    }

    #[test]
    fn short_rows_are_dashed() {
        let out = render_aligned(&["a", "b"], &[vec!["x".into()]], TableOptions::default());
        assert!(out.lines().nth(2).is_some_and(|line| line.trim_end().ends_with('-')));
    }
}
