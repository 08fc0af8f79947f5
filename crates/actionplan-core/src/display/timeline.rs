//! ASCII Gantt chart rendering.

use std::fmt;

use crate::{models::Status, timeline::Timeline};

const LABEL_WIDTH: usize = 28;

/// Renders a [`Timeline`] as a fenced text chart, one day per column.
///
/// ```text
/// Launch                       |#####     |
///   Design                     |###       |
///   Build                      |   ##     |
/// ```
pub struct GanttChart<'a>(pub &'a Timeline);

impl fmt::Display for GanttChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timeline = self.0;
        let Some(origin) = timeline.origin else {
            return writeln!(f, "Nothing in this action has dates yet.");
        };
        let width = usize::try_from(timeline.total_days).unwrap_or(0);

        writeln!(f, "Starting {origin}, {width} day(s)")?;
        writeln!(f)?;
        writeln!(f, "```text")?;
        for row in &timeline.rows {
            let label = format!("{}{}", "  ".repeat(row.kind.depth()), row.name);
            let label: String = label.chars().take(LABEL_WIDTH).collect();

            let mut cells = vec![' '; width];
            if let Some(bar) = row.bar {
                let fill = if row.status == Status::Completed {
                    '='
                } else {
                    '#'
                };
                let start = usize::try_from(bar.offset_days).unwrap_or(0);
                let span = usize::try_from(bar.span_days).unwrap_or(0);
                for cell in cells.iter_mut().skip(start).take(span) {
                    *cell = fill;
                }
            }
            let cells: String = cells.into_iter().collect();
            writeln!(f, "{label:<LABEL_WIDTH$} |{cells}|")?;
        }
        writeln!(f, "```")
    }
}
