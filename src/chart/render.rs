use super::OccurrencePoint;

const MARKER: char = 'o';
const LINE: char = '.';
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Smallest plot area that still shows both ends of the series.
pub const MIN_WIDTH: usize = 2;
pub const MIN_HEIGHT: usize = 2;
/// Largest plot area, wider than any terminal.
pub const MAX_WIDTH: usize = 500;
pub const MAX_HEIGHT: usize = 200;

/// Draws a line-and-marker plot of occurrences over time. X is time, from the first to the last
/// occurrence, Y is the occurrence count. `width` and `height` are the size of the plot area in
/// characters and are clamped to [MIN_WIDTH]..=[MAX_WIDTH] and [MIN_HEIGHT]..=[MAX_HEIGHT].
pub fn render_chart(
    title: &str,
    points: &[OccurrencePoint],
    width: usize,
    height: usize,
) -> String {
    let width = width.clamp(MIN_WIDTH, MAX_WIDTH);
    let height = height.clamp(MIN_HEIGHT, MAX_HEIGHT);
    let (Some(first), Some(last)) = (
        points.iter().map(|v| v.moment).min(),
        points.iter().map(|v| v.moment).max(),
    ) else {
        return format!("{title}\n(no records)\n");
    };
    let max_rank = points.iter().map(|v| v.rank).max().unwrap_or(1);

    let span = (last - first).num_seconds() as f64;
    let cells = points
        .iter()
        .map(|point| {
            let column = if span > 0. {
                (point.moment - first).num_seconds() as f64 / span * (width - 1) as f64
            } else {
                0.
            };
            let row = if max_rank > 1 {
                (point.rank - 1) as f64 / (max_rank - 1) as f64 * (height - 1) as f64
            } else {
                0.
            };
            (column.round() as usize, row.round() as usize)
        })
        .collect::<Vec<_>>();

    // Row 0 is the bottom of the plot.
    let mut grid = vec![vec![' '; width]; height];
    for pair in cells.windows(2) {
        draw_segment(&mut grid, pair[0], pair[1]);
    }
    for &(column, row) in &cells {
        grid[row][column] = MARKER;
    }

    let label_width = max_rank.to_string().len();
    let mut output = String::new();
    output.push_str(title);
    output.push('\n');
    for (row, line) in grid.iter().enumerate().rev() {
        let label = if row == height - 1 && max_rank > 1 {
            max_rank.to_string()
        } else if row == 0 {
            "1".to_string()
        } else {
            String::new()
        };
        let line = line.iter().collect::<String>();
        output.push_str(format!("{label:>label_width$} │{line}").trim_end());
        output.push('\n');
    }
    output.push_str(&format!(
        "{:>label_width$} └{}\n",
        "",
        "─".repeat(width)
    ));

    let start = first.format(DATE_FORMAT).to_string();
    let end = last.format(DATE_FORMAT).to_string();
    let padding = " ".repeat(label_width + 2);
    if start == end {
        output.push_str(&format!("{padding}{start}\n"));
    } else {
        let gap = width.saturating_sub(start.len() + end.len()).max(1);
        output.push_str(&format!("{padding}{start}{}{end}\n", " ".repeat(gap)));
    }
    output
}

/// Connects two cells with [LINE] characters, leaving already drawn cells alone.
fn draw_segment(grid: &mut [Vec<char>], from: (usize, usize), to: (usize, usize)) {
    let (c0, r0) = (from.0 as f64, from.1 as f64);
    let (c1, r1) = (to.0 as f64, to.1 as f64);
    let steps = usize::max(from.0.abs_diff(to.0), from.1.abs_diff(to.1));
    for step in 0..=steps {
        let t = if steps == 0 { 0. } else { step as f64 / steps as f64 };
        let column = (c0 + (c1 - c0) * t).round() as usize;
        let row = (r0 + (r1 - r0) * t).round() as usize;
        let cell = &mut grid[row][column];
        if *cell == ' ' {
            *cell = LINE;
        }
    }
}
