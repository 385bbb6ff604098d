//! Zebra-striped report table for genpdf.
//!
//! genpdf 0.2 can neither fill a rectangle nor set a stroke width, and its
//! `TableLayout` cannot paint cell backgrounds. [`ReportTable`] therefore draws
//! everything itself: row backgrounds are stacked strokes of the default line
//! width, rules are single strokes, and text is printed on top. The header row
//! is drawn again at the top of every page the table continues on.

use crate::report::theme::Palette;
use genpdf::error::Error;
use genpdf::render::Area;
use genpdf::style::{Color, Style};
use genpdf::{Context, Element, Mm, Position, RenderResult, Size};

/// Upper bound of wrapped lines per cell so a row always fits on a fresh page.
const MAX_CELL_LINES: usize = 6;
const CELL_PADDING_MM: f64 = 2.5;
/// Default PDF stroke width (1pt) in millimetres.
const STROKE_WIDTH_MM: f64 = 0.3528;
/// Distance between background strokes; below the stroke width so they overlap.
const FILL_PITCH_MM: f64 = 0.3;

/// One table line: its cells and how to paint them.
struct TableRow {
    cells: Vec<String>,
    text_style: Style,
    fill: Color,
}

/// A row wrapped to the current column width.
struct MeasuredRow {
    lines: Vec<Vec<String>>,
    column_width: Mm,
    padding: Mm,
    line_height: Mm,
    height: Mm,
}

impl TableRow {
    fn measure(&self, context: &Context, width: Mm) -> MeasuredRow {
        let columns = self.cells.len().max(1);
        let column_width = width / columns as f64;
        // Narrow columns get proportionally less padding.
        let padding = Mm::from(CELL_PADDING_MM.min(f64::from(column_width) / 4.0));
        let text_width = column_width - padding * 2.0;
        let line_height = self.text_style.line_height(&context.font_cache);

        let style = self.text_style;
        let lines: Vec<Vec<String>> = self
            .cells
            .iter()
            .map(|cell| {
                wrap_text(cell, text_width, MAX_CELL_LINES, |s| {
                    style.str_width(&context.font_cache, s)
                })
            })
            .collect();
        let count = lines.iter().map(Vec::len).max().unwrap_or(1).max(1);

        MeasuredRow {
            lines,
            column_width,
            padding,
            line_height,
            height: line_height * count as f64 + padding * 2.0,
        }
    }

    fn draw(
        &self,
        context: &Context,
        area: &Area<'_>,
        row: &MeasuredRow,
        rule: Color,
        full_grid: bool,
    ) -> Result<(), Error> {
        let width = area.size().width;

        for y in fill_offsets(f64::from(row.height)) {
            let y = Mm::from(y);
            area.draw_line(
                vec![Position::new(0, y), Position::new(width, y)],
                Style::new().with_color(self.fill),
            );
        }

        let rule_style = Style::new().with_color(rule);
        area.draw_line(
            vec![Position::new(0, row.height), Position::new(width, row.height)],
            rule_style,
        );
        if full_grid {
            area.draw_line(
                vec![Position::new(0, 0), Position::new(width, 0)],
                rule_style,
            );
            for column in 0..=row.lines.len() {
                let x = row.column_width * column as f64;
                area.draw_line(
                    vec![Position::new(x, 0), Position::new(x, row.height)],
                    rule_style,
                );
            }
        }

        for (column, cell_lines) in row.lines.iter().enumerate() {
            let x = row.column_width * column as f64 + row.padding;
            for (line_no, line) in cell_lines.iter().enumerate() {
                let y = row.padding + row.line_height * line_no as f64;
                area.print_str(
                    &context.font_cache,
                    Position::new(x, y),
                    self.text_style,
                    line,
                )?;
            }
        }
        Ok(())
    }
}

/// Vertical positions of the strokes that paint a background `height` mm tall.
///
/// Strokes are `STROKE_WIDTH_MM` wide and centred on their position, so the
/// first and last sit half a stroke inside the row.
fn fill_offsets(height: f64) -> Vec<f64> {
    let half = STROKE_WIDTH_MM / 2.0;
    if height <= STROKE_WIDTH_MM {
        return vec![height / 2.0];
    }
    let mut offsets = Vec::new();
    let mut y = half;
    while y < height - half {
        offsets.push(y);
        y += FILL_PITCH_MM;
    }
    offsets.push(height - half);
    offsets
}

/// The whole report table as one element.
///
/// Rows are rendered in order; when the page runs out the element reports
/// `has_more` and resumes from the next pending row on the following page,
/// starting with the header again.
pub struct ReportTable {
    header: TableRow,
    rows: Vec<TableRow>,
    rule: Color,
    full_grid: bool,
    next: usize,
    /// Pages this table has been drawn on so far.
    pages: usize,
}

impl ReportTable {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>, palette: &Palette) -> Self {
        let body_style = Style::new()
            .with_font_size(palette.body_size)
            .with_color(palette.body_text);
        Self {
            header: TableRow {
                cells: header,
                text_style: Style::new()
                    .bold()
                    .with_font_size(palette.header_size)
                    .with_color(palette.header_text),
                fill: palette.header_fill,
            },
            rows: rows
                .into_iter()
                .enumerate()
                .map(|(index, cells)| TableRow {
                    cells,
                    text_style: body_style,
                    fill: palette.stripes[index % 2],
                })
                .collect(),
            rule: palette.rule_color,
            full_grid: palette.full_grid,
            next: 0,
            pages: 0,
        }
    }
}

impl Element for ReportTable {
    fn render(
        &mut self,
        context: &Context,
        mut area: Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let width = area.size().width;

        let header = self.header.measure(context, width);
        let first_row = self
            .rows
            .get(self.next)
            .map(|row| row.measure(context, width).height)
            .unwrap_or_default();
        if header.height + first_row > area.size().height {
            // Header plus one row do not fit here; start over on the next page.
            result.has_more = true;
            return Ok(result);
        }

        self.pages += 1;
        if self.pages > 1 {
            log::debug!(
                "table continues on page {} at row {} of {}",
                self.pages,
                self.next + 1,
                self.rows.len()
            );
        }
        self.header
            .draw(context, &area, &header, self.rule, self.full_grid)?;
        area.add_offset(Position::new(0, header.height));
        result.size = result.size.stack_vertical(Size::new(width, header.height));

        while let Some(row) = self.rows.get(self.next) {
            let measured = row.measure(context, width);
            if measured.height > area.size().height {
                result.has_more = true;
                return Ok(result);
            }
            row.draw(context, &area, &measured, self.rule, self.full_grid)?;
            area.add_offset(Position::new(0, measured.height));
            result.size = result
                .size
                .stack_vertical(Size::new(width, measured.height));
            self.next += 1;
        }
        Ok(result)
    }
}

/// Greedy word wrap of `text` into lines no wider than `max_width`.
///
/// Words wider than a whole line are split between characters. When more than
/// `max_lines` lines would be needed the last kept line ends with `...`.
/// Always returns at least one (possibly empty) line.
pub fn wrap_text<F>(text: &str, max_width: Mm, max_lines: usize, measure: F) -> Vec<String>
where
    F: Fn(&str) -> Mm,
{
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if measure(&candidate) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for ch in word.chars() {
            current.push(ch);
            if current.chars().count() > 1 && measure(&current) > max_width {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(ch);
            }
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines.max(1) {
        lines.truncate(max_lines.max(1));
        if let Some(last) = lines.last_mut() {
            while !last.is_empty() && measure(&format!("{}...", last)) > max_width {
                last.pop();
            }
            last.push_str("...");
        }
    }
    lines
}
