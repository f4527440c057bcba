use std::ops::Range;

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};

use super::currency::{format_amount, whole};
use super::Report;

// ---------------------------------------------------------------------------
// Page geometry (A4, millimetres measured from the top edge)
// ---------------------------------------------------------------------------

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_X: f32 = 14.0;
const MARGIN_TOP: f32 = 15.0;
const MARGIN_BOTTOM: f32 = 15.0;

/// Where the schedule grid starts on the first page, below the header block.
const FIRST_TABLE_TOP: f32 = 60.0;
const ROW_HEIGHT: f32 = 7.0;
const CELL_PADDING: f32 = 2.0;
const TABLE_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN_X;

const TITLE_SIZE: f32 = 18.0;
const BODY_SIZE: f32 = 10.0;

/// Builtin PDF fonts only cover WinAnsi, which has no rupee glyph.
const CURRENCY: &str = "INR ";

const COLUMNS: [&str; 5] = ["Month", "EMI", "Principal", "Interest", "Balance"];

fn accent() -> Color {
    Color::Rgb(Rgb::new(79.0 / 255.0, 70.0 / 255.0, 229.0 / 255.0, None))
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn grid_gray() -> Color {
    Color::Rgb(Rgb::new(0.75, 0.75, 0.75, None))
}

/// Body rows that fit below `top` once the repeated header row is drawn.
fn rows_below(top: f32) -> usize {
    let slots = ((PAGE_HEIGHT - top - MARGIN_BOTTOM) / ROW_HEIGHT).floor() as usize;
    slots.saturating_sub(1)
}

/// Split `total` schedule rows into per-page ranges. The first page always
/// exists, even for an empty schedule, so the header block has a home.
fn page_ranges(total: usize) -> Vec<Range<usize>> {
    let mut pages = Vec::new();
    let mut start = 0;
    let mut capacity = rows_below(FIRST_TABLE_TOP);

    loop {
        let end = (start + capacity).min(total);
        pages.push(start..end);
        if end == total {
            return pages;
        }
        start = end;
        capacity = rows_below(MARGIN_TOP);
    }
}

/// printpdf measures from the bottom edge.
fn from_top(y: f32) -> Mm {
    Mm(PAGE_HEIGHT - y)
}

fn rule(layer: &PdfLayerReference, y: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN_X), from_top(y)), false),
            (Point::new(Mm(MARGIN_X + TABLE_WIDTH), from_top(y)), false),
        ],
        is_closed: false,
    });
}

fn draw_row(layer: &PdfLayerReference, font: &IndirectFontRef, top: f32, cells: &[String]) {
    let column_width = TABLE_WIDTH / cells.len() as f32;
    let baseline = top + ROW_HEIGHT - CELL_PADDING;
    for (i, cell) in cells.iter().enumerate() {
        let x = MARGIN_X + i as f32 * column_width + CELL_PADDING;
        layer.use_text(cell.as_str(), BODY_SIZE, Mm(x), from_top(baseline), font);
    }
    rule(layer, top + ROW_HEIGHT);
}

/// Draw one page of the grid starting at `top`: header row, then `rows`.
fn draw_table(
    layer: &PdfLayerReference,
    fonts: (&IndirectFontRef, &IndirectFontRef),
    top: f32,
    rows: &[Vec<String>],
) {
    let (regular, bold) = fonts;
    layer.set_outline_color(grid_gray());
    layer.set_outline_thickness(0.3);
    layer.set_fill_color(black());

    rule(layer, top);
    let header: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    draw_row(layer, bold, top, &header);

    let mut y = top + ROW_HEIGHT;
    for row in rows {
        draw_row(layer, regular, y, row);
        y += ROW_HEIGHT;
    }

    // column separators, outer edges included
    let column_width = TABLE_WIDTH / COLUMNS.len() as f32;
    for i in 0..=COLUMNS.len() {
        let x = MARGIN_X + i as f32 * column_width;
        layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x), from_top(top)), false),
                (Point::new(Mm(x), from_top(y)), false),
            ],
            is_closed: false,
        });
    }
}

/// PDF report: title, four loan fields and a paginated schedule grid with
/// whole-number cells.
pub fn render(report: &Report<'_>) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let summary = &report.output.summary;
    let tenure = &report.output.tenure;

    let (doc, page, layer) =
        PdfDocument::new("EMI Report", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let first = doc.get_page(page).get_layer(layer);
    first.set_fill_color(accent());
    first.use_text("EMI Report", TITLE_SIZE, Mm(MARGIN_X), from_top(20.0), &regular);

    first.set_fill_color(black());
    let fields = [
        format!("Loan Amount: {}", format_amount(summary.principal, CURRENCY)),
        format!("Interest Rate: {}", report.rate_label()),
        format!("Tenure: {} Years {} Months", tenure.years, tenure.months),
        format!("Monthly EMI: {}", format_amount(summary.payment, CURRENCY)),
    ];
    for (i, field) in fields.iter().enumerate() {
        let y = 30.0 + 6.0 * i as f32;
        first.use_text(field.as_str(), BODY_SIZE, Mm(MARGIN_X), from_top(y), &regular);
    }

    let rows: Vec<Vec<String>> = report
        .output
        .schedule
        .iter()
        .map(|entry| {
            vec![
                entry.period.to_string(),
                whole(entry.payment),
                whole(entry.principal_component),
                whole(entry.interest_component),
                whole(entry.remaining_balance),
            ]
        })
        .collect();

    for (i, range) in page_ranges(rows.len()).into_iter().enumerate() {
        let (layer, top) = if i == 0 {
            (first.clone(), FIRST_TABLE_TOP)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            (doc.get_page(page).get_layer(layer), MARGIN_TOP)
        };
        draw_table(&layer, (&regular, &bold), top, &rows[range]);
    }

    Ok(doc.save_to_bytes()?)
}
