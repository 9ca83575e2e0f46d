//! Payslip page layout.
//!
//! The page is described as a flat list of drawing elements in PDF points
//! (origin bottom-left, US letter). Building the layout touches no I/O, so
//! the same payslip always yields the same elements.

use crate::calculation::format_currency;
use crate::config::ReportSettings;
use crate::models::Payslip;

/// US letter width in points.
pub const PAGE_WIDTH: f32 = 612.0;
/// US letter height in points.
pub const PAGE_HEIGHT: f32 = 792.0;

const TABLE_X: f32 = 60.0;
const TABLE_BOTTOM: f32 = PAGE_HEIGHT - 350.0;
const DESCRIPTION_WIDTH: f32 = 200.0;
const AMOUNT_WIDTH: f32 = 300.0;
const HEADER_ROW_HEIGHT: f32 = 28.0;
const BODY_ROW_HEIGHT: f32 = 20.0;
const CELL_PADDING: f32 = 6.0;

/// An RGB fill or stroke color, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
}

impl Rgb {
    /// Header band and table header fill.
    pub const BLUE: Rgb = Rgb { r: 0.0, g: 0.0, b: 1.0 };
    /// Text on blue.
    pub const WHITE: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };
    /// Body text.
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };
    /// Table grid.
    pub const GREY: Rgb = Rgb { r: 0.5, g: 0.5, b: 0.5 };
    /// Footer band fill.
    pub const WHITESMOKE: Rgb = Rgb { r: 0.96, g: 0.96, b: 0.96 };
}

/// Font face of a text element. Both are Helvetica.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    /// Helvetica.
    Regular,
    /// Helvetica-Bold.
    Bold,
}

/// A single drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A filled rectangle anchored at its lower-left corner.
    Band {
        /// Left edge.
        x: f32,
        /// Bottom edge.
        y: f32,
        /// Width.
        width: f32,
        /// Height.
        height: f32,
        /// Fill color.
        color: Rgb,
    },
    /// A line of text with its baseline starting at `(x, y)`.
    Text {
        /// Left edge of the first glyph.
        x: f32,
        /// Baseline.
        y: f32,
        /// Content.
        text: String,
        /// Size in points.
        size: f32,
        /// Face.
        face: FontFace,
        /// Fill color.
        color: Rgb,
    },
    /// A straight stroked line.
    Rule {
        /// Start point.
        from: (f32, f32),
        /// End point.
        to: (f32, f32),
        /// Stroke thickness in points.
        thickness: f32,
        /// Stroke color.
        color: Rgb,
    },
}

/// The complete, ordered drawing list for one payslip page.
#[derive(Debug, Clone, PartialEq)]
pub struct PayslipLayout {
    /// Document title stored in the PDF metadata.
    pub title: String,
    /// Elements in paint order.
    pub elements: Vec<Element>,
}

impl PayslipLayout {
    /// Lays out the payslip page.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use payslip_mailer::calculation::compute_payslip;
    /// use payslip_mailer::config::ReportSettings;
    /// use payslip_mailer::models::EmployeeRecord;
    /// use payslip_mailer::render::PayslipLayout;
    /// use rust_decimal::Decimal;
    ///
    /// let record = EmployeeRecord {
    ///     employee_id: "E001".to_string(),
    ///     name: "Jane Doe".to_string(),
    ///     email: "jane@example.com".to_string(),
    ///     basic_salary: Decimal::new(500000, 2),
    ///     allowances: Decimal::new(25000, 2),
    ///     deductions: Decimal::new(12050, 2),
    /// };
    /// let settings = ReportSettings::with_date(NaiveDate::from_ymd_opt(2025, 4, 10).unwrap());
    ///
    /// let layout = PayslipLayout::build(&compute_payslip(&record)?, &settings);
    /// assert!(layout.texts().any(|t| t == "$5,129.50"));
    /// # Ok::<(), payslip_mailer::error::PayslipError>(())
    /// ```
    pub fn build(payslip: &Payslip, settings: &ReportSettings) -> Self {
        let record = &payslip.record;
        let mut elements = Vec::new();

        // Header band
        elements.push(Element::Band {
            x: 0.0,
            y: PAGE_HEIGHT - 70.0,
            width: PAGE_WIDTH,
            height: 70.0,
            color: Rgb::BLUE,
        });
        elements.push(text(
            200.0,
            PAGE_HEIGHT - 50.0,
            &settings.organization,
            20.0,
            FontFace::Bold,
            Rgb::WHITE,
        ));

        // Information line
        elements.push(body(
            50.0,
            PAGE_HEIGHT - 120.0,
            &format!("Employee ID : {}", record.employee_id),
        ));
        elements.push(body(
            400.0,
            PAGE_HEIGHT - 120.0,
            &format!("Date: {}", settings.display_date()),
        ));

        // Billed-to block
        elements.push(text(
            60.0,
            PAGE_HEIGHT - 160.0,
            "BILLED TO:",
            12.0,
            FontFace::Bold,
            Rgb::BLACK,
        ));
        elements.push(body(60.0, PAGE_HEIGHT - 180.0, &record.name));
        elements.push(body(
            60.0,
            PAGE_HEIGHT - 200.0,
            &format!("Email: {}", record.email),
        ));

        let symbol = &settings.currency_symbol;
        let rows = [
            ("Basic Salary", format_currency(record.basic_salary, symbol)),
            ("Allowances", format_currency(record.allowances, symbol)),
            ("Deductions", format_currency(record.deductions, symbol)),
            ("Net Salary", format_currency(payslip.net_salary, symbol)),
        ];
        let amount_header = format!("AMOUNT ({})", settings.currency_code);
        layout_table(&mut elements, &amount_header, &rows);

        // Footer band
        elements.push(Element::Band {
            x: 0.0,
            y: 0.0,
            width: PAGE_WIDTH,
            height: 50.0,
            color: Rgb::WHITESMOKE,
        });
        elements.push(text(
            50.0,
            20.0,
            &settings.footer_message,
            10.0,
            FontFace::Regular,
            Rgb::BLACK,
        ));

        Self {
            title: format!("Payslip {}", record.employee_id),
            elements,
        }
    }

    /// Iterates over the text content of the page, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|element| match element {
            Element::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

fn layout_table(elements: &mut Vec<Element>, amount_header: &str, rows: &[(&str, String)]) {
    let width = DESCRIPTION_WIDTH + AMOUNT_WIDTH;
    let top = TABLE_BOTTOM + HEADER_ROW_HEIGHT + BODY_ROW_HEIGHT * rows.len() as f32;
    let header_bottom = top - HEADER_ROW_HEIGHT;
    let amount_x = TABLE_X + DESCRIPTION_WIDTH;

    elements.push(Element::Band {
        x: TABLE_X,
        y: header_bottom,
        width,
        height: HEADER_ROW_HEIGHT,
        color: Rgb::BLUE,
    });
    // Header text sits on the extra bottom padding of the header row.
    let header_baseline = header_bottom + 12.0;
    for (x, label) in [(TABLE_X, "DESCRIPTION"), (amount_x, amount_header)] {
        elements.push(text(
            x + CELL_PADDING,
            header_baseline,
            label,
            10.0,
            FontFace::Bold,
            Rgb::WHITE,
        ));
    }

    for (i, (label, amount)) in rows.iter().enumerate() {
        let row_bottom = header_bottom - BODY_ROW_HEIGHT * (i + 1) as f32;
        let baseline = row_bottom + CELL_PADDING;
        elements.push(text(
            TABLE_X + CELL_PADDING,
            baseline,
            label,
            10.0,
            FontFace::Regular,
            Rgb::BLACK,
        ));
        let amount_left = amount_x + (AMOUNT_WIDTH - text_width(amount, 10.0)) / 2.0;
        elements.push(text(
            amount_left,
            baseline,
            amount,
            10.0,
            FontFace::Regular,
            Rgb::BLACK,
        ));
    }

    // Grid
    let mut boundaries = vec![top, header_bottom];
    boundaries.extend((1..=rows.len()).map(|i| header_bottom - BODY_ROW_HEIGHT * i as f32));
    for y in boundaries {
        elements.push(grid_line((TABLE_X, y), (TABLE_X + width, y)));
    }
    for x in [TABLE_X, amount_x, TABLE_X + width] {
        elements.push(grid_line((x, TABLE_BOTTOM), (x, top)));
    }
}

fn text(x: f32, y: f32, content: &str, size: f32, face: FontFace, color: Rgb) -> Element {
    Element::Text {
        x,
        y,
        text: content.to_string(),
        size,
        face,
        color,
    }
}

fn body(x: f32, y: f32, content: &str) -> Element {
    text(x, y, content, 12.0, FontFace::Regular, Rgb::BLACK)
}

fn grid_line(from: (f32, f32), to: (f32, f32)) -> Element {
    Element::Rule {
        from,
        to,
        thickness: 0.5,
        color: Rgb::GREY,
    }
}

/// Approximate Helvetica advance width of `content` in points.
///
/// Exact for digits and currency punctuation, which is all an amount holds.
pub fn text_width(content: &str, size: f32) -> f32 {
    let units: u32 = content
        .chars()
        .map(|ch| match ch {
            ',' | '.' | ' ' => 278,
            '-' => 333,
            _ => 556,
        })
        .sum();
    units as f32 * size / 1000.0
}
