//! PDF output for a [`PayslipLayout`].

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Pt, Rect,
};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::layout::{Element, FontFace, PAGE_HEIGHT, PAGE_WIDTH, PayslipLayout, Rgb};

/// Writes `layout` as a single-page PDF to `target`.
///
/// The document is saved to a temporary file beside `target` and renamed
/// over it only once fully written, so a failed save never leaves a
/// truncated file under the final name.
pub fn write_pdf(layout: &PayslipLayout, target: &Path) -> Result<(), String> {
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let (doc, page, layer) = PdfDocument::new(
        layout.title.as_str(),
        mm(PAGE_WIDTH),
        mm(PAGE_HEIGHT),
        "Payslip",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| e.to_string())?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| e.to_string())?;
    let canvas = doc.get_page(page).get_layer(layer);

    for element in &layout.elements {
        draw(&canvas, element, &regular, &bold);
    }

    let mut staging = tempfile::Builder::new()
        .prefix(".payslip-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| format!("cannot create file in {}: {}", dir.display(), e))?;
    {
        let mut writer = BufWriter::new(staging.as_file_mut());
        doc.save(&mut writer).map_err(|e| e.to_string())?;
        writer.flush().map_err(|e| e.to_string())?;
    }
    staging
        .persist(target)
        .map_err(|e| format!("cannot write {}: {}", target.display(), e.error))?;

    Ok(())
}

fn draw(
    canvas: &PdfLayerReference,
    element: &Element,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    match element {
        Element::Band {
            x,
            y,
            width,
            height,
            color,
        } => {
            canvas.set_fill_color(pdf_color(*color));
            canvas.add_rect(
                Rect::new(mm(*x), mm(*y), mm(x + width), mm(y + height)).with_mode(PaintMode::Fill),
            );
        }
        Element::Text {
            x,
            y,
            text,
            size,
            face,
            color,
        } => {
            let font = match face {
                FontFace::Regular => regular,
                FontFace::Bold => bold,
            };
            canvas.set_fill_color(pdf_color(*color));
            canvas.use_text(text.as_str(), *size, mm(*x), mm(*y), font);
        }
        Element::Rule {
            from,
            to,
            thickness,
            color,
        } => {
            canvas.set_outline_color(pdf_color(*color));
            canvas.set_outline_thickness(*thickness);
            canvas.add_line(Line {
                points: vec![
                    (Point::new(mm(from.0), mm(from.1)), false),
                    (Point::new(mm(to.0), mm(to.1)), false),
                ],
                is_closed: false,
            });
        }
    }
}

fn mm(points: f32) -> Mm {
    Mm::from(Pt(points))
}

fn pdf_color(color: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(color.r, color.g, color.b, None))
}
