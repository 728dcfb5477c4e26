//! Shopping-list PDF rendering
//!
//! Renders the aggregated shopping list as an A4 document with a builtin
//! font, starting a new page when a column runs out of room.

use domain_recipes::ShoppingListLine;
use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::error::ApiError;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const TOP_MM: f32 = 277.0;
const BOTTOM_MARGIN_MM: f32 = 20.0;
const LINE_STEP_MM: f32 = 7.0;

/// Renders the shopping list into PDF bytes.
pub fn render_shopping_list(lines: &[ShoppingListLine]) -> Result<Vec<u8>, ApiError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Shopping list",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "layer 1",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    layer.use_text("Shopping list:", 14.0, Mm(20.0), Mm(TOP_MM), &font);

    let mut y = TOP_MM - LINE_STEP_MM;
    for line in lines {
        if y < BOTTOM_MARGIN_MM {
            let (page, layer_idx) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "layer 1");
            layer = doc.get_page(page).get_layer(layer_idx);
            y = TOP_MM;
        }

        layer.use_text(format!("- {line}"), 12.0, Mm(25.0), Mm(y), &font);
        y -= LINE_STEP_MM;
    }

    doc.save_to_bytes().map_err(|e| ApiError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, unit: &str, total: f64) -> ShoppingListLine {
        ShoppingListLine {
            name: name.to_string(),
            measurement_unit: unit.to_string(),
            total,
        }
    }

    #[test]
    fn renders_a_pdf_header() {
        let bytes = render_shopping_list(&[line("flour", "g", 750.0)]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn renders_empty_list() {
        let bytes = render_shopping_list(&[]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_lists_still_render() {
        let lines: Vec<_> = (0..200)
            .map(|i| line(&format!("ingredient {i}"), "g", i as f64 + 1.0))
            .collect();

        let bytes = render_shopping_list(&lines).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
