use std::{
    fs::{self, File},
    io::BufWriter,
    path::Path,
};

use anyhow::{Context, Result};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::normalize::normalize;
use crate::pipeline::SummaryRecord;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_LEFT_MM: f32 = 20.0;
const VALUE_COLUMN_MM: f32 = 72.0;
const HEADING_Y_MM: f32 = 272.0;
const TABLE_TOP_MM: f32 = 256.0;
const ROW_STEP_MM: f32 = 6.5;
const HEADING_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 10.0;
// Helvetica 10pt fits roughly this many characters in the value column.
const VALUE_WRAP_CHARS: usize = 64;

/// Render one A4 page per summary record: a heading plus a two-column
/// field/value table. Any pre-existing file at `path` is removed first so
/// the document always starts fresh.
pub fn write_pdf(records: &[SummaryRecord], path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("failed to remove previous PDF at {}", path.display()))?;
    }

    let (doc, first_page, first_layer) = PdfDocument::new(
        "SME Security Package Summary",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "content",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .context("failed to register Helvetica")?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .context("failed to register Helvetica-Bold")?;

    for (idx, record) in records.iter().enumerate() {
        let layer = if idx == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
            doc.get_page(page).get_layer(layer)
        };
        render_record(&layer, record, &regular, &bold);
    }

    let file = File::create(path)
        .with_context(|| format!("failed to create PDF at {}", path.display()))?;
    doc.save(&mut BufWriter::new(file))
        .with_context(|| format!("failed to write PDF to {}", path.display()))?;
    Ok(())
}

fn render_record(
    layer: &PdfLayerReference,
    record: &SummaryRecord,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    layer.use_text(
        "SME Security Package Summary",
        HEADING_SIZE,
        Mm(MARGIN_LEFT_MM),
        Mm(HEADING_Y_MM),
        bold,
    );

    let mut y = TABLE_TOP_MM;
    for (field, value) in table_rows(record) {
        layer.use_text(field, BODY_SIZE, Mm(MARGIN_LEFT_MM), Mm(y), bold);
        for line in wrap(&value, VALUE_WRAP_CHARS) {
            layer.use_text(line, BODY_SIZE, Mm(VALUE_COLUMN_MM), Mm(y), regular);
            y -= ROW_STEP_MM;
        }
    }
}

/// The full field set in render order. List fields join with `", "`; the
/// justification is the one value that passes through the normalizer.
fn table_rows(record: &SummaryRecord) -> Vec<(&'static str, String)> {
    vec![
        ("SME_Name", record.sme_name.clone()),
        ("Industry", record.industry.clone()),
        ("Headcount", record.headcount.to_string()),
        ("Endpoints", record.endpoints.to_string()),
        ("Cloud", record.cloud.clone()),
        ("On_Prem", record.on_prem.clone()),
        (
            "Regulatory_Drivers",
            join_or_na(&record.regulatory_drivers),
        ),
        ("Monthly_Budget_Band", record.monthly_budget_band.clone()),
        ("Recommended_Package", record.recommended_package.clone()),
        ("Tooling_Stack", join_or_na(&record.tooling_stack)),
        ("Justification", normalize(&record.justification)),
    ]
}

fn join_or_na(items: &[String]) -> String {
    if items.is_empty() {
        "N/A".to_string()
    } else {
        items.join(", ")
    }
}

/// Greedy word wrap to at most `max_chars` per line. Overlong single words
/// get a line of their own. Always yields at least one line so every field
/// row advances the cursor.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
