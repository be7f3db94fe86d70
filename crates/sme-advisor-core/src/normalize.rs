/// Map problematic Unicode out of free text before it lands in a rendered
/// report cell: dash variants become plain hyphens, non-breaking spaces
/// become ordinary spaces, zero-width characters are dropped. Total
/// function; empty input maps to an empty string.
///
/// Called at exactly one site (the justification cell of the PDF table).
/// Other fields are rendered as received; that asymmetry is intentional.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{2010}'..='\u{2015}' => out.push('-'),
            '\u{00A0}' | '\u{202F}' => out.push(' '),
            '\u{200B}'..='\u{200D}' | '\u{FEFF}' => {}
            _ => out.push(ch),
        }
    }
    out
}
