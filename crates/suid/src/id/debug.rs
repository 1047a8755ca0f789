use crate::FieldValue;
use core::fmt;

/// Writes the multi-line `{:#?}` rendering of an identifier: raw value, text
/// form and a table of its fields.
pub(crate) fn write_bit_layout_debug(
    f: &mut fmt::Formatter<'_>,
    type_name: &str,
    raw_hex: &str,
    text: &str,
    fields: &[FieldValue],
) -> fmt::Result {
    let labels: Vec<String> = fields
        .iter()
        .map(|fv| format!("{} ({})", fv.field.kind, fv.field.bits))
        .collect();

    // Widest of label, decimal and hex, plus padding.
    let columns: Vec<usize> = fields
        .iter()
        .zip(&labels)
        .map(|(fv, label)| {
            let dec_len = fv.value.to_string().len();
            let hex_len = format!("{:#x}", fv.value).len();
            label.len().max(dec_len).max(hex_len) + 2
        })
        .collect();

    fn center(s: impl ToString, width: usize) -> String {
        let s = s.to_string();
        let pad = width.saturating_sub(s.len());
        let left = pad / 2;
        format!("{}{}{}", " ".repeat(left), s, " ".repeat(pad - left))
    }

    fn border(f: &mut fmt::Formatter<'_>, columns: &[usize]) -> fmt::Result {
        write!(f, "        +")?;
        for &w in columns {
            write!(f, "{}+", "-".repeat(w))?;
        }
        writeln!(f)
    }

    writeln!(f, "{type_name} {{")?;
    writeln!(f, "    raw        : {raw_hex}")?;
    writeln!(f, "    text       : {text}")?;
    writeln!(f, "    layout     :")?;

    border(f, &columns)?;
    write!(f, "        |")?;
    for (label, &w) in labels.iter().zip(&columns) {
        write!(f, "{}|", center(label, w))?;
    }
    writeln!(f)?;
    border(f, &columns)?;

    write!(f, "        |")?;
    for (fv, &w) in fields.iter().zip(&columns) {
        write!(f, "{}|", center(fv.value, w))?;
    }
    writeln!(f)?;

    write!(f, "        |")?;
    for (fv, &w) in fields.iter().zip(&columns) {
        write!(f, "{}|", center(format!("{:#x}", fv.value), w))?;
    }
    writeln!(f)?;
    border(f, &columns)?;

    write!(f, "}}")
}
