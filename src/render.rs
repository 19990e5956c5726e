//! Box-drawn contact tables for the console.

use crate::domain::contact::Contact;

pub const HEADERS: [&str; 6] = [
    "Name",
    "Lastname",
    "Surname",
    "Organization",
    "Work phone",
    "Personal phone",
];

/// Renders the contacts as a table with the fixed column headers. An empty
/// input still produces the header and borders.
pub fn render_table<'a, I>(contacts: I) -> String
where
    I: IntoIterator<Item = &'a Contact>,
{
    let rows: Vec<[String; 6]> = contacts.into_iter().map(Contact::cells).collect();

    // Widths are counted in chars so Cyrillic names line up.
    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut output = String::new();

    push_border(&mut output, &widths, ('┌', '┬', '┐'));
    push_row(&mut output, &widths, HEADERS.iter().copied());
    push_border(&mut output, &widths, ('├', '┼', '┤'));
    for row in &rows {
        push_row(&mut output, &widths, row.iter().map(String::as_str));
    }
    push_border(&mut output, &widths, ('└', '┴', '┘'));

    output
}

fn push_border(output: &mut String, widths: &[usize], (left, middle, right): (char, char, char)) {
    output.push(left);
    for (idx, width) in widths.iter().enumerate() {
        output.push_str(&"─".repeat(width + 2));
        output.push(if idx == widths.len() - 1 { right } else { middle });
    }
    output.push('\n');
}

fn push_row<'a>(output: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
    output.push('│');
    for (cell, width) in cells.zip(widths) {
        output.push_str(&format!(" {:<width$} │", cell, width = *width));
    }
    output.push('\n');
}
