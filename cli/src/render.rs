//! Plain-text table of bookings

use park_booking::domain::{Attraction, Booking};

const HEADERS: [&str; 6] = ["ID", "Name", "Phone", "Age", "Date", "Attractions"];

fn row(b: &Booking) -> [String; 6] {
    let attractions: Vec<&str> = b.attractions.iter().map(Attraction::as_str).collect();
    [
        b.id.to_string(),
        b.name.clone(),
        b.phone.clone(),
        b.age.to_string(),
        b.date.format("%Y-%m-%d").to_string(),
        attractions.join(", "),
    ]
}

pub fn bookings_table(bookings: &[Booking]) -> String {
    if bookings.is_empty() {
        return "No bookings.".to_string();
    }

    let rows: Vec<[String; 6]> = bookings.iter().map(row).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for r in &rows {
        for (w, cell) in widths.iter_mut().zip(r.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut out = vec![line(&header[..]), line(&rule[..])];
    out.extend(rows.iter().map(|r| line(&r[..])));
    out.join("\n")
}
