use chrono::{DateTime, Local};

use crate::render::escape;

/// Wrap rendered cards in a standalone HTML page.
pub fn assemble(title: &str, cards: &[String]) -> String {
    assemble_at(title, cards, Local::now())
}

fn assemble_at(title: &str, cards: &[String], generated: DateTime<Local>) -> String {
    let title = escape(title);
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html lang=\"it\">\n<head>\n");
    page.push_str("<meta charset=\"utf-8\">\n");
    page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    page.push_str(&format!("<title>{title}</title>\n"));
    page.push_str("</head>\n<body>\n");
    page.push_str(&format!("<h1>{title}</h1>\n"));
    page.push_str(&format!(
        "<p class=\"roster-meta\">{} membri · generato il {}</p>\n",
        cards.len(),
        generated.format("%d/%m/%Y %H:%M")
    ));
    page.push_str("<div class=\"member-grid\">\n");
    for card in cards {
        page.push_str(card);
        page.push('\n');
    }
    page.push_str("</div>\n</body>\n</html>\n");
    page
}
