//! Text rendering of view states.

use journal_core::views::{EntryCard, EntryCardView, ListView};

pub fn list_lines(view: &ListView) -> Vec<String> {
    match view {
        ListView::ProgramMissing { message }
        | ListView::Empty { message } => vec![message.clone()],
        ListView::Loading => vec!["loading...".to_string()],
        ListView::Error { message } => vec![format!("error: {message}")],
        ListView::Populated { entries } => {
            let mut out = Vec::with_capacity(entries.len() * 4);
            for (i, card) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(String::new());
                }
                out.extend(card_lines(card));
            }
            out
        }
    }
}

pub fn card_view_lines(view: &EntryCardView) -> Vec<String> {
    match view {
        EntryCardView::Disconnected { message } => vec![message.clone()],
        EntryCardView::Loading => vec!["loading...".to_string()],
        EntryCardView::NotFound { address } => vec![format!("no entry at {address}")],
        EntryCardView::Ready { card } => card_lines(card),
        EntryCardView::Error { message } => vec![format!("error: {message}")],
    }
}

fn card_lines(card: &EntryCard) -> Vec<String> {
    let mine = if card.editable { " (yours)" } else { "" };
    vec![
        format!("# {}{mine}", card.title),
        card.message.clone(),
        format!("  address: {}", card.address),
        format!("  owner:   {}", card.owner),
    ]
}
