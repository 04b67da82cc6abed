//! Turns a document view into text columns for the page fill estimate.

use crate::layout::{analyze_page_fill, Column, PageConfig, PageFillReport, TextBlock};
use crate::render::skins::{Region, Skin};
use crate::render::tokens::DesignTokens;
use crate::render::view::{DocumentView, EntryView, HeaderView, SectionView};

/// Vertical space after each entry, matching `.cv-entry { margin-bottom }`.
const ENTRY_GAP_MM: f32 = 2.5;

pub fn estimate_page_fill(
    document: &DocumentView,
    skin: &dyn Skin,
    tokens: &DesignTokens,
) -> PageFillReport {
    let main_mm = skin.main_width_mm(tokens);
    let config = PageConfig::new(
        tokens.font_family,
        tokens.font_size_pt,
        tokens.content_height_mm(),
    );
    let section_gap = config.mm_to_lines(tokens.section_gap_mm);
    let entry_gap = config.mm_to_lines(ENTRY_GAP_MM);
    let sidebar_mm = skin.sidebar_width_mm();

    let mut main = Vec::new();
    let mut sidebar = Vec::new();
    header_blocks(&document.header, section_gap, sidebar_mm.is_none(), &mut main);
    if sidebar_mm.is_some() {
        contact_blocks(&document.header, &mut sidebar);
    }
    for section in &document.sections {
        let target = match skin.region(section.key) {
            Region::Main => &mut main,
            Region::Sidebar => &mut sidebar,
        };
        section_blocks(section, section_gap, entry_gap, target);
    }

    let mut columns = vec![Column {
        text_width_em: config.mm_to_em(main_mm),
        blocks: main,
    }];
    if let Some(width) = sidebar_mm {
        columns.push(Column {
            text_width_em: config.mm_to_em(width),
            blocks: sidebar,
        });
    }
    analyze_page_fill(&columns, &config)
}

fn header_blocks(
    header: &HeaderView,
    section_gap: f32,
    with_contacts: bool,
    out: &mut Vec<TextBlock>,
) {
    if let Some(name) = &header.name {
        out.push(TextBlock::heading(name.as_str(), 2.2, 0.0));
    }
    if let Some(title) = &header.title {
        out.push(TextBlock::heading(title.as_str(), 1.15, 0.0));
    }
    if with_contacts {
        contact_blocks(header, out);
    }
    if let Some(summary) = &header.summary {
        out.push(TextBlock::heading("Summary", 1.1, section_gap));
        out.push(TextBlock::body(summary.as_str()));
    }
}

fn contact_blocks(header: &HeaderView, out: &mut Vec<TextBlock>) {
    if header.contacts.is_empty() {
        return;
    }
    let line = header
        .contacts
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("  |  ");
    out.push(TextBlock::body(line));
}

fn section_blocks(
    section: &SectionView,
    section_gap: f32,
    entry_gap: f32,
    out: &mut Vec<TextBlock>,
) {
    out.push(TextBlock::heading(section.title, 1.1, section_gap));
    for (i, entry) in section.entries.iter().enumerate() {
        let space = if i == 0 { 0.0 } else { entry_gap };
        entry_blocks(entry, space, out);
    }
}

fn entry_blocks(entry: &EntryView, space_before: f32, out: &mut Vec<TextBlock>) {
    let head = [&entry.title, &entry.subtitle, &entry.dates, &entry.location]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("  ");
    out.push(TextBlock {
        text: head,
        scale: 1.0,
        space_before,
    });
    if let Some(group) = &entry.group {
        out.push(TextBlock::body(group.as_str()));
    }
    if let Some(p) = entry.proficiency {
        out.push(TextBlock::body(p.label));
    }
    if let Some(description) = &entry.description {
        out.push(TextBlock::body(description.as_str()));
    }
    out.extend(entry.bullets.iter().map(|b| TextBlock::body(format!("• {b}"))));
    if !entry.tags.is_empty() {
        out.push(TextBlock::body(entry.tags.join(", ")));
    }
    if !entry.details.is_empty() {
        let details = entry
            .details
            .iter()
            .map(|d| format!("{}: {}", d.label, d.value))
            .collect::<Vec<_>>()
            .join("    ");
        out.push(TextBlock::body(details));
    }
    if let Some(link) = &entry.link {
        out.push(TextBlock::body(link.as_str()));
    }
}
