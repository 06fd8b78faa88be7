use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(dir: &Path) -> Result<(), String> {
    let catalog = super::load_catalog(dir)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Title", "Pages", "Endings", "Opening"]);

    for story in catalog.stories() {
        let mut endings: Vec<String> = story
            .endings()
            .filter_map(|p| p.ending_tag().map(|e| e.to_string()))
            .collect();
        endings.sort();
        endings.dedup();

        let opening = story
            .start_page()
            .map(|p| p.description.clone())
            .unwrap_or_default();
        let opening = if opening.chars().count() > 60 {
            format!("{}...", opening.chars().take(57).collect::<String>())
        } else {
            opening
        };

        table.add_row(vec![
            story.title().to_string(),
            story.page_count().to_string(),
            endings.join(", "),
            opening,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} stories", catalog.len());

    Ok(())
}
