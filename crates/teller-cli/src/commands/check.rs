use std::path::Path;

pub fn run(dir: &Path) -> Result<(), String> {
    let catalog = super::load_catalog(dir)?;

    println!(
        "  All checks passed: {} {}.",
        catalog.len(),
        if catalog.len() == 1 { "story" } else { "stories" }
    );
    for story in catalog.stories() {
        println!(
            "  - {} ({} pages, {} endings)",
            story.title(),
            story.page_count(),
            story.endings().count()
        );
    }

    Ok(())
}
