/// Library Linter: validates a library directory's RON data files.
///
/// Usage: library_linter <library_dir>

use litrealm::core::catalog::Catalog;
use litrealm::core::engine::{CATALOG_FILE, NARRATIONS_FILE, SUGGESTIONS_FILE};
use litrealm::core::narration::load_playlist;
use litrealm::core::suggest::SuggestionBook;
use litrealm::schema::theme::ThemeCategory;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: library_linter <library_dir>");
        process::exit(0);
    }

    let dir = Path::new(&args[1]);
    if !dir.is_dir() {
        eprintln!("ERROR: Path '{}' is not a directory", dir.display());
        process::exit(1);
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let catalog_path = dir.join(CATALOG_FILE);
    if catalog_path.exists() {
        match Catalog::load_from_ron(&catalog_path) {
            Ok(catalog) => lint_catalog(&catalog, &mut warnings),
            Err(e) => errors.push(format!("{}: {}", CATALOG_FILE, e)),
        }
    } else {
        warnings.push(format!("{} missing, built-in catalog will be used", CATALOG_FILE));
    }

    let suggestions_path = dir.join(SUGGESTIONS_FILE);
    if suggestions_path.exists() {
        match SuggestionBook::load_from_ron(&suggestions_path) {
            Ok(book) => lint_suggestions(&book, &mut warnings),
            Err(e) => errors.push(format!("{}: {}", SUGGESTIONS_FILE, e)),
        }
    } else {
        warnings.push(format!(
            "{} missing, built-in suggestions will be used",
            SUGGESTIONS_FILE
        ));
    }

    let narrations_path = dir.join(NARRATIONS_FILE);
    if narrations_path.exists() {
        if let Err(e) = load_playlist(&narrations_path) {
            errors.push(format!("{}: {}", NARRATIONS_FILE, e));
        }
    } else {
        warnings.push(format!(
            "{} missing, built-in playlist will be used",
            NARRATIONS_FILE
        ));
    }

    println!("\n=== Library Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if !errors.is_empty() {
        process::exit(1);
    }
}

/// Vocabulary entries no story uses are legal but leave dead selector options.
fn lint_catalog(catalog: &Catalog, warnings: &mut Vec<String>) {
    println!("Loaded {} stories", catalog.stories.len());
    for genre in &catalog.genres {
        if !catalog.stories.iter().any(|s| &s.genre == genre) {
            warnings.push(format!("genre '{}' is not used by any story", genre));
        }
    }
    for mood in &catalog.moods {
        if !catalog.stories.iter().any(|s| &s.mood == mood) {
            warnings.push(format!("mood '{}' is not used by any story", mood));
        }
    }
    for story in &catalog.stories {
        if story.title.trim().is_empty() {
            warnings.push(format!("story {:?} has an empty title", story.id));
        }
    }
}

fn lint_suggestions(book: &SuggestionBook, warnings: &mut Vec<String>) {
    for category in ThemeCategory::ALL {
        let pool = book.category(category);
        if pool.len() != 3 {
            warnings.push(format!(
                "category '{}' has {} suggestions (built-in pools have 3)",
                category.name(),
                pool.len()
            ));
        }
        for (i, text) in pool.iter().enumerate() {
            if pool[..i].contains(text) {
                warnings.push(format!(
                    "category '{}' repeats suggestion \"{}\"",
                    category.name(),
                    text
                ));
            }
        }
    }
}
