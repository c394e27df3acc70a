/// Library shell: interactive session for exploring the catalog and
/// trying the co-writer.
///
/// Usage: library_shell [--library <dir>] [--seed <n>] [--latency-ms <n>]
///
/// Commands:
///   list                 show stories matching the current filters
///   search <text>        set the search text (no text clears it)
///   genre <name|All>     set the genre filter
///   mood <name|All>      set the mood filter
///   clear                reset all filters
///   theme <text>         set the co-writer theme
///   write <text>         replace the co-writer draft
///   generate             generate a suggestion (waits for the latency)
///   accept               append the suggestion to the draft
///   save                 save the draft
///   saved                list saved creations
///   help                 list commands
///   quit                 exit

use litrealm::core::cowriter::CoWriterSession;
use litrealm::core::explore::{ExploreView, StoryExplorer};
use litrealm::core::notice::Notice;
use litrealm::Litrealm;
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut library_dir = None;
    let mut seed: u64 = 42;
    let mut latency_ms = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                return;
            }
            "--library" if i + 1 < args.len() => {
                i += 1;
                library_dir = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            "--latency-ms" if i + 1 < args.len() => {
                i += 1;
                latency_ms = args[i].parse::<u64>().ok();
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut builder = Litrealm::builder().seed(seed);
    if let Some(dir) = library_dir {
        builder = builder.library_dir(dir);
    }
    if let Some(ms) = latency_ms {
        builder = builder.generation_latency(Duration::from_millis(ms));
    }
    let mut engine = match builder.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    println!("Loaded {} stories", engine.catalog().stories.len());
    println!("Seed: {}", seed);
    println!("Type 'help' for commands.\n");

    let clock = Instant::now();
    let mut explorer = StoryExplorer::new();
    explorer.open();
    let mut writer: CoWriterSession = engine.cowriter();
    writer.open();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("litrealm> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (cmd, rest) = match line.split_once(' ') {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (line.to_lowercase(), ""),
        };

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => print_help(),
            "list" | "ls" => {
                let criteria = explorer.criteria();
                println!(
                    "search='{}' genre={} mood={}",
                    criteria.search,
                    criteria.genre.as_str(),
                    criteria.mood.as_str()
                );
                match explorer.view(engine.catalog()) {
                    ExploreView::Results(records) => {
                        for story in records {
                            println!(
                                "  {} {:>2}. {} — {} [{} / {}]",
                                story.thumbnail,
                                story.id.0,
                                story.title,
                                story.author,
                                story.genre,
                                story.mood
                            );
                        }
                    }
                    ExploreView::NoResults => {
                        println!("No stories found matching your criteria. Type 'clear' to reset.");
                    }
                }
            }
            "search" => explorer.set_search(rest),
            "genre" => {
                if !rest.is_empty() && rest != "All" && !engine.catalog().genres.iter().any(|g| g == rest) {
                    println!("Genres: {}", engine.catalog().genre_options().join(", "));
                    continue;
                }
                explorer.set_genre(rest);
            }
            "mood" => {
                if !rest.is_empty() && rest != "All" && !engine.catalog().moods.iter().any(|m| m == rest) {
                    println!("Moods: {}", engine.catalog().mood_options().join(", "));
                    continue;
                }
                explorer.set_mood(rest);
            }
            "clear" => explorer.clear_filters(),
            "theme" => writer.set_theme(rest),
            "write" => {
                writer.set_draft(rest);
                println!("Words: {}", writer.word_count());
            }
            "generate" | "gen" => {
                let ticket = match writer.request_generation(clock.elapsed()) {
                    Ok(ticket) => ticket,
                    Err(e) => {
                        println!("Cannot generate: {}", e);
                        continue;
                    }
                };
                println!("AI is crafting your suggestion...");
                std::thread::sleep(engine.generation_latency());
                match engine.finish_generation(&mut writer, ticket, clock.elapsed()) {
                    Ok(notice) => {
                        print_notice(&notice);
                        if let Some(suggestion) = writer.suggestion() {
                            println!("  \"{}\"", suggestion);
                        }
                    }
                    Err(e) => println!("Generation failed: {}", e),
                }
            }
            "accept" => match writer.accept_suggestion() {
                Some(notice) => {
                    print_notice(&notice);
                    println!("{}", writer.draft());
                }
                None => println!("No suggestion to accept."),
            },
            "save" => match writer.save_creation() {
                Some(notice) => print_notice(&notice),
                None => println!("Nothing to save. Write something first."),
            },
            "saved" => {
                if writer.saved_creations().is_empty() {
                    println!("No saved creations.");
                }
                for index in 0..writer.saved_creations().len() {
                    if let Some(preview) = writer.creation_preview(index) {
                        println!("  {}. \"{}\"", index + 1, preview);
                    }
                }
            }
            _ => println!("Unknown command '{}'. Type 'help' for commands.", cmd),
        }
    }
}

fn print_notice(notice: &Notice) {
    let marker = if notice.is_error() { "!" } else { "*" };
    println!("{} {} {}", marker, notice.title, notice.description);
}

fn print_usage() {
    println!("Usage: library_shell [--library <dir>] [--seed <n>] [--latency-ms <n>]");
}

fn print_help() {
    println!("Commands:");
    println!("  list                 show stories matching the current filters");
    println!("  search <text>        set the search text (no text clears it)");
    println!("  genre <name|All>     set the genre filter");
    println!("  mood <name|All>      set the mood filter");
    println!("  clear                reset all filters");
    println!("  theme <text>         set the co-writer theme");
    println!("  write <text>         replace the co-writer draft");
    println!("  generate             generate a suggestion");
    println!("  accept               append the suggestion to the draft");
    println!("  save                 save the draft");
    println!("  saved                list saved creations");
    println!("  help                 list commands");
    println!("  quit                 exit");
}
