use crate::cli::{Commands, Snipcat};
use snipcat_core::{
    builtin_catalog, deep_link, find_snippet, json_payload, load_catalog, query_string,
    resolve_ids, share_origin, share_url, App, Category, Environment, Modifier, Result,
    SnipcatError,
};
use snipcat_ui::run_explorer;
use std::fs;
use std::path::PathBuf;

pub fn handle_command(args: Snipcat) -> Result<()> {
    let catalog = match &args.catalog {
        Some(path) => load_catalog(path)?,
        None => builtin_catalog()?,
    };

    match args.commands {
        // Default: open the explorer when no command is provided
        None | Some(Commands::Browse) => run_explorer(App::new(catalog)),
        Some(Commands::List) => list_catalog(&catalog),
        Some(Commands::Export {
            id,
            format,
            start,
            end,
            output,
        }) => export_snippets(&catalog, &id, &format, &start, &end, output),
    }
}

fn list_catalog(catalog: &[Category]) -> Result<()> {
    for category in catalog {
        println!("{} ({})", category.name, category.slug);
        for snippet in &category.snippets {
            if snippet.keyword.is_empty() {
                println!("  {:<24} {}", snippet.id, snippet.name);
            } else {
                println!(
                    "  {:<24} {}  [{}]",
                    snippet.id, snippet.name, snippet.keyword
                );
            }
        }
        println!();
    }
    Ok(())
}

fn export_snippets(
    catalog: &[Category],
    ids: &[String],
    format: &str,
    start: &str,
    end: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    let start: Modifier = start.parse()?;
    let end: Modifier = end.parse()?;

    for id in ids {
        if find_snippet(catalog, id).is_none() {
            eprintln!("Warning: no snippet with id '{}'", id);
        }
    }

    let snippets = resolve_ids(catalog, ids);
    if snippets.is_empty() {
        println!("No matching snippets, nothing to export.");
        return Ok(());
    }

    let payload = match format {
        "json" => json_payload(&snippets, start, end),
        "query" => query_string(&snippets, start, end),
        "url" => share_url(&share_origin(), &snippets, start, end),
        "deeplink" => deep_link(
            Environment::detect().deep_link_scheme(),
            &snippets,
            start,
            end,
        ),
        other => {
            return Err(SnipcatError::Other(format!(
                "Unknown export format: {}",
                other
            )))
        }
    };

    match output {
        Some(path) => {
            fs::write(&path, &payload)?;
            println!("Exported {} snippets to {}", snippets.len(), path.display());
        }
        None => println!("{}", payload),
    }

    Ok(())
}
