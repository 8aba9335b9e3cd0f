//! The `geoquiz levels` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use geoquiz_core::levels::{levels_for, LevelConfig};
use geoquiz_core::model::Domain;

pub fn execute(domain: Option<String>) -> Result<()> {
    let domains = match domain {
        Some(name) => vec![name.parse::<Domain>().map_err(anyhow::Error::msg)?],
        None => Domain::ALL.to_vec(),
    };

    for domain in domains {
        println!("{domain}");
        println!("{}\n", level_table(&levels_for(domain)));
    }
    Ok(())
}

fn level_table(levels: &[LevelConfig]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Niveau", "Titre", "Description", "Chrono", "Carte", "Types"]);
    for level in levels {
        table.add_row(vec![
            Cell::new(level.id),
            Cell::new(level.title),
            Cell::new(level.description),
            Cell::new(
                level
                    .timer_secs
                    .map(|s| format!("{s}s"))
                    .unwrap_or_else(|| "-".into()),
            ),
            Cell::new(if level.uses_map { "oui" } else { "non" }),
            Cell::new(level.allowed_types.len()),
        ]);
    }
    table
}
