//! The `geoquiz status` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use geoquiz_core::model::Domain;
use geoquiz_core::progress::{ProgressTracker, MAX_SCORE};
use geoquiz_core::rank::Rank;

use super::{open_game, GlobalArgs, Input};

pub async fn execute(global: &GlobalArgs, json: bool) -> Result<()> {
    let config = global.load_config()?;
    let mut input = Input::stdin();
    let game = open_game(global, &config, &mut input).await?;

    if json {
        let snapshot = serde_json::json!({
            "online": game.is_online(),
            "levels": game.progress().levels(),
            "domain_scores": game.progress().domain_scores(),
            "total_score": game.progress().total_score(),
            "rank": game.rank(),
        });
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }
    if !game.is_online() {
        println!("Hors ligne : progression locale vierge (utilise --user pour charger la tienne).");
    }

    let progress = game.progress();
    println!("{}", progress_table(progress));

    let total = progress.total_score();
    println!(
        "Score total : {total}/{} · Rang : {}",
        progress.max_total_score(),
        game.rank()
    );
    match Rank::points_to_next(total) {
        Some(missing) => {
            if let Some(next) = game.rank().next() {
                println!("Encore {missing} points pour devenir {next}.");
            }
        }
        None => println!("Rang maximal atteint."),
    }
    Ok(())
}

fn progress_table(progress: &ProgressTracker) -> Table {
    let mut table = Table::new();
    let mut header = vec!["Domaine".to_string()];
    header.extend((1..=5).map(|id| format!("N{id}")));
    header.push("Score".into());
    table.set_header(header);

    for domain in Domain::ALL {
        let mut row = vec![Cell::new(domain)];
        for level in progress.levels_for(domain) {
            let text = if !level.unlocked {
                "🔒".to_string()
            } else if level.completed {
                format!("✔ {}/{MAX_SCORE}", level.best_score)
            } else {
                format!("{}/{MAX_SCORE}", level.best_score)
            };
            row.push(Cell::new(text));
        }
        row.push(Cell::new(progress.domain_score(domain)));
        table.add_row(row);
    }
    table
}
