//! The `geoquiz countries` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use geoquiz_core::catalog;
use geoquiz_core::model::Domain;

pub fn execute(zone: Option<String>) -> Result<()> {
    let zone = match zone {
        Some(name) => name.parse::<Domain>().map_err(anyhow::Error::msg)?,
        None => Domain::World,
    };
    let countries = catalog::pool(zone);

    let mut table = Table::new();
    table.set_header(vec!["ISO", "Pays", "Capitale", "Drapeau", "Monnaie", "Continent"]);
    for country in &countries {
        table.add_row(vec![
            Cell::new(country.iso),
            Cell::new(country.name),
            Cell::new(country.capital),
            Cell::new(country.flag),
            Cell::new(country.currency),
            Cell::new(country.continent),
        ]);
    }

    println!("{table}");
    println!("{} pays ({zone})", countries.len());
    Ok(())
}
