//! The `quizbank themes` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizbank_core::model::Level;
use quizbank_corpus::config::load_config_from;

use super::load_pool;

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let pool = load_pool(&config, &config.themes).await?;

    let mut header = vec!["Theme".to_string(), "File".to_string()];
    header.extend(Level::KNOWN.iter().map(|l| l.as_str().to_string()));
    header.push("Total".to_string());

    let mut table = Table::new();
    table.set_header(header);

    for bank in &config.themes {
        let counts: Vec<usize> = Level::KNOWN
            .iter()
            .map(|level| pool.count_by(&bank.name, level))
            .collect();
        let total = pool.filter(std::slice::from_ref(&bank.name), None).len();

        let mut row = vec![Cell::new(bank.name.label()), Cell::new(&bank.file)];
        row.extend(counts.into_iter().map(Cell::new));
        row.push(Cell::new(total));
        table.add_row(row);
    }

    println!("{table}");
    println!("{} questions in total", pool.len());
    Ok(())
}
