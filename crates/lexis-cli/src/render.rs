//! Human-readable and JSON output.

use anyhow::Result;
use colored::Colorize;
use lexis_store::{Category, ExceptionMap, Sense, Synset};
use serde::Serialize;

use crate::Stats;

pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn synset(synset: &Synset) {
    let lemmas: Vec<&str> = synset.lemma_names().collect();
    println!(
        "{} {} {}",
        synset.offset.to_string().cyan().bold(),
        synset.ss_type.as_str().yellow(),
        lemmas.join(", ").bold()
    );
    if let Some(lexfile) = &synset.lex_filename {
        println!("  {} {}", "lexfile:".dimmed(), lexfile);
    }
    println!("  {}", synset.gloss);
    for pointer in &synset.pointers {
        println!(
            "  {} {} {}",
            pointer.symbol.as_str().magenta(),
            pointer.offset,
            pointer.pos
        );
    }
    for frame in &synset.frames {
        match &frame.template {
            Some(template) => println!("  {} {:>2} {}", "frame".dimmed(), frame.frame_number, template),
            None => println!("  {} {:>2}", "frame".dimmed(), frame.frame_number),
        }
    }
}

pub fn synsets(synsets: &[std::sync::Arc<Synset>]) {
    for (i, s) in synsets.iter().enumerate() {
        if i > 0 {
            println!();
        }
        synset(s);
    }
}

pub fn senses(senses: &[&Sense]) {
    for sense in senses {
        let tags = sense
            .tag_count
            .map(|n| format!(" ({n} tagged)"))
            .unwrap_or_default();
        println!(
            "{:>3}. {} {} {}{}",
            sense.sense_number,
            sense.sense_key.cyan(),
            sense.ss_type.as_str().yellow(),
            sense.synset_offset,
            tags.dimmed()
        );
    }
}

pub fn exceptions(category: Category, map: &ExceptionMap) {
    if map.is_empty() {
        println!("{} no exceptions for {}", "info:".yellow().bold(), category);
        return;
    }
    for (form, bases) in map {
        println!("{} {} {}", form.bold(), "->".dimmed(), bases.join(", "));
    }
}

pub fn stats(stats: &Stats<'_>) {
    let report = stats.report;
    println!("{} {}", "Data".green().bold(), stats.data_path.display());
    if !report.source_existed {
        println!("  {}", "primary file not found; dataset is empty".yellow());
    }
    println!("  Mode: {}", if stats.lazy { "on-demand" } else { "eager" });
    println!(
        "  Synsets: {} ({} skipped)",
        stats.synsets, report.records_skipped
    );
    println!("  Lemmas: {}", stats.lemmas);
    println!("  Senses: {} ({} skipped)", stats.senses, report.senses_skipped);
    println!(
        "  Exceptions: {} ({} skipped)",
        stats.exceptions, report.exceptions_skipped
    );
    for (relation, edges) in &stats.relations {
        println!("  {}: {} edges", relation, edges);
    }
    if let Some(capacity) = stats.cache_capacity {
        println!("  Cache capacity: {}", capacity);
    }
}
