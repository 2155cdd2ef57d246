use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::Path;
use tracing::info;
use vanity::domain::{ChoiceValue, SlotType};
use vanity::{Platform, Session};

pub fn show(platform: &Platform, session: Option<&Path>, json: bool) -> Result<()> {
    let session = open(platform, session)?;
    print_session(platform, &session, json)
}

pub fn set(platform: &Platform, path: Option<&Path>, changes: &[String], json: bool) -> Result<()> {
    let mut session = open(platform, path)?;

    for change in changes {
        let (slot, value) = parse_assignment(change)?;
        let resolution = session
            .configurator
            .request_change(slot, value)
            .with_context(|| format!("Change '{change}' rejected"))?;
        info!(slot = %slot, touched = ?resolution.touched, "Change applied");
    }

    let saved = match path {
        Some(path) => {
            let document = session.document(&platform.config().session.product);
            fs::write(path, document.to_json()?)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            path.to_path_buf()
        },
        None => platform.save_session(&session)?,
    };

    print_session(platform, &session, json)?;
    if !json {
        println!("\nsaved {}", saved.display());
    }
    Ok(())
}

pub fn options(platform: &Platform, session: Option<&Path>, slot: &str, json: bool) -> Result<()> {
    let slot: SlotType = slot.parse()?;
    let session = open(platform, session)?;
    let choices = session.configurator.options(slot)?;

    if json {
        let values: Vec<_> = choices.iter().map(|c| &c.value).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    let current = session.configurator.choices().get(slot);
    for choice in choices {
        let marker = if current == Some(&choice.value) { '*' } else { ' ' };
        println!("{marker} {:<24} {}", choice.value.to_string(), choice.display_label());
    }
    Ok(())
}

pub fn catalog(platform: &Platform, dump: bool) -> Result<()> {
    let catalog = platform.catalog();
    if dump {
        println!("{}", catalog.to_json()?);
        return Ok(());
    }

    for section in catalog.sections() {
        println!("{:<8} {:<14} {:>3} choices", section.slot.as_str(), section.label, section.choice_count());
    }
    println!("\n{} rules", catalog.rules().len());
    for cycle in catalog.rule_cycles() {
        println!("potential cycle: {cycle:?}");
    }
    Ok(())
}

fn open(platform: &Platform, path: Option<&Path>) -> Result<Session> {
    Ok(match path {
        Some(path) => platform.open_session(path)?,
        None => platform.new_session()?,
    })
}

fn print_session(platform: &Platform, session: &Session, json: bool) -> Result<()> {
    let choices = session.configurator.choices();
    let quote = platform.quote(choices);

    if json {
        let out = serde_json::json!({ "id": session.id, "choices": choices, "quote": quote });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("session {}", session.id);
    for (slot, value) in choices.iter() {
        println!("  {:<8} {value}", slot.as_str());
    }
    println!();
    for line in &quote.lines {
        println!("  {:<8} {:>9}", line.category.label(), line.amount.to_string());
    }
    println!("  {:<8} {:>9}", "total", quote.total.to_string());
    println!();
    for (slot, part) in &quote.parts {
        println!("  {:<8} {}", slot.as_str(), part.asset_path);
    }
    Ok(())
}

/// Splits `slot=value`; the value follows the usual input rules (`none`, integers, text).
fn parse_assignment(input: &str) -> Result<(SlotType, ChoiceValue)> {
    let (slot, value) =
        input.split_once('=').ok_or_else(|| anyhow!("expected slot=value, got '{input}'"))?;
    let slot = slot.trim().parse()?;
    let Ok(value) = value.parse::<ChoiceValue>();
    Ok((slot, value))
}
