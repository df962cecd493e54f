//! `relayd channels` and `relayd members`.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use crate::state::AppState;

/// Print the channel directory.
pub async fn list_channels(state: &AppState, json: bool) -> Result<()> {
    let channels = state.controller.registry().list_channels().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "channels": channels }))?);
        return Ok(());
    }

    if channels.is_empty() {
        println!();
        println!(
            "  {} No channels yet. Start the relay with: {}",
            style("i").blue().bold(),
            style("relayd serve").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Channel").fg(Color::White),
        Cell::new("Members").fg(Color::White),
    ]);

    for channel in &channels {
        let members = state.controller.registry().list_members(channel).await?;
        table.add_row(vec![
            Cell::new(format!("#{channel}")).fg(Color::Cyan),
            Cell::new(members.len()),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} channel{}",
        style(channels.len()).bold(),
        if channels.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Print the members of one channel.
pub async fn list_members(state: &AppState, channel: &str, json: bool) -> Result<()> {
    let channel = channel.trim_start_matches('#');
    let members = state.controller.registry().list_members(channel).await?;

    if json {
        let out = serde_json::json!({ "channel": channel, "members": members });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if members.is_empty() {
        println!();
        println!(
            "  {} Nobody is in {}",
            style("i").blue().bold(),
            style(format!("#{channel}")).cyan()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Connection").fg(Color::White),
        Cell::new("Name").fg(Color::White),
    ]);

    for connection_id in &members {
        let profile = state.controller.profiles().get(connection_id).await?;
        table.add_row(vec![
            Cell::new(connection_id).fg(Color::DarkGrey),
            Cell::new(&profile.username).fg(Color::Cyan),
        ]);
    }

    println!();
    println!("  {}", style(format!("#{channel}")).cyan().bold());
    println!("{table}");
    println!();
    println!(
        "  {} member{}",
        style(members.len()).bold(),
        if members.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}
