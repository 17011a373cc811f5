//! yasku interactive configurator.
//!
//! Prompts for a webhook URL and a topic list, then writes the config file
//! so the main binary can run unattended.

use std::io::{self, BufRead, Write};

use yasku::error::Result;
use yasku::models::Config;

fn main() -> Result<()> {
    println!("YASKU Configurator");
    println!("-------------------");

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let webhook = read_line(&mut input, "Webhook url: ")?;

    println!("Enter topics (add topics one by one, press Enter on empty line to finish):");
    let mut topics = Vec::new();
    loop {
        let topic = read_line(&mut input, "Topic: ")?;
        if topic.is_empty() {
            break;
        }
        topics.push(topic);
    }

    let mut config = Config::default();
    config.discord_webhook = webhook;
    if !topics.is_empty() {
        config.topics = topics;
    }

    let path = Config::config_path()?;
    config.save(&path)?;

    println!();
    println!("Config file written to: {}", path.display());
    println!("You can edit this file manually if you wish.");
    Ok(())
}

/// Print a prompt and read one trimmed line from stdin.
fn read_line(input: &mut impl BufRead, label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut buffer = String::new();
    input.read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}
