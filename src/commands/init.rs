use std::io::{self, Write};

use crate::config::{data_dir, ensure_data_dir, env_file_path, write_env_file};
use crate::error::{Error, Result};

pub fn run(api_key: Option<String>, channel: Option<String>, force: bool) -> Result<()> {
    ensure_data_dir()?;

    let env_file = env_file_path();

    if env_file.exists() && !force {
        println!("Config already exists at {}", env_file.display());
        println!("Use --force to overwrite.");
        return Ok(());
    }

    let api_key = match api_key {
        Some(key) => key,
        None => prompt("Enter your YouTube Data API key: ")?,
    };

    if api_key.is_empty() {
        return Err(Error::Config("API key is required.".to_string()));
    }

    let channel = match channel {
        Some(channel) => Some(channel),
        None => Some(prompt("Default channel (ID, @handle or URL, blank for none): ")?)
            .filter(|c| !c.is_empty()),
    };

    write_env_file(&env_file, &api_key, channel.as_deref())?;

    println!("Config saved to {}", env_file.display());
    println!("Data directory: {}", data_dir().display());

    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
