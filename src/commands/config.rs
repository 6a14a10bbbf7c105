use crate::core::config::{get_config_path, Config};
use crate::error::Result;

pub fn show_config() -> Result<()> {
    let path = get_config_path()?;
    let config = Config::load()?;

    println!("Configuration file: {}", path.display());
    println!();
    println!("  chunk_size:    {} bytes", config.chunk_size);
    println!("  user_agent:    {}", config.user_agent);
    println!("  show_progress: {}", config.show_progress);

    Ok(())
}
