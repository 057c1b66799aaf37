use anyhow::Result;
use crewcal_core::CrewcalConfig;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let config_path = CrewcalConfig::config_path()?;

    if !config_path.exists() {
        CrewcalConfig::create_default_config(&config_path)?;
        println!("Created {}", config_path.display());
    }

    let config = CrewcalConfig::load_from(&config_path)?;

    println!("{}", "Config".bold());
    println!("  File:         {}", config_path.display());
    println!("  Extractor:    {}", config.extractor);
    println!("  PDF to text:  {}", config.pdf_to_text.join(" "));
    println!("  Timeout:      {}s", config.timeout_secs);
    if let Some(dir) = &config.hotel_dir {
        println!("  Hotels:       {}", dir.display());
    }

    Ok(())
}
