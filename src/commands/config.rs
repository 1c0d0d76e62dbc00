use fmtree::config::{ConfigLoader, LoadOutcome};

pub struct Config;

impl Config {
    pub fn execute(config: &str) -> anyhow::Result<()> {
        match ConfigLoader::load(config)? {
            LoadOutcome::Loaded { options, source } => {
                println!("Source:  {source}");
                println!("Options: {}", options.len());
                for (key, value) in options.iter() {
                    println!("  {key}={value}");
                }
            }
            LoadOutcome::NotFound { requested } => {
                println!("Configuration {requested} not found, formatter defaults apply");
            }
        }
        Ok(())
    }
}
