//! The `promptfixer init` command.

use anyhow::Result;

use promptfixer_providers::config::CONFIG_FILE_NAME;

pub fn execute() -> Result<()> {
    if std::path::Path::new(CONFIG_FILE_NAME).exists() {
        println!("{CONFIG_FILE_NAME} already exists, skipping.");
    } else {
        std::fs::write(CONFIG_FILE_NAME, SAMPLE_CONFIG)?;
        println!("Created {CONFIG_FILE_NAME}");
    }

    println!("\nNext steps:");
    println!("  1. Point [backend].base_url at your PromptFixer API");
    println!("  2. Export PROMPTFIXER_API_KEY if the API requires a key");
    println!("  3. Run: promptfixer analyze --prompt \"Write a blog intro about AI in marketing\"");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# promptfixer configuration

default_tone = "Creative"
demo_fallback = true
max_prompt_len = 1000

[backend]
type = "http"
base_url = "http://localhost:8000"
api_key = "${PROMPTFIXER_API_KEY}"
timeout_secs = 60

# Offline backend with scripted replies:
# [backend]
# type = "mock"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use promptfixer_providers::PromptFixerConfig;

    #[test]
    fn sample_config_parses() {
        let config: PromptFixerConfig = toml_from(SAMPLE_CONFIG);
        assert!(config.demo_fallback);
        assert_eq!(config.max_prompt_len, 1000);
    }

    fn toml_from(s: &str) -> PromptFixerConfig {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, s).unwrap();
        promptfixer_providers::config::load_config_from(Some(&path)).unwrap()
    }
}
