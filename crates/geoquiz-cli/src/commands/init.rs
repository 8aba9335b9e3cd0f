//! The `geoquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    let path = std::path::Path::new("geoquiz.toml");
    if path.exists() {
        println!("geoquiz.toml already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_CONFIG)?;
        println!("Created geoquiz.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit geoquiz.toml with your Supabase project url and anon key");
    println!("  2. Run: geoquiz signup --email you@example.com --handle YourHandle");
    println!("  3. Run: geoquiz --user YourHandle play --domain Europe --level 1");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# geoquiz configuration

# Domain used when --domain is omitted: Monde, Europe, Afrique, Asie, Amériques, Océanie
default_domain = "Monde"
request_timeout_secs = 30

# Remove this section to play offline.
[backend]
url = "${GEOQUIZ_SUPABASE_URL}"
anon_key = "${GEOQUIZ_SUPABASE_ANON_KEY}"
"#;
