use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# dwfbind configuration

[library]
# Path of the native dwf library; the platform default when unset.
# path = "/usr/lib/libdwf.so"

[artifact]
# Signature artifact used by `census`, `summary` and `check-docs`;
# the embedded artifact when unset.
# path = "dwf_function_signatures.toml"

[logging]
# tracing filter directive; RUST_LOG and -v take precedence.
filter = "warn"
"#;

pub fn init_config(force: bool) -> Result<()> {
    init_config_in(Path::new("."), force)
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");

    Ok(())
}
