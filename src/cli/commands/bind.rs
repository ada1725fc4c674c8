//! Bind command implementation
//!
//! This module implements the `bind` command, which prints the bound
//! configuration tree.

use super::BindTarget;
use crate::log_binding_error;
use clap::Args;

/// Arguments for the bind command
#[derive(Args, Debug)]
pub struct BindArgs {
    #[command(flatten)]
    pub target: BindTarget,
}

impl BindArgs {
    /// Execute the bind command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(
            schema = %self.target.schema,
            store = %self.target.store,
            "Binding configuration"
        );

        match self.target.bind()? {
            Ok(config) => {
                print!("{config}");
                Ok(0)
            }
            Err(e) => {
                log_binding_error!(&e, "bind");
                eprintln!("Error: {e}");
                Ok(2) // Configuration error exit code
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args(dir: &std::path::Path, store_name: &str, store: &str) -> BindArgs {
        let schema_path = dir.join("app.schema.toml");
        fs::write(
            &schema_path,
            "[[option]]\nname = \"name\"\ntype = \"string\"\n",
        )
        .unwrap();
        let store_path = dir.join(store_name);
        fs::write(&store_path, store).unwrap();
        BindArgs {
            target: BindTarget {
                schema: schema_path.to_string_lossy().to_string(),
                store: store_path.to_string_lossy().to_string(),
                format: None,
            },
        }
    }

    #[test]
    fn test_bind_success_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(dir.path(), "app.properties", "name=demo\n");
        assert_eq!(args.execute().unwrap(), 0);
    }

    #[test]
    fn test_bind_missing_value_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(dir.path(), "app.json", "{}");
        assert_eq!(args.execute().unwrap(), 2);
    }

    #[test]
    fn test_bind_unknown_format_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(dir.path(), "app.json", "{}");
        args.target.format = Some("ini".to_string());
        assert!(args.execute().is_err());
    }
}
