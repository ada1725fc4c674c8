//! Check command implementation
//!
//! This module implements the `check` command, which reports whether a store
//! satisfies a schema without printing the values.

use super::BindTarget;
use crate::log_binding_error;
use clap::Args;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub target: BindTarget,
}

impl CheckArgs {
    /// Execute the check command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(
            schema = %self.target.schema,
            store = %self.target.store,
            "Checking configuration"
        );

        match self.target.bind()? {
            Ok(config) => {
                println!(
                    "✅ {} satisfies {} ({} options)",
                    self.target.store,
                    self.target.schema,
                    config.len()
                );
                Ok(0)
            }
            Err(e) => {
                log_binding_error!(&e, "check");
                println!("❌ {} does not satisfy {}", self.target.store, self.target.schema);
                println!("   Error: {e}");
                Ok(2) // Configuration error exit code
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_check_reports_invalid_store() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.toml");
        fs::write(&schema, "[[option]]\nname = \"port\"\ntype = \"u16\"\n").unwrap();
        let store = dir.path().join("app.conf");
        fs::write(&store, "port=http\n").unwrap();

        let args = CheckArgs {
            target: BindTarget {
                schema: schema.to_string_lossy().to_string(),
                store: store.to_string_lossy().to_string(),
                format: Some("properties".to_string()),
            },
        };
        assert_eq!(args.execute().unwrap(), 2);
    }

    #[test]
    fn test_check_missing_schema_file() {
        let args = CheckArgs {
            target: BindTarget {
                schema: "/nonexistent/schema.toml".to_string(),
                store: "/nonexistent/app.json".to_string(),
                format: None,
            },
        };
        assert_eq!(args.execute().unwrap(), 2);
    }
}
