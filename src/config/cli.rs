use crate::config::toml_config::{TomlConfig, DEFAULT_CONFIG_FILE};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "room-inventory")]
#[command(about = "Classroom workstation inventory: text import/export and database storage")]
pub struct CliConfig {
    /// Path to TOML configuration file (created with defaults when missing)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Import an interchange text file into the database
    Migrate {
        /// Text file to import (overrides import.source)
        #[arg(short, long)]
        source: Option<String>,

        /// Clear the database before writing
        #[arg(long)]
        replace: bool,

        /// Parse and report without touching the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the posts of one room stored in the database
    List {
        #[arg(short, long)]
        prefix: String,

        #[arg(short, long, value_enum, default_value_t = ListFormat::Text)]
        format: ListFormat,
    },
    /// Write the posts of one room to an interchange text file
    Export {
        #[arg(short, long)]
        prefix: String,

        /// Destination file (overrides export.output)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Delete every stored post
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Text,
    Csv,
    Json,
}

impl CliConfig {
    /// Applies command-line overrides on top of the file configuration.
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        match &self.command {
            Command::Migrate {
                source, replace, ..
            } => {
                if let Some(source) = source {
                    config.import.source = source.clone();
                }
                if *replace {
                    config.import.replace_existing = true;
                }
            }
            Command::Export {
                output: Some(output),
                ..
            } => config.export.output = output.clone(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_migrate_overrides() {
        let cli = CliConfig::parse_from([
            "room-inventory",
            "migrate",
            "--source",
            "aula.txt",
            "--replace",
        ]);
        let mut config = TomlConfig::with_database("rooms.db");
        cli.apply_overrides(&mut config);

        assert_eq!(cli.config, DEFAULT_CONFIG_FILE);
        assert_eq!(config.import.source, "aula.txt");
        assert!(config.import.replace_existing);
    }

    #[test]
    fn test_parse_list_format() {
        let cli = CliConfig::parse_from([
            "room-inventory",
            "--verbose",
            "list",
            "--prefix",
            "IC",
            "--format",
            "json",
        ]);

        assert!(cli.verbose);
        match cli.command {
            Command::List { prefix, format } => {
                assert_eq!(prefix, "IC");
                assert_eq!(format, ListFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_export_output_override() {
        let cli = CliConfig::parse_from(["room-inventory", "export", "-p", "IC", "-o", "out.txt"]);
        let mut config = TomlConfig::with_database("rooms.db");
        cli.apply_overrides(&mut config);

        assert_eq!(config.export.output, "out.txt");
    }
}
