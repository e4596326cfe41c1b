use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use strand_core::config::constants::{SAVED_PIPELINES_FILE, SHARE_BASE_URL};
use strand_core::pipeline::OptionValue;

#[derive(Subcommand)]
pub enum Commands {
    /// List available transforms
    List,

    /// Run a pipeline and print its output
    Run {
        #[command(flatten)]
        pipeline: PipelineArgs,
        /// Print only the final output
        #[clap(short, long)]
        quiet: bool,
        /// Save the pipeline under this name
        #[clap(long)]
        save: Option<String>,
    },

    /// Print a share link for a pipeline
    Share {
        #[command(flatten)]
        pipeline: PipelineArgs,
        /// Print the encoded config instead of a link
        #[clap(long)]
        raw: bool,
        /// Base URL of the link
        #[clap(long, default_value = SHARE_BASE_URL)]
        base_url: String,
    },

    /// Decode a share link or encoded config
    Decode {
        /// Link or encoded config
        config: String,
    },

    /// List pipeline templates
    Templates,

    /// Manage saved pipelines
    Saved {
        #[command(subcommand)]
        cmd: SavedCommands,
    },
}

#[derive(Subcommand)]
pub enum SavedCommands {
    /// List saved pipelines
    List,
    /// Delete a saved pipeline
    Delete {
        /// Pipeline name
        name: String,
    },
}

/// Where the pipeline comes from and what it runs on
#[derive(Args)]
pub struct PipelineArgs {
    /// Transform id to append, repeatable
    #[clap(short = 't', long = "transform")]
    pub transforms: Vec<String>,
    /// Node option as <step>:<key>=<value>, steps counted from 1
    #[clap(short = 'O', long = "option", value_parser = parse_node_option)]
    pub options: Vec<NodeOption>,
    /// Start from a share link or encoded config
    #[clap(short, long, conflicts_with_all = ["template", "saved"])]
    pub config: Option<String>,
    /// Start from a template
    #[clap(long, conflicts_with = "saved")]
    pub template: Option<String>,
    /// Start from a saved pipeline
    #[clap(long)]
    pub saved: Option<String>,
    /// Input text
    #[clap(short, long, conflicts_with = "input_file")]
    pub input: Option<String>,
    /// Read input text from a file
    #[clap(short = 'f', long)]
    pub input_file: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeOption {
    pub step: usize,
    pub key: String,
    pub value: OptionValue,
}

pub fn parse_node_option(raw: &str) -> Result<NodeOption, String> {
    let (step, assignment) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected <step>:<key>=<value>, got '{raw}'"))?;
    let step: usize = step
        .trim()
        .parse()
        .ok()
        .filter(|step| *step > 0)
        .ok_or_else(|| format!("step must be a number starting at 1, got '{step}'"))?;
    let (key, value) = assignment
        .split_once('=')
        .ok_or_else(|| format!("expected <key>=<value> after the step, got '{assignment}'"))?;
    if key.is_empty() {
        return Err("option key must not be empty".to_string());
    }
    Ok(NodeOption {
        step,
        key: key.to_string(),
        value: OptionValue::parse_literal(value),
    })
}

/// Strand Command
#[derive(Parser)]
#[command(version, about = "Compose and run chains of text transforms")]
pub struct Cli {
    /// Saved pipelines file
    #[clap(long, global = true, default_value = SAVED_PIPELINES_FILE)]
    pub library: PathBuf,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_node_option() {
        assert_eq!(
            parse_node_option("2:indent=4"),
            Ok(NodeOption {
                step: 2,
                key: "indent".to_string(),
                value: OptionValue::Number(4.0),
            })
        );
        assert_eq!(
            parse_node_option("1:replacement=a=b").unwrap().value,
            OptionValue::Text("a=b".to_string())
        );
        assert!(parse_node_option("0:k=v").is_err());
        assert!(parse_node_option("k=v").is_err());
        assert!(parse_node_option("1:=v").is_err());
    }

    #[test]
    fn test_cli_parses_run() {
        let cli = Cli::try_parse_from([
            "strand", "run", "-t", "trim", "-t", "sha256", "-O", "2:uppercase=true", "-i", "x",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Run { pipeline, quiet, .. } => {
                assert_eq!(pipeline.transforms, vec!["trim", "sha256"]);
                assert_eq!(pipeline.options[0].value, OptionValue::Boolean(true));
                assert_eq!(pipeline.input.as_deref(), Some("x"));
                assert!(!quiet);
            }
            _ => panic!("expected run"),
        }
    }
}
