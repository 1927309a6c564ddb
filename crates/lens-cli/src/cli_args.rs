use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "lens",
    about = "Render replay focus-area panels from recorded replay payloads",
    version
)]
pub struct Cli {
    #[arg(
        long,
        env = "LENS_CONFIG",
        global = true,
        help = "Optional TOML file with [navigation] overrides"
    )]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Dispatch one render and print the resulting HTML.
    Render(RenderArgs),
    /// List the focus-area tabs with their enabled/default status.
    Tabs,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    #[arg(
        long,
        help = "Replay view location, absolute or origin-relative, e.g. /replays/abc/?t_main=network"
    )]
    pub url: String,

    #[arg(
        long,
        help = "Replay record JSON. Omit to render as if the replay is still loading"
    )]
    pub replay: Option<PathBuf>,

    #[arg(
        long = "current-time-ms",
        default_value_t = 0,
        help = "Playback position used to mark rows as past or future"
    )]
    pub current_time_ms: u64,

    #[arg(long = "hover-time-ms", help = "Hovered timeline position, if any")]
    pub hover_time_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::{Cli, CliCommand};

    #[test]
    fn unit_render_arguments_parse_with_defaults() {
        let cli = Cli::try_parse_from(["lens", "render", "--url", "/replays/r-1/"])
            .expect("render args should parse");
        let CliCommand::Render(args) = cli.command else {
            panic!("expected render command");
        };
        assert_eq!(args.url, "/replays/r-1/");
        assert_eq!(args.replay, None);
        assert_eq!(args.current_time_ms, 0);
        assert_eq!(args.hover_time_ms, None);
    }

    #[test]
    fn functional_global_config_flag_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["lens", "tabs", "--config", "lens.toml"])
            .expect("tabs args should parse");
        assert!(matches!(cli.command, CliCommand::Tabs));
        assert_eq!(cli.config, Some(PathBuf::from("lens.toml")));
    }

    #[test]
    fn regression_render_requires_url() {
        let error = Cli::try_parse_from(["lens", "render"]).expect_err("url is required");
        assert!(error.to_string().contains("--url"));
    }
}
