use clap::{Parser, Subcommand, ValueEnum};

/// Auto-provisions GitHub Actions CI workflows from a repository's Dockerfile
#[derive(Parser, Debug)]
#[command(
    name = "pipewright",
    about = "Auto-provisions GitHub Actions CI workflows from a repository's Dockerfile",
    version,
    long_about = "pipewright inspects a GitHub repository, infers its primary language from \
                  the Dockerfile's base images (falling back to root-level marker files), \
                  and commits a matching CI workflow back through the contents API."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Verbose output (debug logging)")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Detect a repository's language and commit a CI workflow",
        long_about = "Detects the repository's language and commits a matching workflow to \
                      .github/workflows/ci.yml on the configured branch.\n\n\
                      Examples:\n  \
                      pipewright provision octocat/hello-world\n  \
                      pipewright provision octocat/hello-world --reference org/ci-templates\n  \
                      pipewright provision octocat/hello-world --dry-run --format json"
    )]
    Provision(ProvisionArgs),

    #[command(
        about = "Report the detected language without writing anything",
        long_about = "Runs only the detection step and reports the language tag and which \
                      evidence produced it.\n\n\
                      Examples:\n  \
                      pipewright detect octocat/hello-world\n  \
                      pipewright detect octocat/hello-world --format json"
    )]
    Detect(DetectArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ProvisionArgs {
    #[arg(value_name = "OWNER/REPO", help = "Target repository full name")]
    pub repository: String,

    #[arg(
        long,
        value_name = "OWNER/REPO",
        help = "Copy {language}-ci.yml from this reference repository instead of generating YAML"
    )]
    pub reference: Option<String>,

    #[arg(
        long,
        value_name = "TOKEN",
        help = "GitHub token (overrides the GITHUB_TOKEN environment variable)"
    )]
    pub token: Option<String>,

    #[arg(long, value_name = "BRANCH", help = "Target branch (default: main)")]
    pub branch: Option<String>,

    #[arg(long, help = "Resolve and print the workflow without committing")]
    pub dry_run: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(value_name = "OWNER/REPO", help = "Target repository full name")]
    pub repository: String,

    #[arg(
        long,
        value_name = "TOKEN",
        help = "GitHub token (overrides the GITHUB_TOKEN environment variable)"
    )]
    pub token: Option<String>,

    #[arg(long, value_name = "BRANCH", help = "Target branch (default: main)")]
    pub branch: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    /// Human-readable text
    Human,
    /// Machine-readable JSON
    Json,
}
