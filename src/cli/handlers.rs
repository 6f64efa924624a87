//! Subcommand handlers
//!
//! Each handler resolves configuration (CLI flags over environment), builds a
//! fresh API client bound to the request's credential, runs the service, and
//! returns a process exit code.

use super::commands::{DetectArgs, OutputFormatArg, ProvisionArgs};
use crate::config::PipewrightConfig;
use crate::github::GitHubClient;
use crate::service::ProvisionService;
use crate::workflow::WorkflowSource;
use crate::writeback::WriteOutcome;
use serde_json::json;
use tracing::error;

pub async fn handle_provision(args: &ProvisionArgs) -> i32 {
    let config = PipewrightConfig::default()
        .with_token(args.token.clone())
        .with_branch(args.branch.clone());

    let service = match build_service(&config) {
        Ok(service) => service,
        Err(code) => return code,
    };

    let source = match &args.reference {
        Some(reference) => WorkflowSource::Template {
            reference: reference.clone(),
        },
        None => WorkflowSource::Generated,
    };

    if args.dry_run {
        return handle_dry_run(&service, args, &source).await;
    }

    match service.provision(&args.repository, &source).await {
        Ok(report) => {
            let failed = report.write_outcome.is_failure();
            match args.format {
                OutputFormatArg::Json => match serde_json::to_string_pretty(&report) {
                    Ok(out) => println!("{out}"),
                    Err(err) => {
                        error!(%err, "failed to serialize report");
                        return 1;
                    }
                },
                OutputFormatArg::Human => {
                    println!("Detected language: {}", report.language_detected);
                    println!("Detection source:  {}", report.detection_source);
                    println!("Pipeline origin:   {}", report.origin);
                    match &report.write_outcome {
                        WriteOutcome::Created { path } => println!("Created {path}"),
                        WriteOutcome::Updated { path } => println!("Updated {path}"),
                        WriteOutcome::Failed { path, reason } => {
                            eprintln!("Failed to write {path}: {reason}")
                        }
                    }
                }
            }
            if failed {
                1
            } else {
                0
            }
        }
        Err(err) => {
            report_error(args.format, &err.to_string());
            1
        }
    }
}

async fn handle_dry_run(
    service: &ProvisionService<GitHubClient>,
    args: &ProvisionArgs,
    source: &WorkflowSource,
) -> i32 {
    match service.preview(&args.repository, source).await {
        Ok((detection, pipeline)) => {
            match args.format {
                OutputFormatArg::Json => {
                    let out = json!({
                        "language_detected": detection.tag,
                        "detection_source": detection.source,
                        "origin": pipeline.origin,
                        "destination_path": pipeline.destination_path,
                        "content": pipeline.content,
                    });
                    println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
                }
                OutputFormatArg::Human => {
                    println!("Detected language: {}", detection.tag);
                    println!("Would write {}:", pipeline.destination_path);
                    println!("{}", pipeline.content);
                }
            }
            0
        }
        Err(err) => {
            report_error(args.format, &err.to_string());
            1
        }
    }
}

pub async fn handle_detect(args: &DetectArgs) -> i32 {
    let config = PipewrightConfig::default()
        .with_token(args.token.clone())
        .with_branch(args.branch.clone());

    let service = match build_service(&config) {
        Ok(service) => service,
        Err(code) => return code,
    };

    let detection = service.detect(&args.repository).await;
    match args.format {
        OutputFormatArg::Json => {
            match serde_json::to_string_pretty(&detection) {
                Ok(out) => println!("{out}"),
                Err(err) => {
                    error!(%err, "failed to serialize detection");
                    return 1;
                }
            }
        }
        OutputFormatArg::Human => {
            println!("Detected language: {}", detection.tag);
            println!("Detection source:  {}", detection.source);
        }
    }
    0
}

fn build_service(config: &PipewrightConfig) -> Result<ProvisionService<GitHubClient>, i32> {
    if let Err(err) = config.validate() {
        eprintln!("Error: {err}");
        return Err(2);
    }

    let token = match config.require_token() {
        Ok(token) => token.to_string(),
        Err(err) => {
            eprintln!("Error: {err}");
            return Err(2);
        }
    };

    let client = match GitHubClient::with_api_root(token, config.api_root.clone()) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Error: {err}");
            return Err(1);
        }
    };

    Ok(ProvisionService::new(client, config.clone()))
}

fn report_error(format: OutputFormatArg, message: &str) {
    match format {
        OutputFormatArg::Json => {
            let out = json!({ "error": message });
            eprintln!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
        }
        OutputFormatArg::Human => eprintln!("Error: {message}"),
    }
}
