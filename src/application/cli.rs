#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::job_description_ready;
use crate::domain::models::AnalysisRequest;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendName;
use crate::domain::models::FailurePolicy;
use crate::domain::models::ResultSource;
use crate::domain::models::ResultView;
use crate::domain::models::ResumeFile;
use crate::domain::models::ValidationError;
use crate::domain::services::actions::analyze_with_policy;
use crate::domain::services::actions::help_text;
use crate::domain::services::export::standalone_document;
use crate::domain::services::html::report_html;
use crate::domain::services::results_screen::DEMO_BADGE_TEXT;
use crate::domain::services::text_render::plain_text;
use crate::domain::services::text_render::result_lines;
use crate::infrastructure::backends::BackendManager;

const REPORT_WIDTH: usize = 80;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

pub fn log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("RESUMATCH_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("resumatch");
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

/// Headless analysis. Validates the same predicates as the wizard, applies
/// the failure policy and returns the report printed to stdout.
pub async fn analyze_headless(
    backend: BackendBox,
    failure_policy: FailurePolicy,
    resume_path: &str,
    job_description_file: &str,
    output: Option<&String>,
    report: Option<&String>,
) -> Result<String> {
    if resume_path.is_empty() {
        return Err(ValidationError::ResumeRequired.into());
    }
    let resume = ResumeFile::open(resume_path).await?;

    let mut job_description = "".to_string();
    if !job_description_file.is_empty() {
        job_description = fs::read_to_string(job_description_file).await?;
    }
    if !job_description_ready(&job_description) {
        return Err(ValidationError::JobDescriptionTooShort.into());
    }

    let request = AnalysisRequest::new(resume, &job_description);
    let outcome = analyze_with_policy(&backend, &request, failure_policy).await?;
    let view = ResultView::build(&outcome.result);

    let mut text = format!("Match Score: {}%\n\n", view.score);
    text.push_str(&plain_text(&result_lines(&view, REPORT_WIDTH).lines));

    if outcome.source == ResultSource::Fallback {
        eprintln!("{}", Paint::yellow(DEMO_BADGE_TEXT));
    }

    if let Some(output) = output {
        if !outcome.result.has_optimized_resume() {
            return Err(ValidationError::NoResultToDownload.into());
        }
        fs::write(output, standalone_document(&outcome.result.optimized_resume)).await?;
        eprintln!("Resume downloaded successfully! Saved to {output}");
    }

    if let Some(report) = report {
        fs::write(report, report_html(&view)).await?;
        eprintln!("Report saved to {report}");
    }

    return Ok(text);
}

fn subcommand_analyze() -> Command {
    return Command::new("analyze")
        .about("Runs an analysis without the interactive wizard and prints the results. Requires --resume and --job-description-file.")
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Writes the optimized resume as a standalone HTML document to this path.")
                .num_args(1),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .help("Writes every result section as an HTML fragment to this path.")
                .num_args(1),
        );
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    let mut cmd = Command::new("debug");
    cmd = cmd.about("Debug helpers for Resumatch")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Resumatch with environment variable RUST_LOG=resumatch")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );

    return cmd;
}

fn arg_api_url() -> Arg {
    return Arg::new(ConfigKey::ApiUrl.to_string())
        .long(ConfigKey::ApiUrl.to_string())
        .env("RESUMATCH_API_URL")
        .num_args(1)
        .help(format!(
            "Base URL of the resume analysis service. [default: {}]",
            Config::default(ConfigKey::ApiUrl)
        ))
        .global(true);
}

fn arg_backend() -> Arg {
    return Arg::new(ConfigKey::Backend.to_string())
        .short('b')
        .long(ConfigKey::Backend.to_string())
        .env("RESUMATCH_BACKEND")
        .num_args(1)
        .help(format!(
            "Where analyses are sent. The mock backend answers with demo data without touching the network. [default: {}]",
            Config::default(ConfigKey::Backend)
        ))
        .value_parser(PossibleValuesParser::new(BackendName::VARIANTS))
        .global(true);
}

fn arg_health_check_timeout() -> Arg {
    return Arg::new(ConfigKey::HealthCheckTimeout.to_string())
        .long(ConfigKey::HealthCheckTimeout.to_string())
        .env("RESUMATCH_HEALTH_CHECK_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds before timing out the startup health check. [default: {}]",
            Config::default(ConfigKey::HealthCheckTimeout)
        ))
        .global(true);
}

fn arg_request_timeout() -> Arg {
    return Arg::new(ConfigKey::RequestTimeout.to_string())
        .long(ConfigKey::RequestTimeout.to_string())
        .env("RESUMATCH_REQUEST_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds for an analysis before treating it as failed. [default: {}]",
            Config::default(ConfigKey::RequestTimeout)
        ))
        .global(true);
}

fn arg_on_failure() -> Arg {
    return Arg::new(ConfigKey::OnFailure.to_string())
        .long(ConfigKey::OnFailure.to_string())
        .env("RESUMATCH_ON_FAILURE")
        .num_args(1)
        .help(format!(
            "What to do when an analysis fails. mock shows demo results, error reports the failure. [default: {}]",
            Config::default(ConfigKey::OnFailure)
        ))
        .value_parser(PossibleValuesParser::new(FailurePolicy::VARIANTS))
        .global(true);
}

fn arg_download_dir() -> Arg {
    return Arg::new(ConfigKey::DownloadDir.to_string())
        .long(ConfigKey::DownloadDir.to_string())
        .env("RESUMATCH_DOWNLOAD_DIR")
        .num_args(1)
        .help(format!(
            "Directory the optimized resume is downloaded to. [default: {}]",
            Config::default(ConfigKey::DownloadDir)
        ))
        .global(true);
}

fn arg_share_command() -> Arg {
    return Arg::new(ConfigKey::ShareCommand.to_string())
        .long(ConfigKey::ShareCommand.to_string())
        .env("RESUMATCH_SHARE_COMMAND")
        .num_args(1)
        .help("Command that receives the share text on stdin. The link is copied to the clipboard when unset.")
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.ends_with(':') {
                return Paint::new(line.to_string())
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("resumatch")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_analyze())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(arg_api_url())
        .arg(arg_backend())
        .arg(arg_health_check_timeout())
        .arg(arg_request_timeout())
        .arg(arg_on_failure())
        .arg(arg_download_dir())
        .arg(arg_share_command())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("RESUMATCH_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::Resume.to_string())
                .short('r')
                .long(ConfigKey::Resume.to_string())
                .num_args(1)
                .help("Resume to attach on startup. PDF, DOC, DOCX or TXT, up to 10MB.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::JobDescriptionFile.to_string())
                .short('j')
                .long(ConfigKey::JobDescriptionFile.to_string())
                .num_args(1)
                .help("Text file to prefill the job description from.")
                .global(true),
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = log_dir().join("debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("analyze", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;

            let backend_name = Config::get(ConfigKey::Backend);
            let backend = match BackendName::parse(backend_name.to_string()) {
                Some(name) => BackendManager::get(name),
                None => bail!(format!("Unknown backend {backend_name}")),
            };

            let text = analyze_headless(
                backend,
                FailurePolicy::parse(&Config::get(ConfigKey::OnFailure))?,
                &Config::get(ConfigKey::Resume),
                &Config::get(ConfigKey::JobDescriptionFile),
                subcmd_matches.get_one::<String>("output"),
                subcmd_matches.get_one::<String>("report"),
            )
            .await?;
            println!("{text}");
            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
