use std::fs;

use anyhow::Result;
use test_utils::job_description_fixture;
use test_utils::resume_text_fixture;

use super::analyze_headless;
use super::build;
use crate::domain::models::FailurePolicy;
use crate::infrastructure::backends::mock::MockBackend;

fn fixtures(dir: &tempfile::TempDir, job_description: &str) -> Result<(String, String)> {
    let resume_path = dir.path().join("resume.txt");
    fs::write(&resume_path, resume_text_fixture())?;
    let job_path = dir.path().join("job.txt");
    fs::write(&job_path, job_description)?;

    return Ok((
        resume_path.to_string_lossy().to_string(),
        job_path.to_string_lossy().to_string(),
    ));
}

#[test]
fn it_builds_a_valid_command() {
    build().debug_assert();
}

#[test]
fn it_parses_the_analyze_subcommand() -> Result<()> {
    let matches = build().try_get_matches_from(vec![
        "resumatch",
        "analyze",
        "-r",
        "resume.pdf",
        "-j",
        "job.txt",
        "--output",
        "out.html",
    ])?;

    let (name, subcmd_matches) = matches.subcommand().unwrap();
    assert_eq!(name, "analyze");
    assert_eq!(
        subcmd_matches.get_one::<String>("resume").unwrap(),
        "resume.pdf"
    );
    assert_eq!(
        subcmd_matches.get_one::<String>("output").unwrap(),
        "out.html"
    );

    return Ok(());
}

#[tokio::test]
async fn it_prints_the_report() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (resume, job) = fixtures(&dir, job_description_fixture())?;

    let text = analyze_headless(
        Box::<MockBackend>::default(),
        FailurePolicy::Mock,
        &resume,
        &job,
        None,
        None,
    )
    .await?;

    assert!(text.starts_with("Match Score: 78%\n\nJOB SUITABILITY"));
    assert!(text.contains("Good match for this position"));

    return Ok(());
}

#[tokio::test]
async fn it_writes_the_download_and_report() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (resume, job) = fixtures(&dir, job_description_fixture())?;
    let output = dir.path().join("resume.html").to_string_lossy().to_string();
    let report = dir.path().join("report.html").to_string_lossy().to_string();

    analyze_headless(
        Box::<MockBackend>::default(),
        FailurePolicy::Mock,
        &resume,
        &job,
        Some(&output),
        Some(&report),
    )
    .await?;

    assert!(fs::read_to_string(&output)?.contains("<title>Optimized Resume</title>"));
    assert!(fs::read_to_string(&report)?.contains("<p>78%</p>"));

    return Ok(());
}

#[tokio::test]
async fn it_requires_a_resume() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (_, job) = fixtures(&dir, job_description_fixture())?;

    let res = analyze_headless(
        Box::<MockBackend>::default(),
        FailurePolicy::Mock,
        "",
        &job,
        None,
        None,
    )
    .await;

    assert_eq!(
        res.unwrap_err().to_string(),
        "Please upload a resume file to proceed."
    );

    return Ok(());
}

#[tokio::test]
async fn it_requires_a_long_enough_description() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (resume, job) = fixtures(&dir, "Rust engineer wanted")?;

    let res = analyze_headless(
        Box::<MockBackend>::default(),
        FailurePolicy::Mock,
        &resume,
        &job,
        None,
        None,
    )
    .await;

    assert_eq!(
        res.unwrap_err().to_string(),
        "Please enter a job description (min 50 characters)."
    );

    return Ok(());
}
