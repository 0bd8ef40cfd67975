use super::ShareContent;
use crate::domain::models::AnalysisResult;

#[test]
fn it_uses_high_without_a_result() {
    let content = ShareContent::for_result(None, "http://localhost:5000");

    assert_eq!(content.title, "My Resume Analysis Results");
    insta::assert_snapshot!(content.text, @"I got a high% match for this job position!");
    assert_eq!(content.url, "http://localhost:5000");
}

#[test]
fn it_uses_high_without_a_score() {
    let res = AnalysisResult::default();
    let content = ShareContent::for_result(Some(&res), "http://localhost:5000");

    assert_eq!(content.text, "I got a high% match for this job position!");
}

#[test]
fn it_uses_the_match_score() {
    let res = AnalysisResult::mock();
    let content = ShareContent::for_result(Some(&res), "http://localhost:5000");

    insta::assert_snapshot!(content.text, @"I got a 78% match for this job position!");
}

#[test]
fn it_formats_the_command_message() {
    let res = AnalysisResult {
        match_score: Some(0),
        ..AnalysisResult::default()
    };
    let content = ShareContent::for_result(Some(&res), "https://example.com");

    assert_eq!(
        content.to_message(),
        "My Resume Analysis Results\n\nI got a 0% match for this job position!\nhttps://example.com\n"
    );
}
