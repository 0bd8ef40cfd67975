use anyhow::Result;

use super::CommandShare;
use crate::domain::models::ShareContent;
use crate::domain::models::ShareTarget;

fn content() -> ShareContent {
    return ShareContent::for_result(None, "http://localhost:5000");
}

#[test]
fn it_splits_program_and_args() {
    let share = CommandShare::new("  notify-send  --app-name resumatch ");

    assert_eq!(share.program, "notify-send");
    assert_eq!(share.args, vec!["--app-name", "resumatch"]);
}

#[tokio::test]
async fn it_pipes_the_message_to_the_command() -> Result<()> {
    let share = CommandShare::new("cat");
    let msg = share.share(&content()).await?;

    assert_eq!(msg, "Results shared!");

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_non_zero_exit() {
    let share = CommandShare::new("false");
    let res = share.share(&content()).await;

    assert!(res.is_err());
}

#[tokio::test]
async fn it_fails_on_missing_programs() {
    let share = CommandShare::new("resumatch-share-command-that-does-not-exist");
    let res = share.share(&content()).await;

    assert!(res.is_err());
}
