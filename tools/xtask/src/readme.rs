use std::env;
use std::fs;
use std::io::Write;
use std::process;

fn cmd(args: Vec<&str>) -> String {
    let mut child = process::Command::new("./target/debug/resumatch");
    for arg in args {
        child.arg(arg);
    }

    for (key, _) in env::vars() {
        if key.starts_with("RESUMATCH_") {
            child.env(key, "");
        }
    }

    return String::from_utf8(child.env("NO_COLOR", "1").output().unwrap().stdout).unwrap();
}

fn subcommand_help(args: Vec<&str>) -> String {
    return cmd(args)
        .split("Options:")
        .next()
        .unwrap()
        .trim()
        .to_string();
}

fn replace_marker(readme: &mut String, marker: &str, content: &str) {
    let start_tag = format!("<!-- {marker} start -->");
    let end_tag = format!("<!-- {marker} end -->");
    let start = readme.find(&start_tag).unwrap();
    let end = readme.find(&end_tag).unwrap();
    readme.replace_range(start..end, &format!("{start_tag}\n```\n{content}\n```\n"));
}

pub fn update() {
    let output_help = cmd(vec!["--help"]);
    let output_analyze = subcommand_help(vec!["analyze", "--help"]);
    let output_config = subcommand_help(vec!["config", "--help"]);

    let mut readme = fs::read_to_string("./README.md").unwrap();
    replace_marker(&mut readme, "command-help", output_help.trim_end());
    replace_marker(&mut readme, "command-analyze", &output_analyze);
    replace_marker(&mut readme, "command-config", &output_config);

    readme = readme.replace(&env::var("HOME").unwrap(), "~");

    let mut f = fs::File::create("./README.md").unwrap();
    f.write_all(readme.as_bytes()).unwrap();
}
