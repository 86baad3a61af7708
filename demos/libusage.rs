use anyhow::Result;
use gqli::{CreateOpts, ProjectDescription};

fn main() -> Result<()> {
    let opts = CreateOpts {
        project_name: String::from("demo-api"),
        project_path: None,
        setup_mode: Some(String::from("blank")),
    };
    ProjectDescription::new(&opts).create()
}
