use clap::{Parser, Subcommand};

use gqli::{term, CreateOpts, ModelOpts, ProjectDescription, ProjectRunner, RunOpts};

#[derive(Parser)]
#[command(name = "gqli", version, about = "Easily begin creating your Node/GraphQL server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: GqliCommand,
}

#[derive(Subcommand)]
enum GqliCommand {
    /// Creates project with given name
    Create(CreateOpts),
    /// Generates a new model
    CreateModel(ModelOpts),
    /// Runs the project in the current directory
    Run(RunOpts),
}

// Failures are presented here rather than bubbled into an exit code: a
// handled error prints and the process still exits 0, only clap usage
// errors terminate non-zero.
fn main() {
    let cli = Cli::parse();
    match cli.command {
        GqliCommand::Create(opts) => {
            let project = ProjectDescription::new(&opts);
            if let Err(err) = project.create() {
                term::error(&format!("{err:#}"));
            }
        }
        GqliCommand::CreateModel(opts) => {
            if let Err(err) = opts.run() {
                term::error(&format!("{err:#}"));
            }
        }
        GqliCommand::Run(opts) => {
            if ProjectRunner::new(&opts).run().is_err() {
                term::error("Error, are you in your project directory?");
            }
        }
    }
}
