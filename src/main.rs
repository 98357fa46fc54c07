//src/main.rs
mod cli; // Keep cli module for parsing args

use anyhow::{bail, Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use std::io::{stdin, stdout, BufRead, Write};
use std::str::FromStr;

use training_plan_lib::{
    format_minutes, EntryField, ExerciseTemplate, PlanEditor, PlanModel, PlannerService,
    SubmitOutcome,
};

const HEADER_COLOR: Color = Color::Green;

const COMPOSE_HELP: &str = "\
Commands:
  name <plan name>             Set the plan name
  add                          Add an exercise (seeded from the first catalog entry)
  set <n> <field> <value>      Edit entry n; field is exercise, sets or reps
  remove <n>                   Remove entry n (the first entry cannot be removed)
  show                         Show the plan
  catalog                      List available exercises
  submit                       Submit the plan
  cancel                       Discard the plan and exit
  help                         Show this help";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli_args = cli::parse_args();

    if let cli::Commands::GenerateCompletion { shell } = cli_args.command {
        let mut cmd = cli::build_cli_command();
        let bin_name = cmd.get_name().to_string();

        eprintln!("Generating completion script for {}...", shell);
        clap_complete::generate(shell, &mut cmd, bin_name, &mut stdout());
        return Ok(());
    }

    let service = PlannerService::initialize().context("Failed to initialize planner service")?;

    match cli_args.command {
        cli::Commands::GenerateCompletion { .. } => {
            unreachable!("Completion generation should have exited already");
        }
        cli::Commands::Catalog => print_catalog_table(service.list_templates()),
        cli::Commands::ConfigPath => println!("{}", service.get_config_path().display()),
        cli::Commands::Preview { name, exercises } => {
            let editor = service.compose(&name, &exercises)?;
            print_plan(editor.model());
            let payload = editor.model().to_payload()?;
            println!("Request body:");
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("Failed to serialize plan payload")?
            );
        }
        cli::Commands::Create { name, exercises } => {
            let mut editor = service.compose(&name, &exercises)?;
            print_plan(editor.model());
            match editor.submit().await {
                SubmitOutcome::Submitted => {
                    println!("Training plan '{}' created successfully.", name.trim())
                }
                SubmitOutcome::Invalid(reason) => bail!("{}", reason),
                SubmitOutcome::Failed(failure) => {
                    bail!("Error creating training plan: {}", failure)
                }
                SubmitOutcome::InFlight | SubmitOutcome::Abandoned => {
                    bail!("Training plan submission did not complete.")
                }
            }
        }
        cli::Commands::Compose => run_compose(service.open_editor()).await?,
    }

    Ok(())
}

/// Reads intents from stdin until the plan is submitted or the editor is cancelled.
async fn run_compose(mut editor: PlanEditor) -> Result<()> {
    println!("Composing a new training plan. Type 'help' for commands.");
    let stdin = stdin();
    let mut lines = stdin.lock().lines();

    while editor.is_open() {
        print!("plan> ");
        stdout().flush()?;
        let Some(line) = lines.next() else {
            println!();
            editor.cancel();
            println!("Plan discarded.");
            return Ok(());
        };
        let line = line.context("Failed to read input")?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();

        match command {
            "name" => {
                if let Err(e) = editor.set_name(&args.join(" ")) {
                    println!("Error: {}", e);
                }
            }
            "add" => {
                let index = editor.add_entry()?;
                println!("Added exercise {}.", index + 1);
                print_plan(editor.model());
            }
            "set" => match set_command(&mut editor, &args) {
                Ok(()) => print_plan(editor.model()),
                Err(e) => println!("Error: {}", e),
            },
            "remove" => match remove_command(&mut editor, &args) {
                Ok(()) => print_plan(editor.model()),
                Err(e) => println!("Error: {}", e),
            },
            "show" => print_plan(editor.model()),
            "catalog" => print_catalog_table(editor.templates()),
            "submit" => match editor.submit().await {
                SubmitOutcome::Submitted => println!("Training plan created successfully."),
                SubmitOutcome::Invalid(reason) => println!("{}", reason),
                SubmitOutcome::Failed(failure) => {
                    println!("Error creating training plan: {}", failure);
                    println!("Your plan was kept; fix the problem and submit again.");
                }
                SubmitOutcome::InFlight => println!("A submission is already in progress."),
                SubmitOutcome::Abandoned => println!("Editor closed; submission ignored."),
            },
            "cancel" => {
                editor.cancel();
                println!("Plan discarded.");
                return Ok(());
            }
            "help" => println!("{}", COMPOSE_HELP),
            other => println!("Unknown command '{}'. Type 'help' for commands.", other),
        }
    }
    Ok(())
}

/// Converts a 1-based entry number typed by the user into an index.
fn parse_entry_number(arg: &str, len: usize) -> Result<usize> {
    let number: usize = arg
        .parse()
        .with_context(|| format!("'{}' is not an exercise number", arg))?;
    if number == 0 || number > len {
        bail!("No exercise {} (plan has {}).", number, len);
    }
    Ok(number - 1)
}

fn parse_set_args(args: &[&str], len: usize) -> Result<(usize, EntryField, String)> {
    let [number, field, value @ ..] = args else {
        bail!("Usage: set <n> <field> <value>");
    };
    let index = parse_entry_number(number, len)?;
    let field =
        EntryField::from_str(field).with_context(|| format!("Unknown field '{}'", field))?;
    Ok((index, field, value.join(" ")))
}

fn set_command(editor: &mut PlanEditor, args: &[&str]) -> Result<()> {
    let (index, field, value) = parse_set_args(args, editor.model().len())?;
    editor.update_entry_field(index, field, &value)?;
    Ok(())
}

/// Removes entry n, refusing the first one.
fn remove_command(editor: &mut PlanEditor, args: &[&str]) -> Result<()> {
    let [number] = args else {
        bail!("Usage: remove <n>");
    };
    let index = parse_entry_number(number, editor.model().len())?;
    if index == 0 {
        bail!("The first exercise cannot be removed.");
    }
    editor.remove_entry(index)?;
    Ok(())
}

fn print_catalog_table(templates: &[ExerciseTemplate]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").fg(HEADER_COLOR),
            Cell::new("Minutes/Set").fg(HEADER_COLOR),
            Cell::new("Default Sets").fg(HEADER_COLOR),
            Cell::new("Default Reps").fg(HEADER_COLOR),
        ]);

    for template in templates {
        table.add_row(vec![
            Cell::new(&template.name),
            Cell::new(format_minutes(template.duration_per_set)),
            Cell::new(template.default_sets),
            Cell::new(template.default_repetitions),
        ]);
    }
    println!("{table}");
}

fn print_plan(model: &PlanModel) {
    let name = if model.name().trim().is_empty() { "(unnamed)" } else { model.name() };
    println!("Plan: {}", name);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").fg(HEADER_COLOR),
            Cell::new("Exercise").fg(HEADER_COLOR),
            Cell::new("Sets").fg(HEADER_COLOR),
            Cell::new("Reps").fg(HEADER_COLOR),
        ]);

    for (i, entry) in model.entries().iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(entry.exercise_name()),
            Cell::new(entry.sets()),
            Cell::new(entry.repetitions()),
        ]);
    }
    println!("{table}");
    println!("Total duration: {} minutes", format_minutes(model.total_duration_minutes()));
}
