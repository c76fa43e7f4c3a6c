use super::commands::ItemCommand;
use super::timer_mode::run_countdown;
use crate::app::App;
use crate::domain::{format_spent_time, ItemStatus};
use crate::error::parse_id;
use crate::service::TaskService;
use crate::timer::{CountdownSession, TimerState};
use crate::ui::task_listing;
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::sync::Arc;
use tracing::debug;

const PROMPT: &str = ">>> ";

/// One line typed at the task prompt
#[derive(Parser, Debug)]
#[command(no_binary_name = true, name = "tasks", disable_version_flag = true)]
struct ReplLine {
    #[command(subcommand)]
    command: ReplCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum ReplCommand {
    #[command(flatten)]
    Item(ItemCommand),
    /// Start a countdown on a task
    #[command(name = "t")]
    Countdown {
        task_id: String,
        /// Countdown length in minutes
        #[arg(long)]
        time: Option<u64>,
    },
}

/// Split a command line on whitespace, keeping quoted text together
pub fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_word = false;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(anyhow!("unterminated quote"));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Interactive task prompt for one project
pub struct Repl<'a> {
    app: &'a App,
    tasks: Arc<TaskService>,
    project_name: String,
}

impl<'a> Repl<'a> {
    /// Fails when `project_id` is not numeric or the project does not exist
    pub fn open(app: &'a App, project_id: &str) -> Result<Self> {
        if !app.projects().exists(project_id) {
            return Err(anyhow!("Project with ID={} not found", project_id));
        }
        let tasks = app.task_service(project_id)?;
        let project_name = app.projects().name_of(parse_id(project_id)?);
        Ok(Self {
            app,
            tasks,
            project_name,
        })
    }

    pub fn run(&self) -> Result<()> {
        println!("Welcome to the Task Management CLI - Interactive Mode");
        println!("Project: {}. Type 'help' for commands, 'exit' to leave.", self.project_name);

        let stdin = io::stdin();
        let mut line = String::new();
        loop {
            print!("{}", PROMPT);
            io::stdout().flush()?;

            line.clear();
            if stdin.read_line(&mut line)? == 0 {
                println!();
                return Ok(());
            }

            match line.trim() {
                "" => continue,
                "exit" | "quit" => return Ok(()),
                input => {
                    if let Err(e) = self.execute(input) {
                        println!("Error: {}", e);
                    }
                }
            }
        }
    }

    /// Parse and run one input line
    fn execute(&self, input: &str) -> Result<()> {
        let words = split_words(input)?;
        let command = match ReplLine::try_parse_from(words) {
            Ok(line) => line.command,
            Err(e) => {
                // Help output and usage errors are rendered by clap
                e.print()?;
                return Ok(());
            }
        };
        debug!(?command, "repl command");

        match command {
            ReplCommand::Item(command) => self.run_task_command(command),
            ReplCommand::Countdown { task_id, time } => self.countdown(&task_id, time),
        }
    }

    fn run_task_command(&self, command: ItemCommand) -> Result<()> {
        match command {
            ItemCommand::Add { name } => {
                let task = self.tasks.create(&name.join(" "))?;
                println!("Task \"{}\" added with ID={}", task.name, task.id);
            }
            ItemCommand::List { filter } => self.list(filter.filter())?,
            ItemCommand::Update { id, name } => {
                self.tasks.rename(&id, &name.join(" "))?;
            }
            ItemCommand::Delete { id, all } => match id {
                Some(id) if !all => self.tasks.delete(&id)?,
                _ => self.tasks.delete_all()?,
            },
            ItemCommand::Mark { id, status } => {
                self.tasks.set_status(&id, status.status())?;
            }
        }
        Ok(())
    }

    fn list(&self, filter: Option<ItemStatus>) -> Result<()> {
        let shown = self.tasks.list(filter)?;
        let total = self.tasks.count()?;
        task_listing(&self.project_name, &shown, total, &self.app.settings().date_format).print()
    }

    fn countdown(&self, task_id: &str, minutes: Option<u64>) -> Result<()> {
        let task = self.tasks.find_by_id(task_id)?;
        let minutes = minutes.unwrap_or(u64::from(self.app.settings().default_timer_minutes));
        let task_name = task.name.clone();

        let coordinator = self.app.coordinator(self.tasks.clone());
        let session = CountdownSession::new(task, minutes, coordinator)?;
        let report = run_countdown(self.app.runtime(), session, &task_name, minutes)?;

        if let Some(e) = report.save_error {
            println!("Error: elapsed time was not saved: {}", e);
        } else if report.outcome != TimerState::ExitedWithoutSaving {
            println!(
                "Recorded {} for task \"{}\"",
                format_spent_time(report.elapsed_secs),
                task_name
            );
        }
        Ok(())
    }
}
