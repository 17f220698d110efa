use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

use query_alerts::components::{
    Action, CreateAlertModalContent, DeleteAlertSection, FormEvent, UpdateAlertModalContent,
    UpdateOutcome,
};
use query_alerts::components::form::AlertEditForm;
use query_alerts::components::view::plain_text;
use query_alerts::config::ClientConfig;
use query_alerts::error::AlertError;
use query_alerts::logging::init_logging;
use query_alerts::models::{Alert, AlertSetting, AlertType, Question, ScheduleDay, ScheduleType, Viewer};
use query_alerts::services::{
    ChannelDirectory, FileSplashFlagStore, MetabaseClient, PulseDirectory,
};
use query_alerts::version::VERSION;

#[derive(Parser, Debug)]
#[command(author, version = VERSION, about = "Create, edit and delete question alerts", long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an alert on a saved question
    Create {
        #[arg(long)]
        card_id: i64,
        /// Visualization of the question, e.g. table, line, progress
        #[arg(long, default_value = "table")]
        display: String,
        #[arg(long)]
        show_goal: bool,
        #[command(flatten)]
        edit: EditArgs,
    },
    /// Edit an alert stored as JSON
    Update {
        #[arg(long)]
        alert: PathBuf,
        #[command(flatten)]
        question: QuestionArgs,
        #[command(flatten)]
        edit: EditArgs,
    },
    /// Delete an alert stored as JSON
    Delete {
        #[arg(long)]
        alert: PathBuf,
        /// Actually delete; otherwise only print what would stop
        #[arg(long)]
        yes: bool,
    },
    /// Print the edit modal of an alert as JSON
    Render {
        #[arg(long)]
        alert: PathBuf,
        #[command(flatten)]
        question: QuestionArgs,
    },
}

#[derive(ClapArgs, Debug)]
struct QuestionArgs {
    #[arg(long, default_value = "table")]
    display: String,
    #[arg(long)]
    show_goal: bool,
}

#[derive(ClapArgs, Debug)]
struct EditArgs {
    /// hourly, daily or weekly
    #[arg(long)]
    schedule: Option<ScheduleType>,
    #[arg(long)]
    hour: Option<u8>,
    #[arg(long)]
    day: Option<ScheduleDay>,
    /// Alert every time the goal is crossed instead of only the first time
    #[arg(long)]
    every_time: bool,
    /// Alert when the series goes below the goal
    #[arg(long)]
    below_goal: bool,
}

impl EditArgs {
    fn events(&self, form: &AlertEditForm, alert: &Alert) -> Result<Vec<FormEvent>, AlertError> {
        let mut events = Vec::new();
        if self.every_time {
            events.push(FormEvent::SetSetting(AlertSetting::AlertFirstOnly, false));
        }
        if self.below_goal {
            events.push(FormEvent::SetSetting(AlertSetting::AlertAboveGoal, false));
        }

        let picker = &form.schedule.picker;
        let mut schedule = alert.schedule();
        if let Some(schedule_type) = self.schedule {
            schedule = picker.change_type(&schedule, schedule_type)?;
        }
        if let Some(hour) = self.hour {
            schedule = picker.change_hour(&schedule, hour)?;
        }
        if let Some(day) = self.day {
            schedule = picker.change_day(&schedule, day)?;
        }
        if schedule != alert.schedule() {
            info!(description = %picker.describe(&schedule), "Schedule changed.");
            events.push(FormEvent::SetSchedule(schedule));
        }
        Ok(events)
    }
}

impl QuestionArgs {
    fn question(&self, alert: &Alert) -> Question {
        let question = Question::new(alert.card.id, &self.display);
        if self.show_goal {
            question.with_goal()
        } else {
            question
        }
    }
}

async fn read_alert(path: &Path) -> Result<Alert, AlertError> {
    let contents = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&contents)?)
}

async fn channel_directory(viewer: &Viewer, client: &MetabaseClient) -> ChannelDirectory {
    if viewer.is_admin {
        ChannelDirectory::load(client).await
    } else {
        ChannelDirectory::default()
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AlertError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn on_close() -> query_alerts::components::CloseCallback {
    Box::new(|| info!("Modal closed."))
}

async fn run(args: Args, config: ClientConfig) -> Result<(), AlertError> {
    let client = Arc::new(MetabaseClient::new(&config)?);
    let viewer = Viewer::new(client.fetch_current_user().await?);
    info!(user = %viewer.user.display_name(), is_admin = viewer.is_admin, "Signed in.");

    match args.command {
        Command::Create {
            card_id,
            display,
            show_goal,
            edit,
        } => {
            let mut question = Question::new(card_id, &display);
            if show_goal {
                question = question.with_goal();
            }
            let directory = channel_directory(&viewer, &client).await;
            let flags = Arc::new(FileSplashFlagStore::new(&config.flag_store_path));
            let mut modal = CreateAlertModalContent::new(
                question,
                viewer,
                client.clone(),
                flags,
                directory,
                on_close(),
            );

            if modal.shows_educational_screen() {
                print_json(&modal.render())?;
                if let Err(e) = modal.handle_action(Action::Proceed).await {
                    warn!(error = %e, "Could not remember the onboarding screen.");
                }
            }

            for event in edit.events(modal.form(), modal.alert())? {
                modal.handle(event)?;
            }
            if let Some(created) = modal.handle_action(Action::Submit).await? {
                print_json(&created)?;
            }
        }
        Command::Update {
            alert,
            question,
            edit,
        } => {
            let alert = read_alert(&alert).await?;
            let alert_type = question.question(&alert).alert_type();
            let directory = channel_directory(&viewer, &client).await;
            let mut modal = UpdateAlertModalContent::new(
                alert,
                alert_type,
                viewer,
                client.clone(),
                directory,
                on_close(),
            );
            for event in edit.events(modal.form(), modal.alert())? {
                modal.handle(event)?;
            }
            if let UpdateOutcome::Updated(updated) = modal.handle_action(Action::Submit).await? {
                print_json(&updated)?;
            }
        }
        Command::Delete { alert, yes } => {
            let alert = read_alert(&alert).await?;
            for item in DeleteAlertSection::new(alert.clone()).confirm_items() {
                println!("{}", plain_text(&item));
            }
            if !yes {
                info!("Nothing deleted; pass --yes to confirm.");
                return Ok(());
            }

            let mut modal = UpdateAlertModalContent::new(
                alert,
                AlertType::Rows,
                viewer,
                client.clone(),
                ChannelDirectory::default(),
                on_close(),
            );
            modal.handle_action(Action::ConfirmDelete).await?;
        }
        Command::Render { alert, question } => {
            let alert = read_alert(&alert).await?;
            let alert_type = question.question(&alert).alert_type();
            let directory = channel_directory(&viewer, &client).await;
            let modal = UpdateAlertModalContent::new(
                alert,
                alert_type,
                viewer,
                client.clone(),
                directory,
                on_close(),
            );
            print_json(&modal.render())?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let config = ClientConfig::load(args.config.as_deref())?;
    init_logging(&config.log_dir)?;
    info!("Starting alertctl, version: {}", VERSION);

    if let Err(e) = run(args, config).await {
        error!(error = %e, "Command failed.");
        return Err(e.into());
    }
    Ok(())
}
