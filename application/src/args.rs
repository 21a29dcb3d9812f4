//! [`Args`] definitions.

use clap::{Parser, Subcommand};
use service::{
    command::verify_otp::Otp,
    domain::{project, task, team, user},
};
use time::macros::format_description;

/// Parses a `[year]-[month]-[day]` command line date.
fn parse_date(s: &str) -> Result<time::Date, String> {
    time::Date::parse(s, format_description!("[year]-[month]-[day]"))
        .map_err(|e| e.to_string())
}

/// Command line client of the project management platform.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// [`Command`] to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command of the client.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Logs in with email and password, replacing any stored session.
    Login {
        /// Email to log in with.
        #[arg(long)]
        email: user::Email,

        /// Password to log in with.
        #[arg(long)]
        password: user::Password,
    },

    /// Clears the stored session.
    Logout,

    /// Prints the current session's user and permissions.
    Whoami,

    /// Lists projects.
    Projects {
        /// List all visible projects instead of owned memberships only.
        #[arg(long)]
        all: bool,

        /// Filter by name (or its part).
        #[arg(long)]
        name: Option<project::Name>,

        /// Filter by status.
        #[arg(long)]
        status: Option<project::Status>,

        /// Zero-based page to fetch.
        #[arg(long, default_value_t = 0)]
        page: u32,

        /// Field to sort by.
        #[arg(long)]
        sort_by: Option<String>,

        /// Sort in descending order.
        #[arg(long)]
        descending: bool,
    },

    /// Prints a project's detail with its team.
    Project {
        /// ID of the project.
        id: project::Id,
    },

    /// Creates a project.
    CreateProject {
        /// Name of the project.
        #[arg(long)]
        name: project::Name,

        /// Description of the project.
        #[arg(long, default_value = "")]
        description: String,

        /// Date when work starts.
        #[arg(long, value_parser = parse_date)]
        start_date: time::Date,

        /// Date when work ends.
        #[arg(long, value_parser = parse_date)]
        end_date: Option<time::Date>,

        /// Initial status of the project.
        #[arg(long)]
        status: Option<project::Status>,
    },

    /// Updates a project's fields.
    UpdateProject {
        /// ID of the project.
        id: project::Id,

        /// New name.
        #[arg(long)]
        name: Option<project::Name>,

        /// New description.
        #[arg(long)]
        description: Option<String>,

        /// New end date.
        #[arg(long, value_parser = parse_date)]
        end_date: Option<time::Date>,

        /// New status.
        #[arg(long)]
        status: Option<project::Status>,
    },

    /// Archives a project.
    Archive {
        /// ID of the project.
        id: project::Id,
    },

    /// Creates a task under a project.
    CreateTask {
        /// ID of the project.
        #[arg(long)]
        project: project::Id,

        /// Title of the task.
        #[arg(long)]
        title: task::Title,

        /// Description of the task.
        #[arg(long, default_value = "")]
        description: String,

        /// Date when work starts.
        #[arg(long, value_parser = parse_date)]
        start_date: time::Date,

        /// Date when the task is due.
        #[arg(long, value_parser = parse_date)]
        due_date: time::Date,

        /// Priority of the task.
        #[arg(long, default_value = "MEDIUM")]
        priority: task::Priority,

        /// ID of the user to assign the task to.
        #[arg(long)]
        assignee: Option<user::Id>,
    },

    /// Prints a project's kanban board.
    Board {
        /// ID of the project.
        project: project::Id,

        /// Show the board of this team member instead of the current user.
        #[arg(long)]
        member: Option<user::Id>,
    },

    /// Updates a task's fields.
    UpdateTask {
        /// ID of the task.
        #[arg(long)]
        task: task::Id,

        /// ID of the project the task belongs to.
        #[arg(long)]
        project: project::Id,

        /// New title.
        #[arg(long)]
        title: Option<task::Title>,

        /// New description.
        #[arg(long)]
        description: Option<String>,

        /// New due date.
        #[arg(long, value_parser = parse_date)]
        due_date: Option<time::Date>,

        /// New priority.
        #[arg(long)]
        priority: Option<task::Priority>,

        /// ID of the user to reassign the task to.
        #[arg(long)]
        assignee: Option<user::Id>,
    },

    /// Moves a task into another status column.
    Move {
        /// ID of the project the task belongs to.
        #[arg(long)]
        project: project::Id,

        /// ID of the task to move.
        #[arg(long)]
        task: task::Id,

        /// Status column to move the task into.
        #[arg(long)]
        status: task::Status,
    },

    /// Lists all the tasks of a project.
    Tasks {
        /// ID of the project.
        project: project::Id,

        /// Zero-based page to fetch.
        #[arg(long, default_value_t = 0)]
        page: u32,
    },

    /// Lists the team members of a project.
    Team {
        /// ID of the project.
        project: project::Id,

        /// Include each member's open-task workload.
        #[arg(long)]
        workload: bool,

        /// Zero-based page to fetch.
        #[arg(long, default_value_t = 0)]
        page: u32,
    },

    /// Assigns a user into a project's team.
    TeamAdd {
        /// ID of the project.
        #[arg(long)]
        project: project::Id,

        /// ID of the user to assign.
        #[arg(long)]
        user: user::Id,

        /// ID of the specialization the member fills.
        #[arg(long)]
        specialization: team::specialization::Id,
    },

    /// Removes a member from its project team.
    TeamRemove {
        /// ID of the team membership.
        member: team::Id,
    },

    /// Runs a step of the password-recovery flow.
    #[command(subcommand)]
    Recover(Recover),
}

/// Step of the password-recovery flow.
#[derive(Debug, Subcommand)]
pub enum Recover {
    /// Sends (or resends) a recovery OTP to the email.
    Send {
        /// Email to recover.
        #[arg(long)]
        email: user::Email,
    },

    /// Verifies the received OTP, obtaining a reset token.
    Verify {
        /// Email the OTP was sent to.
        #[arg(long)]
        email: user::Email,

        /// The received OTP.
        #[arg(long)]
        otp: Otp,
    },

    /// Sets a new password using the obtained reset token.
    Reset {
        /// New password to set.
        #[arg(long)]
        new_password: user::Password,
    },
}
