//! Command-line front end for the classroom core.
//!
//! # Responsibility
//! - Map subcommands onto `ClassroomApi` calls against a SQLite file.
//! - Print JSON envelopes on stdout, errors as JSON on stderr.

use clap::{Parser, Subcommand};
use classroom_core::db::open_db;
use classroom_core::{
    init_logging, ApiError, ClassroomApi, CommonStudentsRequest, ErrorResponse,
    NotificationRequest, OneOrMany, RegisterRequest, SqliteAssociationStore, SuspendRequest,
    STATUS_NO_CONTENT,
};
use log::info;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "classroom")]
#[command(about = "Teacher/student registration and notification lookup", version)]
struct Cli {
    /// SQLite database file (created on first use)
    #[arg(long, env = "CLASSROOM_DB", default_value = "classroom.sqlite3", global = true)]
    db: PathBuf,

    /// Log level: trace|debug|info|warn|error (needs --log-dir)
    #[arg(long, global = true, requires = "log_dir")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long, env = "CLASSROOM_LOG_DIR", global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register students under a teacher
    Register {
        #[arg(long)]
        teacher: String,
        #[arg(long = "student", required = true)]
        students: Vec<String>,
    },

    /// List students registered under every given teacher
    CommonStudents {
        #[arg(long = "teacher", required = true)]
        teachers: Vec<String>,
    },

    /// Resolve recipients of a notification
    Notify {
        #[arg(long)]
        teacher: String,
        #[arg(long)]
        notification: String,
    },

    /// Suspend a student
    Suspend {
        #[arg(long)]
        student: String,
    },

    /// Print the core version
    Version,
}

#[derive(Serialize)]
struct StatusResponse {
    status: u16,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level: &str = cli
            .log_level
            .as_deref()
            .unwrap_or_else(|| classroom_core::default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("warning: {err}");
        }
    }

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(failure) => {
            let body = ErrorResponse {
                message: failure.message,
            };
            eprintln!("{}", to_json(&body));
            ExitCode::from(failure.exit_code)
        }
    }
}

struct Failure {
    message: String,
    exit_code: u8,
}

impl From<ApiError> for Failure {
    fn from(err: ApiError) -> Self {
        let exit_code = match err.status_code() {
            400 => 2,
            404 => 3,
            _ => 1,
        };
        Self {
            message: err.to_string(),
            exit_code,
        }
    }
}

fn run(cli: &Cli) -> Result<String, Failure> {
    if let Commands::Version = cli.command {
        return Ok(version_line());
    }

    let mut conn = open_db(&cli.db).map_err(|err| Failure {
        message: err.to_string(),
        exit_code: 1,
    })?;
    let store = SqliteAssociationStore::try_new(&mut conn).map_err(|err| Failure {
        message: err.to_string(),
        exit_code: 1,
    })?;
    let mut api = ClassroomApi::new(store);

    let output = match &cli.command {
        Commands::Register { teacher, students } => {
            api.register(&RegisterRequest {
                teacher: teacher.clone(),
                students: students.clone(),
            })?;
            to_json(&StatusResponse {
                status: STATUS_NO_CONTENT,
            })
        }
        Commands::CommonStudents { teachers } => {
            let response = api.common_students(&CommonStudentsRequest {
                teacher: OneOrMany::Many(teachers.clone()),
            })?;
            to_json(&response)
        }
        Commands::Notify {
            teacher,
            notification,
        } => {
            let response = api.retrieve_for_notifications(&NotificationRequest {
                teacher: teacher.clone(),
                notification: notification.clone(),
            })?;
            to_json(&response)
        }
        Commands::Suspend { student } => {
            api.suspend(&SuspendRequest {
                student: student.clone(),
            })?;
            to_json(&StatusResponse {
                status: STATUS_NO_CONTENT,
            })
        }
        Commands::Version => version_line(),
    };

    info!("event=cli_command module=cli status=ok");
    Ok(output)
}

fn version_line() -> String {
    format!("classroom_core version={}", classroom_core::core_version())
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|err| format!("{{\"message\":\"serialization failed: {err}\"}}"))
}
