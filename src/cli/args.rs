use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::config::HOME_ENV;

#[derive(Parser)]
#[command(name = "marktask")]
#[command(about = "Capture tasks from a one-line mini-syntax")]
#[command(long_about = "marktask - quick task capture from the command line

Tasks are written as a description followed by optional markers:

  <description> [@category] [!urgent|today|tomorrow|later] [~daily|weekly|monthly] [^due]

Several tasks can be added at once by separating them with commas.
Use \\, for a literal comma inside a task.

QUICK START:
  marktask add \"Buy milk @shopping !today ^tomorrow\"
  marktask add \"Pay rent ~monthly ^1st of month, Call mom @family\"
  marktask list
  marktask done 1

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  marktask <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file,
    /// or 'pretty' when unset.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Directory holding tasks.json and done_tasks.json
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Root directory for config and data (default: ~/.marktask)
    #[arg(long, global = true, env = HOME_ENV, value_name = "DIR", hide_env_values = true)]
    pub home: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add one or more tasks written in the marker syntax
    ///
    /// # Examples
    ///
    ///   marktask add "Buy milk @shopping !today ^tomorrow"
    ///   marktask add "Task A, Task B @work"
    ///   marktask add "Pay rent ~monthly ^1st of month"
    ///   marktask add "Email Bob\, Alice and Carol ^friday"
    ///
    /// # Markers
    ///
    ///   @category     Free text up to the next marker
    ///   !priority     urgent, today, tomorrow, later
    ///   ~recurring    daily, weekly, monthly
    ///   ^due          Free-form date: tomorrow, next friday, dec 15, in 3 days
    ///
    /// Markers must appear in this order. Anything that does not fit is
    /// kept as part of the description.
    #[command(alias = "a")]
    Add(AddArgs),

    /// Create a single task from explicit fields
    ///
    /// The description is taken literally; markers in it are not parsed.
    /// The due text is stored as given.
    New(NewArgs),

    /// List active tasks
    ///
    /// # Examples
    ///
    ///   marktask list
    ///   marktask ls --category work
    ///   marktask ls --priority urgent -o json
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a single task
    Show {
        /// Task number as shown by `list`
        id: usize,
    },

    /// Change fields of an existing task
    ///
    /// Only the given fields change. Pass an empty string to clear a
    /// field. A due date that cannot be understood is kept as text.
    Edit(EditArgs),

    /// Delete a task
    #[command(alias = "rm")]
    Delete {
        /// Task number as shown by `list`
        id: usize,
    },

    /// Mark a task as done
    ///
    /// The task moves to the completed list. Recurring tasks remember
    /// the day they were last done.
    Done {
        /// Task number as shown by `list`
        id: usize,
    },

    /// List completed tasks
    Completed,

    /// Show active tasks grouped by category
    #[command(alias = "cats")]
    Categories,

    /// Move a task to a new position
    ///
    /// # Examples
    ///
    ///   marktask move 5 1     Make task 5 the first task
    #[command(alias = "mv")]
    Move {
        /// Current task number
        from: usize,
        /// New task number
        to: usize,
    },

    /// Show task counts
    ///
    /// Counts active, urgent, today and overdue tasks, plus completed ones.
    Stats,

    /// Generate shell completion scripts
    ///
    /// Example: marktask completions bash > ~/.bash_completion.d/marktask
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct AddArgs {
    /// Tasks in the marker syntax, separated by commas
    pub input: String,

    /// Only parse and show what would be created, don't actually create
    #[arg(long)]
    pub parse_only: bool,
}

#[derive(Args)]
pub struct NewArgs {
    /// Task description
    pub description: String,

    /// Category
    #[arg(long, short = 'c', default_value = "")]
    pub category: String,

    /// Priority (urgent, today, tomorrow, later)
    #[arg(long, short = 'p', default_value = "")]
    pub priority: String,

    /// Recurrence (daily, weekly, monthly)
    #[arg(long, short = 'r', default_value = "")]
    pub recurring: String,

    /// Due date, stored as given
    #[arg(long, short = 'd', default_value = "")]
    pub due: String,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only tasks in this category ("Uncategorized" for tasks without one)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Only tasks with this priority
    #[arg(long, short = 'p')]
    pub priority: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task number as shown by `list`
    pub id: usize,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New category
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// New priority (urgent, today, tomorrow, later)
    #[arg(long, short = 'p')]
    pub priority: Option<String>,

    /// New recurrence (daily, weekly, monthly)
    #[arg(long, short = 'r')]
    pub recurring: Option<String>,

    /// New due date in natural language
    #[arg(long, short = 'd')]
    pub due: Option<String>,
}
