use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;

use git_guard::config::{self, Config};
use git_guard::domain::{MessageGrammar, RefUpdate};
use git_guard::fmt_check::{CommandFormatter, Formatter};
use git_guard::gate::checkout::{CheckoutContext, CheckoutKind};
use git_guard::gate::commit::CommitContext;
use git_guard::gate::merge::MergeContext;
use git_guard::gate::{self, GateResult};
use git_guard::git::Git2Repository;
use git_guard::ui;

#[derive(Parser)]
#[command(
    name = "git-guard",
    about = "Enforce branch naming and commit message policy from git hooks"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    hook: Hook,
}

#[derive(Subcommand)]
enum Hook {
    /// Branch policy checks before a commit is recorded (pre-commit)
    PreCommit,

    /// Validate the draft commit message (commit-msg)
    CommitMsg {
        /// Path to the file holding the draft message
        message_file: String,
    },

    /// Check the branch that was just checked out (post-checkout)
    PostCheckout {
        /// Previous HEAD sha, as passed by git
        #[arg(value_name = "PREVIOUS")]
        _previous: String,

        /// New HEAD sha, as passed by git
        #[arg(value_name = "NEW")]
        _new: String,

        /// 1 for a branch checkout, 0 for a file checkout
        flag: String,
    },

    /// Reject merge commits outside protected branches (pre-merge-commit)
    PreMergeCommit,

    /// Check every ref about to be pushed; reads ref updates on stdin (pre-push)
    PrePush,
}

fn main() {
    let args = Args::parse();

    match run(&args) {
        Ok(result) => {
            ui::display_result(&result);
            std::process::exit(result.exit_code());
        }
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<GateResult> {
    let config: Config = config::load_config(args.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // The message gate works on a plain file; only the other hooks need
    // repository state.
    let open_repo = || Git2Repository::open(".").context("Not in a git repository");

    let result = match &args.hook {
        Hook::PreCommit => {
            let repo = open_repo()?;
            let ctx = CommitContext::from_repo(&repo, &config.branches)?;
            let formatter = config.format.as_ref().map(CommandFormatter::new);
            gate::commit::run(
                &ctx,
                formatter.as_ref().map(|f| f as &dyn Formatter),
            )?
        }
        Hook::CommitMsg { message_file } => {
            let message = std::fs::read_to_string(message_file)
                .with_context(|| format!("Cannot read commit message file '{}'", message_file))?;
            let grammar = MessageGrammar::new(&config.commits)?;
            gate::message::evaluate(&message, &grammar)
        }
        Hook::PostCheckout { flag, .. } => {
            let repo = open_repo()?;
            let kind = CheckoutKind::from_flag(flag)?;
            let ctx = CheckoutContext::from_repo(kind, &repo, &config)?;
            gate::checkout::evaluate(&ctx)
        }
        Hook::PreMergeCommit => {
            let repo = open_repo()?;
            let ctx = MergeContext::from_repo(&repo, &config.branches)?;
            gate::merge::evaluate(&ctx)
        }
        Hook::PrePush => {
            let repo = open_repo()?;
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Cannot read ref updates from stdin")?;
            let updates = RefUpdate::parse_all(&input)?;
            gate::push::evaluate(&updates, &repo, &config)?
        }
    };

    Ok(result)
}
