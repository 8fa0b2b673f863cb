//! `banksys` command-line client.
//!
//! Drives the same session core as the browser client: each invocation
//! restores the session from the token file (startup validation), applies
//! the route guard for the command's equivalent view, then calls the API.

mod storage;
mod transport;


use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use session::{
    ApiClient, ApiError, FailureKind, FormError, GuardDecision, MemoryCell, SessionError, SessionStore, User, forms,
    format, guard, routes,
};

use crate::storage::{FileTokenStorage, LoggingNavigator};
use crate::transport::ReqwestTransport;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not signed in; run `banksys login` first")]
    NotSignedIn,
    #[error("already signed in as {0}; run `banksys logout` first")]
    AlreadySignedIn(String),
    #[error("this command requires an admin account")]
    Forbidden,
    #[error("{0}")]
    Form(#[from] FormError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl CliError {
    /// Backend message when the server sent one, otherwise the error text.
    fn user_message(&self) -> String {
        match self {
            Self::Session(e) => e.user_message(&e.to_string()),
            Self::Api(e) => e.user_message(&e.to_string()),
            other => other.to_string(),
        }
    }

    fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::NotSignedIn => Some(FailureKind::Authentication),
            Self::Forbidden => Some(FailureKind::Authorization),
            Self::Form(e) => Some(e.kind()),
            Self::Session(e) => e.kind(),
            Self::Api(e) => Some(e.kind()),
            Self::AlreadySignedIn(_) | Self::InvalidJson(_) => None,
        }
    }

    /// Process exit status, one per failure class so scripts can branch.
    fn exit_code(&self) -> u8 {
        match self.kind() {
            Some(FailureKind::Validation) => 2,
            Some(FailureKind::Authentication) => 3,
            Some(FailureKind::Authorization) => 4,
            Some(FailureKind::Network) => 5,
            Some(FailureKind::Server | FailureKind::Decode) => 6,
            None => 1,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "banksys", about = "BankSys online banking CLI")]
struct Cli {
    #[arg(long, env = "BANKSYS_BASE_URL", default_value = "http://localhost:8080/BankingSystemBackend/api")]
    base_url: String,

    #[arg(long, env = "BANKSYS_TOKEN_FILE", default_value = ".banksys-token")]
    token_file: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session token.
    Login {
        username: String,
        #[arg(long, env = "BANKSYS_PASSWORD")]
        password: String,
        /// View to return to after sign-in, if the role allows it.
        #[arg(long)]
        from: Option<String>,
    },
    /// Create a customer account and sign in.
    Register {
        username: String,
        #[arg(long, env = "BANKSYS_PASSWORD")]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    /// Validate the stored token and print the signed-in user.
    Whoami,
    /// Forget the stored token.
    Logout,
    /// Show balance and account details.
    Balance,
    /// List the account's transactions.
    History {
        #[arg(long)]
        limit: Option<usize>,
    },
    Deposit(CashArgs),
    Withdraw(CashArgs),
    Transfer {
        amount: String,
        to_account_number: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Admin(AdminCommand),
}

#[derive(Args, Debug)]
struct CashArgs {
    amount: String,
    #[arg(long, default_value = "")]
    description: String,
}

#[derive(Args, Debug)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
enum AdminSubcommand {
    Users,
    Transactions,
}

impl Command {
    /// Web view this command stands in for, used for the guard check.
    fn route(&self) -> Option<&'static str> {
        match self {
            Self::Login { .. } | Self::Register { .. } | Self::Whoami | Self::Logout => None,
            Self::Balance => Some(routes::DASHBOARD),
            Self::History { .. } => Some(routes::HISTORY),
            Self::Deposit(_) => Some(routes::DEPOSIT),
            Self::Withdraw(_) => Some(routes::WITHDRAW),
            Self::Transfer { .. } => Some(routes::TRANSFER),
            Self::Admin(admin) => Some(match admin.command {
                AdminSubcommand::Users => routes::ADMIN_USERS,
                AdminSubcommand::Transactions => routes::ADMIN_TRANSACTIONS,
            }),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let api = ApiClient::new(
        Arc::new(ReqwestTransport::new(cli.base_url)),
        Arc::new(FileTokenStorage::new(cli.token_file)),
    );
    let store = SessionStore::new(api, Arc::new(MemoryCell::new()), Arc::new(LoggingNavigator));

    match run(&store, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e.user_message());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(store: &SessionStore, command: Command) -> Result<(), CliError> {
    if !matches!(command, Command::Logout) {
        store.start().await?;
    }
    if let Some(route) = command.route() {
        check_access(store, route)?;
    }
    let api = store.api();

    match command {
        Command::Login { username, password, from } => {
            ensure_signed_out(store)?;
            let credentials = forms::credentials(&username, &password)?;
            let user = store.login(&credentials, from.as_deref()).await?;
            println!("{}", signed_in_line(&user));
        }
        Command::Register { username, password, first_name, last_name } => {
            ensure_signed_out(store)?;
            let registration = forms::registration(&username, &password, &first_name, &last_name)?;
            let user = store.register(&registration).await?;
            println!("{}", signed_in_line(&user));
        }
        Command::Whoami => {
            let user = current_user(store)?;
            print_json(&serde_json::to_value(&user)?)?;
        }
        Command::Logout => {
            store.logout();
            println!("Signed out.");
        }
        Command::Balance => {
            let user = current_user(store)?;
            let details = api.account_details(user.id).await?;
            println!("Balance: {}", format::money(details.balance));
            println!("Account Number: {} ({})", details.account_number, details.account_type);
        }
        Command::History { limit } => {
            let transactions = api.transaction_history().await?;
            let shown = format::recent(&transactions, limit.unwrap_or(transactions.len()));
            print_json(&serde_json::to_value(shown)?)?;
        }
        Command::Deposit(args) => {
            let request = forms::amount_request(&args.amount, &args.description)?;
            let update = api.deposit(&request).await?;
            println!("Deposited {}. New balance: {}", format::money(request.amount), format::money(update.new_balance));
        }
        Command::Withdraw(args) => {
            let request = forms::amount_request(&args.amount, &args.description)?;
            let update = api.withdraw(&request).await?;
            println!("Withdrew {}. New balance: {}", format::money(request.amount), format::money(update.new_balance));
        }
        Command::Transfer { amount, to_account_number, description } => {
            let request = forms::transfer(&amount, &to_account_number, &description)?;
            let update = api.transfer(&request).await?;
            println!(
                "Transferred {} to account {}. New balance: {}",
                format::money(request.amount),
                request.to_account_number,
                format::money(update.new_balance)
            );
        }
        Command::Admin(admin) => {
            let value = match admin.command {
                AdminSubcommand::Users => serde_json::to_value(api.admin_users().await?)?,
                AdminSubcommand::Transactions => serde_json::to_value(api.admin_transactions().await?)?,
            };
            print_json(&value)?;
        }
    }
    Ok(())
}

fn check_access(store: &SessionStore, route: &str) -> Result<(), CliError> {
    match guard::evaluate_location(&store.snapshot(), route) {
        GuardDecision::Render => Ok(()),
        GuardDecision::Redirect(_) => Err(CliError::Forbidden),
        GuardDecision::RedirectToLogin { .. } | GuardDecision::Wait => Err(CliError::NotSignedIn),
    }
}

fn ensure_signed_out(store: &SessionStore) -> Result<(), CliError> {
    match store.snapshot().user {
        Some(user) => Err(CliError::AlreadySignedIn(user.username)),
        None => Ok(()),
    }
}

fn current_user(store: &SessionStore) -> Result<User, CliError> {
    let session = store.snapshot();
    session.user.clone().filter(|_| session.is_authenticated()).ok_or(CliError::NotSignedIn)
}

fn signed_in_line(user: &User) -> String {
    format!("Signed in as {} ({}).", user.username, user.role.label())
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
