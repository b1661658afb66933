use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use gateway::{ApiRequest, FileStore, GatewayConfig, GatewayError, Method};
use radius_console::services::api_key::{ApiKeyCreate, DEFAULT_VALIDITY_DAYS};
use radius_console::services::nas::NasGroup;
use radius_console::services::user::UserGroup;
use radius_console::tree::TreeNode;
use radius_console::{Console, ConsoleError, PageParams};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Console(#[from] ConsoleError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("could not read password: {0}")]
    Io(#[from] io::Error),
    #[error("no password given; pass --password, set RADIUS_CONSOLE_PASSWORD or pipe it on stdin")]
    MissingPassword,
    #[error("not logged in; run `radius-console login` first")]
    NotLoggedIn,
}

#[derive(Parser, Debug)]
#[command(name = "radius-console", about = "RADIUS/NAS provisioning API client")]
struct Cli {
    /// API root, e.g. https://radius.example/api
    #[arg(long, env = "RADIUS_CONSOLE_API_URL")]
    api_url: Option<String>,

    /// Where the session tokens are kept between runs.
    #[arg(long, env = "RADIUS_CONSOLE_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        email: String,
        #[arg(long, env = "RADIUS_CONSOLE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    Logout,
    Status,
    /// Send an arbitrary authenticated request and print the response body.
    Request {
        method: String,
        path: String,
        #[arg(long)]
        data: Option<String>,
    },
    #[command(flatten)]
    Resource(Resource),
}

/// Commands that need a signed-in session.
#[derive(Subcommand, Debug)]
enum Resource {
    Nas(NasCommand),
    NasGroup(NasGroupCommand),
    Vendor(ListGetCommand),
    Secret(ListGetCommand),
    Radsec(ListGetCommand),
    Admin(AdminCommand),
    User(ListGetCommand),
    UserGroup(UserGroupCommand),
    AttributeGroup(ListGetCommand),
    /// List the RADIUS attributes of one attribute group.
    Attribute {
        group_id: i64,
    },
    IdentifierTypes,
    Timezones,
    ApiKey(ApiKeyCommand),
}

#[derive(Args, Debug, Clone, Copy)]
struct PageArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, default_value_t = 10)]
    page_size: u32,
}

impl From<PageArgs> for PageParams {
    fn from(args: PageArgs) -> Self {
        PageParams::new(args.page, args.page_size)
    }
}

#[derive(Args, Debug)]
struct ListGetCommand {
    #[command(subcommand)]
    command: ListGetSubcommand,
}

#[derive(Subcommand, Debug)]
enum ListGetSubcommand {
    List(PageArgs),
    Get { id: i64 },
}

#[derive(Args, Debug)]
struct NasCommand {
    #[command(subcommand)]
    command: NasSubcommand,
}

#[derive(Subcommand, Debug)]
enum NasSubcommand {
    List(PageArgs),
    Get { id: i64 },
    Delete { id: i64 },
    ByGroup { group_id: i64 },
}

#[derive(Args, Debug)]
struct NasGroupCommand {
    #[command(subcommand)]
    command: GroupSubcommand,
}

#[derive(Args, Debug)]
struct UserGroupCommand {
    #[command(subcommand)]
    command: GroupSubcommand,
}

#[derive(Subcommand, Debug)]
enum GroupSubcommand {
    List(PageArgs),
    Get { id: i64 },
    /// Print the hierarchy, one group per line, indented by depth.
    Tree,
}

#[derive(Args, Debug)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
enum AdminSubcommand {
    List(PageArgs),
    Me,
}

#[derive(Args, Debug)]
struct ApiKeyCommand {
    #[command(subcommand)]
    command: ApiKeySubcommand,
}

#[derive(Subcommand, Debug)]
enum ApiKeySubcommand {
    List(PageArgs),
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = DEFAULT_VALIDITY_DAYS)]
        days: u16,
    },
    Revoke { id: i64 },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = GatewayConfig::from_env();
    if let Some(api_url) = &cli.api_url {
        config.api_url = api_url.trim_end_matches('/').to_owned();
    }
    let session_file = cli.session_file.clone().unwrap_or_else(default_session_file);
    tracing::debug!(api_url = %config.api_url, session_file = %session_file.display(), "starting");

    let console = Console::connect(config, Arc::new(FileStore::new(session_file)))?;
    run(&console, cli.command).await
}

fn default_session_file() -> PathBuf {
    let home = std::env::var_os("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from);
    home.join(".radius-console").join("session.json")
}

async fn run(console: &Console, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { email, password } => run_login(console, &email, password).await,
        Command::Logout => {
            console.gateway().logout();
            println!("logged out");
            Ok(())
        }
        Command::Status => run_status(console),
        Command::Request { method, path, data } => run_request(console, &method, &path, data).await,
        Command::Resource(resource) => {
            if !console.gateway().is_authenticated() {
                return Err(CliError::NotLoggedIn);
            }
            run_resource(console, resource).await
        }
    }
}

async fn run_login(console: &Console, email: &str, password: Option<String>) -> Result<(), CliError> {
    let password = match password {
        Some(password) => password,
        None => read_password_line(io::stdin().lock())?,
    };
    let session = console.gateway().login(email, &password).await?;
    let name = session.current_user.map_or_else(|| email.to_owned(), |user| user.display_name());
    println!("logged in as {name}");
    Ok(())
}

fn read_password_line(mut input: impl BufRead) -> Result<String, CliError> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        return Err(CliError::MissingPassword);
    }
    Ok(password.to_owned())
}

fn run_status(console: &Console) -> Result<(), CliError> {
    let session = console.gateway().session();
    print_json(&serde_json::json!({
        "api_url": console.gateway().config().api_url,
        "status": format!("{:?}", session.status()),
        "authenticated": session.is_authenticated(),
        "user": session.current_user(),
    }))
}

async fn run_request(console: &Console, method: &str, path: &str, data: Option<String>) -> Result<(), CliError> {
    let method = parse_method(method)?;
    let mut request = ApiRequest::new(method, console.gateway().endpoint(path));
    if let Some(data) = data {
        request = request.json(&serde_json::from_str::<Value>(&data)?)?;
    }
    let response = console.gateway().send(request).await?;
    match serde_json::from_str::<Value>(&response.body) {
        Ok(json) => print_json(&json),
        Err(_) => {
            println!("{}", response.body);
            Ok(())
        }
    }
}

fn parse_method(raw: &str) -> Result<Method, CliError> {
    Method::from_bytes(raw.to_ascii_uppercase().as_bytes()).map_err(|_| CliError::InvalidMethod(raw.to_owned()))
}

async fn run_resource(console: &Console, resource: Resource) -> Result<(), CliError> {
    match resource {
        Resource::Nas(nas) => {
            let service = console.nas();
            match nas.command {
                NasSubcommand::List(page) => print_json(&service.list(page.into()).await?),
                NasSubcommand::Get { id } => print_json(&service.get(id).await?),
                NasSubcommand::Delete { id } => {
                    service.delete(id).await?;
                    println!("deleted NAS {id}");
                    Ok(())
                }
                NasSubcommand::ByGroup { group_id } => print_json(&service.by_group(group_id).await?),
            }
        }
        Resource::NasGroup(group) => {
            let service = console.nas();
            match group.command {
                GroupSubcommand::List(page) => print_json(&service.list_groups(page.into()).await?),
                GroupSubcommand::Get { id } => print_json(&service.get_group(id).await?),
                GroupSubcommand::Tree => {
                    print_tree::<NasGroup>(&service.flattened_group_tree().await?, |g| g.level);
                    Ok(())
                }
            }
        }
        Resource::UserGroup(group) => {
            let service = console.user_groups();
            match group.command {
                GroupSubcommand::List(page) => print_json(&service.list(page.into()).await?),
                GroupSubcommand::Get { id } => print_json(&service.get(id).await?),
                GroupSubcommand::Tree => {
                    print_tree::<UserGroup>(&service.flattened_tree().await?, |g| g.level);
                    Ok(())
                }
            }
        }
        Resource::Vendor(cmd) => match cmd.command {
            ListGetSubcommand::List(page) => print_json(&console.vendors().list(page.into()).await?),
            ListGetSubcommand::Get { id } => print_json(&console.vendors().get(id).await?),
        },
        Resource::Secret(cmd) => match cmd.command {
            ListGetSubcommand::List(page) => print_json(&console.secrets().list(page.into()).await?),
            ListGetSubcommand::Get { id } => print_json(&console.secrets().get(id).await?),
        },
        Resource::Radsec(cmd) => match cmd.command {
            ListGetSubcommand::List(page) => print_json(&console.radsec().list(page.into()).await?),
            ListGetSubcommand::Get { id } => print_json(&console.radsec().get(id).await?),
        },
        Resource::User(cmd) => match cmd.command {
            ListGetSubcommand::List(page) => print_json(&console.users().list(page.into()).await?),
            ListGetSubcommand::Get { id } => print_json(&console.users().get(id).await?),
        },
        Resource::AttributeGroup(cmd) => match cmd.command {
            ListGetSubcommand::List(page) => print_json(&console.attribute_groups().list(page.into()).await?),
            ListGetSubcommand::Get { id } => print_json(&console.attribute_groups().get(id).await?),
        },
        Resource::Attribute { group_id } => print_json(&console.attributes().by_group(group_id).await?),
        Resource::IdentifierTypes => print_json(&console.identifier_types().list_all().await?),
        Resource::Timezones => print_json(&console.timezones().list().await?),
        Resource::Admin(cmd) => match cmd.command {
            AdminSubcommand::List(page) => print_json(&console.admins().list(page.into()).await?),
            AdminSubcommand::Me => print_json(&console.admins().me().await?),
        },
        Resource::ApiKey(cmd) => match cmd.command {
            ApiKeySubcommand::List(page) => print_json(&console.api_keys().list(page.into()).await?),
            ApiKeySubcommand::Create { name, days } => {
                let input = ApiKeyCreate::new(&name, days)?;
                print_json(&console.api_keys().create(&input).await?)
            }
            ApiKeySubcommand::Revoke { id } => print_json(&console.api_keys().revoke(id).await?),
        },
    }
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

fn print_tree<T: TreeNode>(groups: &[T], level: impl Fn(&T) -> Option<u32>) {
    for line in tree_lines(groups, level) {
        println!("{line}");
    }
}

fn tree_lines<T: TreeNode>(groups: &[T], level: impl Fn(&T) -> Option<u32>) -> Vec<String> {
    groups
        .iter()
        .map(|g| {
            let indent: String = (0..level(g).unwrap_or(0)).map(|_| "  ").collect();
            format!("{indent}{} (#{})", g.name(), g.id())
        })
        .collect()
}
