//! Interacta API CLI binary.
//!
//! A command-line interface for interacting with the Interacta API.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use interactapi::cli::{Cli, Command};
use interactapi::{
    all_users, CommunityDetails, FieldDefinition, Get, Group, GroupListQuery, InteractaClient,
    InteractaError, List, LoginProvider, Page, Pagination, Post, PostDefinition, PostDetail,
    PostListQuery, PrettyPrint, Settings, SystemUser, UserListQuery, UserStats,
    ALL_USERS_PAGE_SIZE,
};
use serde::Serialize;
use tabled::{Table, Tabled};
use tracing::Level;

/// Exit code when a listing has nothing to show.
const NO_RESULTS: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match load_settings(cli.settings_file.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set INTERACTA_BASE_URL or pass --env <settings.toml>");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.verbose, settings.log_api_calls);

    match run(settings, cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_settings(path: Option<&Path>) -> interactapi::Result<Settings> {
    match path {
        Some(path) => Settings::from_toml_file(path),
        None => Settings::from_env(),
    }
}

fn init_tracing(verbose: bool, log_api_calls: bool) {
    let level = if verbose {
        Level::DEBUG
    } else if log_api_calls {
        Level::INFO
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(settings: Settings, cli: Cli) -> interactapi::Result<ExitCode> {
    if let Command::EchoSettings = cli.command {
        println!("{}", settings.pretty_print());
        return Ok(ExitCode::SUCCESS);
    }

    let mut client = InteractaClient::new(settings)?;
    client.login().await?;

    match cli.command {
        Command::Login => {
            let mode = if client.settings().service_account.is_some() {
                "service account"
            } else {
                "credentials"
            };
            println!("Logged in to {} with {mode}", client.base_url());
            Ok(ExitCode::SUCCESS)
        }
        Command::ListPosts {
            community,
            title,
            all,
        } => handle_list_posts(&client, community, title, all, cli.json).await,
        Command::GetPost { id } => {
            let post = PostDetail::get(&client, id).await?;
            output_single(&*post, cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::ListUsers {
            show_not_active,
            filter,
            login_providers,
            divergent_contact_email,
        } => {
            let query = UserListQuery {
                pagination: Pagination::with_page_size(ALL_USERS_PAGE_SIZE),
                full_text_filter: filter,
                status_filter: (!show_not_active).then(|| vec![0]),
                login_provider_filter: (!login_providers.is_empty()).then(|| {
                    login_providers
                        .into_iter()
                        .map(LoginProvider::from)
                        .collect()
                }),
                ..Default::default()
            };
            handle_list_users(&client, query, divergent_contact_email, cli.json).await
        }
        Command::ListGroups {
            filter,
            show_deleted,
        } => {
            let query = GroupListQuery {
                pagination: Pagination::with_page_size(ALL_USERS_PAGE_SIZE),
                full_text_filter: filter,
                status_filter: (!show_deleted).then(|| vec![0]),
                ..Default::default()
            };
            let groups = Group::list_all(&client, (), &query).await?;
            output_items(&groups, cli.json, GroupRow::new)
        }
        Command::Community { id, name, fields } => {
            handle_community(&client, id, name.as_deref(), fields, cli.json).await
        }
        Command::EchoSettings => Ok(ExitCode::SUCCESS),
    }
}

async fn handle_list_posts(
    client: &InteractaClient,
    community: u64,
    title: Option<String>,
    all: bool,
    json: bool,
) -> interactapi::Result<ExitCode> {
    let query = PostListQuery {
        title,
        ..Default::default()
    };

    if all {
        let posts = Post::list_all(client, community, &query).await?;
        return output_items(&posts, json, PostRow::new);
    }

    let page = Post::list_page(client, community, &query).await?;
    output_page(&page, json, PostRow::new)
}

async fn handle_list_users(
    client: &InteractaClient,
    query: UserListQuery,
    divergent_only: bool,
    json: bool,
) -> interactapi::Result<ExitCode> {
    let mut users = all_users(client, Some(query)).await?;
    let stats = UserStats::from_users(&users);

    if divergent_only {
        users.retain(|u| !u.divergent_provider_accounts().is_empty());
    }

    if users.is_empty() {
        eprintln!("No users match the given filters.");
        return Ok(ExitCode::from(NO_RESULTS));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(ExitCode::SUCCESS);
    }

    let rows: Vec<UserRow> = users.iter().map(|u| UserRow::new(u, &stats)).collect();
    println!("{}", Table::new(rows));

    let counts: Vec<CountRow> = stats
        .counts()
        .into_iter()
        .map(|(group, count)| CountRow { group, count })
        .collect();
    println!("\n{}", Table::new(counts));
    Ok(ExitCode::SUCCESS)
}

async fn handle_community(
    client: &InteractaClient,
    id: Option<u64>,
    name: Option<&str>,
    fields: bool,
    json: bool,
) -> interactapi::Result<ExitCode> {
    let community_id = match (id, name) {
        (Some(id), _) => id,
        (None, Some(name)) => client
            .settings()
            .community(name)
            .map(|c| c.community_id)
            .ok_or_else(|| {
                InteractaError::Config(format!("no community named '{name}' in the settings"))
            })?,
        (None, None) => {
            return Err(InteractaError::Config(
                "pass a community id or --name".to_string(),
            ))
        }
    };

    let details = CommunityDetails::get(client, community_id).await?;
    let definition = PostDefinition::get(client, community_id).await?;

    if fields {
        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&definition.field_definitions)?
            );
        } else {
            println!("Community --> {}\n", details.community.name);
            let rows: Vec<FieldRow> = definition
                .field_definitions
                .iter()
                .map(FieldRow::new)
                .collect();
            println!("{}", Table::new(rows));
        }
        return Ok(ExitCode::SUCCESS);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&*definition)?);
    } else {
        println!("Community --> {}\n", details.community.name);
        println!("{}", definition.pretty_print());
    }
    Ok(ExitCode::SUCCESS)
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> interactapi::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_items<T, R, F>(items: &[T], json: bool, to_row: F) -> interactapi::Result<ExitCode>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if items.is_empty() {
        eprintln!("No results.");
        return Ok(ExitCode::from(NO_RESULTS));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} items", items.len());
    }
    Ok(ExitCode::SUCCESS)
}

fn output_page<T, R, F>(page: &Page<T>, json: bool, to_row: F) -> interactapi::Result<ExitCode>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
        return Ok(ExitCode::SUCCESS);
    }

    let rows: Vec<R> = page.iter().map(to_row).collect();
    println!("{}", Table::new(rows));
    match (page.total_items_count, page.has_more()) {
        (Some(total), true) => println!(
            "\n{} of {} items (more available, use --all)",
            page.len(),
            total
        ),
        (Some(total), false) => println!("\n{} of {} items", page.len(), total),
        (None, true) => println!("\n{} items (more available, use --all)", page.len()),
        (None, false) => println!("\n{} items", page.len()),
    }
    Ok(ExitCode::SUCCESS)
}

// Table row types for non-JSON output

fn truncate(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[derive(Tabled)]
struct PostRow {
    id: u64,
    title: String,
    description: String,
}

impl PostRow {
    fn new(p: &Post) -> Self {
        Self {
            id: p.id,
            title: p.title.clone(),
            description: truncate(p.description_plain_text.as_deref().unwrap_or(""), 60),
        }
    }
}

#[derive(Tabled)]
struct UserRow {
    last_name: String,
    first_name: String,
    contact_email: String,
    login: String,
    status: &'static str,
}

impl UserRow {
    fn new(u: &SystemUser, stats: &UserStats) -> Self {
        let login = u
            .login_providers
            .iter()
            .map(|p| match u.provider_account_id(p) {
                Some(account) => format!("{p}: {account}"),
                None => p.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            last_name: u.last_name.clone(),
            first_name: u.first_name.clone(),
            contact_email: u.contact_email.clone().unwrap_or_default(),
            login,
            status: if stats.is_active(u.id) { "active" } else { "not active" },
        }
    }
}

#[derive(Tabled)]
struct CountRow {
    group: &'static str,
    count: usize,
}

#[derive(Tabled)]
struct GroupRow {
    id: u64,
    name: String,
    email: String,
    members: String,
    deleted: bool,
}

impl GroupRow {
    fn new(g: &Group) -> Self {
        Self {
            id: g.id,
            name: g.name.clone(),
            email: g.email.clone().unwrap_or_default(),
            members: g.members_count.map(|c| c.to_string()).unwrap_or_default(),
            deleted: g.deleted,
        }
    }
}

#[derive(Tabled)]
struct FieldRow {
    id: u64,
    label: String,
    #[tabled(rename = "type")]
    field_type: String,
    enum_values: String,
}

impl FieldRow {
    fn new(f: &FieldDefinition) -> Self {
        Self {
            id: f.id,
            label: f.label.clone().unwrap_or_default(),
            field_type: f.field_type.map(|t| t.to_string()).unwrap_or_default(),
            enum_values: f
                .enum_values
                .iter()
                .map(|v| format!("{}={}", v.id, v.label.as_deref().unwrap_or("")))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}
