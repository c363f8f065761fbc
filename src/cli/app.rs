use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rbacboard::{
    ACCESS_LEVEL_ATTR, Dashboard, DashboardConfig, FileBackend, MockAuthenticator,
    PERMISSION_CATALOG, Paged, PermissionSet, Role, RoleDraft, RoleFilter, RolePatch, User,
    UserDraft, UserPatch, UserStatus, is_cataloged,
};

#[derive(Parser)]
#[command(name = "rbacboard")]
#[command(about = "Administration console for the RBAC dashboard data core")]
struct Cli {
    /// Directory the collections are persisted under
    #[arg(long, default_value = "rbacboard_data")]
    data_dir: PathBuf,

    /// Entities per page in listings
    #[arg(long, default_value_t = 5)]
    page_size: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage the user collection
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Manage the role collection
    Roles {
        #[command(subcommand)]
        action: RoleAction,
    },
    /// Sign in (any non-empty credentials are accepted)
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the signed-in identity
    Whoami,
    /// Show collection counts and persistence bookkeeping
    Stats,
    /// List the recognized permission tokens
    Permissions,
}

#[derive(Subcommand)]
enum UserAction {
    /// List users with search, role filter, and pagination
    List {
        #[arg(long, default_value = "")]
        search: String,
        /// Role name, or "all"
        #[arg(long, default_value = "all")]
        role: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        role: String,
        /// Create the user as Inactive instead of Active
        #[arg(long)]
        inactive: bool,
    },
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<String>,
        /// "Active" or "Inactive"
        #[arg(long)]
        status: Option<String>,
    },
    Delete {
        id: u64,
    },
}

#[derive(Subcommand)]
enum RoleAction {
    /// List roles with search and pagination
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    Create {
        #[arg(long)]
        name: String,
        /// Permission token; repeat the flag for several
        #[arg(long = "permission")]
        permissions: Vec<String>,
        #[arg(long)]
        access_level: Option<String>,
    },
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        /// Replacement permission token; repeating the flag replaces the
        /// whole set
        #[arg(long = "permission")]
        permissions: Vec<String>,
        #[arg(long)]
        access_level: Option<String>,
    },
    Delete {
        id: u64,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = DashboardConfig::new().page_size(cli.page_size);
    config.validate()?;
    let backend = FileBackend::new(&cli.data_dir);

    match cli.command {
        Command::Users { action } => {
            let mut dashboard = Dashboard::open_with_config(backend, config).await;
            run_user_action(&mut dashboard, action).await
        }
        Command::Roles { action } => {
            let mut dashboard = Dashboard::open_with_config(backend, config).await;
            run_role_action(&mut dashboard, action).await
        }
        Command::Login { email, password } => {
            let auth = MockAuthenticator::new(backend);
            let identity = auth.login(&email, &password).await?;
            println!("Signed in as {} <{}> ({})", identity.name, identity.email, identity.role);
            Ok(())
        }
        Command::Logout => {
            let auth = MockAuthenticator::new(backend);
            auth.logout().await;
            println!("Signed out");
            Ok(())
        }
        Command::Whoami => {
            let auth = MockAuthenticator::new(backend);
            match auth.current_user().await {
                Some(identity) => {
                    println!("{} <{}> ({})", identity.name, identity.email, identity.role)
                }
                None => println!("Not signed in"),
            }
            Ok(())
        }
        Command::Stats => {
            let dashboard = Dashboard::open_with_config(backend, config).await;
            let stats = dashboard.stats();
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(())
        }
        Command::Permissions => {
            for token in PERMISSION_CATALOG {
                println!("{}", token);
            }
            Ok(())
        }
    }
}

async fn run_user_action(dashboard: &mut Dashboard, action: UserAction) -> Result<()> {
    match action {
        UserAction::List { search, role, page } => {
            let filter = RoleFilter::parse(&role);
            let listing = dashboard.list_users(&search, &filter, page);
            print_user_page(&listing);
        }
        UserAction::Create {
            name,
            email,
            role,
            inactive,
        } => {
            let mut draft = UserDraft::new(name, email, role);
            if inactive {
                draft = draft.with_status(UserStatus::Inactive);
            }
            let created = dashboard.create_user(draft);
            println!("Created user {} ({})", created.id, created.name);
        }
        UserAction::Update {
            id,
            name,
            email,
            role,
            status,
        } => {
            let mut patch = UserPatch::new();
            if let Some(name) = name {
                patch = patch.name(name);
            }
            if let Some(email) = email {
                patch = patch.email(email);
            }
            if let Some(role) = role {
                patch = patch.role(role);
            }
            if let Some(status) = status {
                let status: UserStatus = status.parse().map_err(|err: String| anyhow!(err))?;
                patch = patch.status(status);
            }
            if patch.is_empty() {
                println!("Nothing to change for user {}", id);
            } else {
                match dashboard.update_user(id, patch) {
                    Some(updated) => println!("Updated user {} ({})", updated.id, updated.name),
                    None => println!("No user with id {}", id),
                }
            }
        }
        UserAction::Delete { id } => match dashboard.delete_user(id) {
            Some(removed) => println!("Deleted user {} ({})", removed.id, removed.name),
            None => println!("No user with id {}", id),
        },
    }

    dashboard.flush().await;
    Ok(())
}

async fn run_role_action(dashboard: &mut Dashboard, action: RoleAction) -> Result<()> {
    match action {
        RoleAction::List { search, page } => {
            let listing = dashboard.list_roles(&search, page);
            print_role_page(&listing);
        }
        RoleAction::Create {
            name,
            permissions,
            access_level,
        } => {
            warn_uncataloged(&permissions);
            let mut draft = RoleDraft::new(name).with_permissions(PermissionSet::from_tokens(permissions));
            if let Some(level) = access_level {
                draft = draft.with_access_level(level);
            }
            let created = dashboard.create_role(draft);
            println!("Created role {} ({})", created.id, created.name);
        }
        RoleAction::Update {
            id,
            name,
            permissions,
            access_level,
        } => {
            warn_uncataloged(&permissions);
            let mut patch = RolePatch::new();
            if let Some(name) = name {
                patch = patch.name(name);
            }
            if !permissions.is_empty() {
                patch = patch.permissions(PermissionSet::from_tokens(permissions));
            }
            if let Some(level) = access_level {
                let mut attributes = dashboard
                    .get_role(id)
                    .map(|role| role.custom_attributes.clone())
                    .unwrap_or_default();
                attributes.insert(ACCESS_LEVEL_ATTR.to_string(), level);
                patch = patch.custom_attributes(attributes);
            }
            if patch.is_empty() {
                println!("Nothing to change for role {}", id);
            } else {
                match dashboard.update_role(id, patch) {
                    Some(updated) => println!("Updated role {} ({})", updated.id, updated.name),
                    None => println!("No role with id {}", id),
                }
            }
        }
        RoleAction::Delete { id } => match dashboard.delete_role(id) {
            Some(removed) => println!("Deleted role {} ({})", removed.id, removed.name),
            None => println!("No role with id {}", id),
        },
    }

    dashboard.flush().await;
    Ok(())
}

fn warn_uncataloged(tokens: &[String]) {
    for token in tokens {
        if !is_cataloged(token) {
            println!("Warning: '{}' is not a recognized permission token", token);
        }
    }
}

fn print_user_page(page: &Paged<User>) {
    println!(
        "{:<5} {:<22} {:<28} {:<10} {:<8}",
        "ID", "NAME", "EMAIL", "ROLE", "STATUS"
    );
    for user in &page.items {
        println!(
            "{:<5} {:<22} {:<28} {:<10} {:<8}",
            user.id,
            user.name,
            user.email,
            user.role,
            user.status.to_string()
        );
    }
    print_page_footer(page.first_index(), page.last_index(), page.total_matching, page.total_pages());
}

fn print_role_page(page: &Paged<Role>) {
    println!("{:<5} {:<14} {:<10} PERMISSIONS", "ID", "NAME", "ACCESS");
    for role in &page.items {
        println!(
            "{:<5} {:<14} {:<10} {}",
            role.id,
            role.name,
            role.access_level().unwrap_or("-"),
            role.permissions.display()
        );
    }
    print_page_footer(page.first_index(), page.last_index(), page.total_matching, page.total_pages());
}

fn print_page_footer(first: usize, last: usize, total: usize, pages: usize) {
    println!("Showing {} to {} of {} ({} page(s))", first, last, total, pages);
}
