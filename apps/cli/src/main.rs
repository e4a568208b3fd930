use anyhow::Context;
use campus_auth::{Decision, Role, Session, SessionProvider, User};
use campus_config::load as load_config;
use campus_profile::{ProfileCompleteHandler, View};
use campus_runtime::{telemetry, AccessServices};
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "campus")]
#[command(about = "Inspect and drive the Campus session and profile gate")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a session as a successful login would
    Login {
        #[arg(long)]
        token: String,
        /// User record as JSON, e.g. '{"role":"college"}'
        #[arg(long)]
        user: String,
    },
    /// Clear every session key
    Logout,
    /// Print the stored session
    Session,
    /// Check whether the session may enter a route restricted to the given roles
    Authorize {
        #[arg(long = "role", required = true)]
        roles: Vec<Role>,
    },
    /// Run a profile completion check
    CheckProfile,
    /// Mount the profile gate and print what it would show
    Gate {
        /// Re-run the check as the onboarding form does after submission
        #[arg(long)]
        submitted: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;
    let config = load_config().context("failed to load configuration")?;
    let services =
        AccessServices::initialise(&config).context("failed to initialise access services")?;

    match cli.command {
        Commands::Login { token, user } => login(&services, token, &user),
        Commands::Logout => logout(&services),
        Commands::Session => show_session(&services),
        Commands::Authorize { roles } => {
            authorize(&services, &roles);
            Ok(())
        }
        Commands::CheckProfile => {
            let verdict = services.gate.checker().check_completion().await;
            println!("{}", serde_json::to_string(&verdict)?);
            Ok(())
        }
        Commands::Gate { submitted } => {
            let mut view = services.gate.mount().await;
            if submitted && view == View::Onboarding {
                view = services.gate.on_profile_complete().await;
            }
            println!("{}", describe_view(view));
            Ok(())
        }
    }
}

fn login(services: &AccessServices, token: String, user: &str) -> anyhow::Result<()> {
    let user: User = serde_json::from_str(user).context("user must be a JSON object")?;
    if user.role.is_some() && user.role().is_none() {
        tracing::warn!(role = ?user.role, "storing a role the guard does not recognise");
    }

    services
        .sessions
        .store(&Session::new(token, user))
        .context("failed to store session")?;
    info!("session stored");
    Ok(())
}

fn logout(services: &AccessServices) -> anyhow::Result<()> {
    services
        .sessions
        .clear()
        .context("failed to clear session")?;
    info!("session cleared");
    Ok(())
}

fn show_session(services: &AccessServices) -> anyhow::Result<()> {
    match services.sessions.read() {
        Ok(session) => {
            let user = serde_json::to_string(&session.user)?;
            println!("authenticated: {}", session.authenticated);
            println!("user: {user}");
        }
        Err(error) => println!("no session: {error}"),
    }
    Ok(())
}

fn authorize(services: &AccessServices, roles: &[Role]) {
    match services.guard.authorize(roles) {
        Decision::Allow => println!("allow"),
        Decision::Redirect(target) => println!("redirect {target}"),
    }
}

fn describe_view(view: View) -> &'static str {
    match view {
        View::Loading => "loading",
        View::Onboarding => "onboarding",
        View::Protected => "protected",
    }
}
