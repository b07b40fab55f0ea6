use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use order_desk::api::auth::{AdminUser, Session};
use order_desk::api::client::build_client;
use order_desk::api::orders::HttpOrderApi;
use order_desk::config::Config;
use order_desk::error::DeskError;
use order_desk::filter::OrderFilter;
use order_desk::manager::OrderStatusManager;
use order_desk::types::order::{OrderStatus, PaymentStatus};
use order_desk::view;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "order-desk", author, version, about = "Storefront order back office")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse and update orders
    #[command(subcommand)]
    Orders(OrdersCommand),
    /// Manage the stored admin session
    #[command(subcommand)]
    Session(SessionCommand),
}

#[derive(Subcommand, Debug)]
enum OrdersCommand {
    /// List orders, optionally filtered
    List(ListArgs),
    /// Show one order in detail
    Show { id: String },
    /// Order counts
    Stats,
    /// Change the fulfillment status
    SetStatus { id: String, status: OrderStatus },
    /// Change the payment status
    SetPayment { id: String, status: PaymentStatus },
    /// Attach a tracking number (empty values are ignored)
    Track { id: String, value: String },
}

#[derive(Args, Debug)]
struct ListArgs {
    #[arg(long)]
    status: Option<OrderStatus>,
    #[arg(long)]
    payment: Option<PaymentStatus>,
    #[arg(long, default_value = "")]
    search: String,
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Store a token issued by the login endpoint
    Login {
        #[arg(long, env = "ORDER_DESK_TOKEN")]
        token: String,
        /// Admin user record as JSON: {"id","name","email","role"}
        #[arg(long)]
        user: Option<String>,
    },
    /// Show who the stored session belongs to
    Whoami,
    /// Forget the stored token and user
    Logout,
}

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let config = Config::load();

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            if e.is_alert() {
                eprintln!("ALERT: {e}");
            } else {
                eprintln!("error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &Config) -> Result<(), DeskError> {
    match command {
        Command::Session(cmd) => run_session(cmd, config),
        Command::Orders(cmd) => run_orders(cmd, config).await,
    }
}

fn run_session(command: SessionCommand, config: &Config) -> Result<(), DeskError> {
    match command {
        SessionCommand::Login { token, user } => {
            let user = user
                .as_deref()
                .map(|raw| serde_json::from_str::<AdminUser>(raw))
                .transpose()?;
            Session::new(token, user).save(&config.session_file)
        }
        SessionCommand::Whoami => {
            let session = Session::load(&config.session_file)?;
            if !session.is_authenticated() {
                return Err(DeskError::NotAuthenticated);
            }
            match &session.admin_user {
                Some(user) => println!("{} <{}> role={}", user.name, user.email, user.role),
                None => println!("signed in (no user record)"),
            }
            println!("admin: {}", session.is_admin());
            Ok(())
        }
        SessionCommand::Logout => Session::clear(&config.session_file),
    }
}

async fn run_orders(command: OrdersCommand, config: &Config) -> Result<(), DeskError> {
    let session = Session::load(&config.session_file)?;
    let api = HttpOrderApi::new(build_client(config)?, config.api_url.clone());
    let mut manager = OrderStatusManager::new(api, session);

    manager.list_orders().await?;

    match command {
        OrdersCommand::List(args) => {
            let filter = OrderFilter {
                order_status: args.status,
                payment_status: args.payment,
                search: args.search,
            };
            println!("{}", view::render_stats(&manager.stats()));
            println!("{}", view::render_table(manager.filtered(&filter)));
        }
        OrdersCommand::Show { id } => {
            let order = manager.find(&id).ok_or(DeskError::UnknownOrder(id.clone()))?;
            print!("{}", view::render_details(order, &config.api_url));
        }
        OrdersCommand::Stats => println!("{}", view::render_stats(&manager.stats())),
        OrdersCommand::SetStatus { id, status } => {
            ensure_known(&manager, &id)?;
            manager.set_order_status(&id, status).await?;
            print_order(&manager, &id);
        }
        OrdersCommand::SetPayment { id, status } => {
            ensure_known(&manager, &id)?;
            manager.set_payment_status(&id, status).await?;
            print_order(&manager, &id);
        }
        OrdersCommand::Track { id, value } => {
            ensure_known(&manager, &id)?;
            if manager.set_tracking_number(&id, &value).await? {
                print_order(&manager, &id);
            } else if let Some(existing) = manager.find(&id).and_then(|o| o.tracking_number.as_deref()) {
                println!("Order already tracked as {existing}; not replaced");
            } else {
                println!("Empty tracking number ignored");
            }
        }
    }
    Ok(())
}

fn ensure_known(manager: &OrderStatusManager<HttpOrderApi>, id: &str) -> Result<(), DeskError> {
    manager
        .find(id)
        .map(|_| ())
        .ok_or_else(|| DeskError::UnknownOrder(id.to_string()))
}

fn print_order(manager: &OrderStatusManager<HttpOrderApi>, id: &str) {
    match manager.find(id) {
        Some(order) => println!("{}", view::render_row(order)),
        None => println!("Order list could not be reloaded"),
    }
}
