mod render;


use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use client::net::api::{PageRequest, ProductClient};
use client::net::auth::AuthClient;
use client::net::config::{ApiConfig, ConfigError};
use client::net::error::{ApiError, ErrorCode};
use client::net::types::{ProductFormData, ProductPatch};
use client::state::catalog::CatalogState;
use client::state::form::ProductForm;
use client::state::token::CookieFileTokenStore;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("nothing to update; pass at least one field flag")]
    EmptyUpdate,
}

#[derive(Parser, Debug)]
#[command(name = "product-cli", about = "Product admin API CLI")]
struct Cli {
    /// API root; defaults to `PRODUCT_API_URL`, then `NEXT_PUBLIC_API_URL`.
    #[arg(long)]
    api_url: Option<String>,

    #[arg(long, env = "PRODUCT_ADMIN_SESSION_FILE", default_value = ".product-admin-session")]
    session_file: PathBuf,

    /// Print raw JSON instead of tables.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exchange credentials for a session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PRODUCT_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Drop the stored session token.
    Logout,
    /// Report whether a session token is stored.
    Status,
    Products(ProductsCommand),
}

#[derive(Args, Debug)]
struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProductsSubcommand {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Rows per page; at least 1.
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
        limit: u32,
        /// Filter the fetched page by name, description or category.
        #[arg(long)]
        search: Option<String>,
    },
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        category: String,
        #[arg(long, default_value_t = 0)]
        quantity: u32,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        quantity: Option<u32>,
    },
    Delete {
        id: i64,
    },
}

struct CliContext {
    json: bool,
    tokens: Arc<CookieFileTokenStore>,
    auth: AuthClient,
    products: ProductClient,
}

impl CliContext {
    fn new(cli: &Cli) -> Result<Self, CliError> {
        let config = match &cli.api_url {
            Some(url) => ApiConfig::from_lookup(|key| {
                if key == "PRODUCT_API_URL" { Some(url.clone()) } else { std::env::var(key).ok() }
            })?,
            None => ApiConfig::from_env()?,
        };
        let http = config.http_client()?;
        let tokens = Arc::new(CookieFileTokenStore::new(&cli.session_file));
        let auth = AuthClient::with_http(http.clone(), config.clone(), tokens.clone());
        let products = ProductClient::with_http(http, config, tokens.clone());
        Ok(Self { json: cli.json, tokens, auth, products })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = CliContext::new(&cli)?;
    match cli.command {
        Command::Login { email, password } => run_login(&ctx, &email, &password).await,
        Command::Logout => {
            ctx.auth
                .logout(|path| eprintln!("session cleared; sign in again via {path}"));
            Ok(())
        }
        Command::Status => {
            if ctx.auth.is_authenticated() {
                println!("logged in ({})", ctx.tokens.path().display());
            } else {
                println!("not logged in");
            }
            Ok(())
        }
        Command::Products(products) => run_products(&ctx, products).await,
    }
}

async fn run_login(ctx: &CliContext, email: &str, password: &str) -> Result<(), CliError> {
    let login = ctx.auth.login(email, password).await?;
    if ctx.json {
        return print_json(&login.user);
    }
    println!("logged in as {} <{}>", login.user.name, login.user.email);
    Ok(())
}

async fn run_products(ctx: &CliContext, products: ProductsCommand) -> Result<(), CliError> {
    match products.command {
        ProductsSubcommand::List { page, limit, search } => run_list(ctx, page, limit, search.as_deref()).await,
        ProductsSubcommand::Get { id } => {
            let product = ctx.products.fetch_product(id).await?;
            if ctx.json {
                return print_json(&product);
            }
            print!("{}", render::product_table(&[&product]));
            if !product.description.is_empty() {
                println!("\n{}", product.description);
            }
            Ok(())
        }
        ProductsSubcommand::Create { name, description, price, category, quantity } => {
            let mut form = ProductForm::create();
            form.data = ProductFormData { name, description, price, category, quantity };
            form.begin_submit();
            let result = ctx.products.create_product(&form.data).await;
            form.finish_submit(result.as_ref());
            let product = result?;
            if ctx.json {
                return print_json(&product);
            }
            for line in render::form_report(&form) {
                println!("{line}");
            }
            print!("{}", render::product_table(&[&product]));
            Ok(())
        }
        ProductsSubcommand::Update { id, name, description, price, category, quantity } => {
            let patch = ProductPatch { name, description, price, category, quantity };
            if patch.is_empty() {
                return Err(CliError::EmptyUpdate);
            }
            let product = ctx.products.update_product(id, &patch).await?;
            if ctx.json {
                return print_json(&product);
            }
            println!("Product updated successfully");
            print!("{}", render::product_table(&[&product]));
            Ok(())
        }
        ProductsSubcommand::Delete { id } => {
            ctx.products.delete_product(id).await?;
            if !ctx.json {
                println!("Product deleted successfully");
            }
            Ok(())
        }
    }
}

async fn run_list(ctx: &CliContext, page: u32, limit: u32, search: Option<&str>) -> Result<(), CliError> {
    let mut catalog = CatalogState::new(limit);
    let request: PageRequest = catalog.begin_load(page);
    let rows = ctx.products.fetch_products(request).await?;
    catalog.finish_load(request, Ok(rows));
    if let Some(term) = search {
        catalog.set_search(term);
    }

    let visible = catalog.visible();
    if ctx.json {
        return print_json(&visible);
    }
    if catalog.is_empty() {
        println!("No products found");
    } else {
        print!("{}", render::product_table(&visible));
    }
    println!("{}", render::page_footer(&catalog));
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

fn report_error(e: &CliError) {
    match e {
        CliError::Api(api) => {
            eprintln!("error [{}]: {api}", api.error_code());
            if api.is_auth() {
                eprintln!("hint: run `product-cli login` first");
            }
            if let Some(errors) = api.validation_errors() {
                for line in render::field_error_lines(errors) {
                    eprintln!("{line}");
                }
            }
        }
        other => eprintln!("error: {other}"),
    }
}
