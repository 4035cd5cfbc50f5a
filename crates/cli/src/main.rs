//! Jewelry Shop CLI - drive a storefront session from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! shop-cli products list --category rings
//!
//! # Put two bangles in the cart and look at it
//! shop-cli cart add 1 --quantity 2
//! shop-cli cart show
//!
//! # Save a product for later, then move it into the cart
//! shop-cli wishlist toggle 6
//! shop-cli wishlist to-cart 6
//!
//! # Rename the shop
//! shop-cli settings update --shop-name "Aurum Jewels"
//!
//! # Place the order
//! shop-cli checkout --method upi --upi-id shopper@upi
//! ```
//!
//! # Commands
//!
//! - `header` - Show the shop header
//! - `products` - List and inspect catalog products
//! - `cart` - Show and edit the cart
//! - `wishlist` - Show and edit the wishlist
//! - `settings` - Show, update, and reset the shop settings
//! - `checkout` - Place an order for the cart
//!
//! State is kept between runs in `SHOP_STATE_DIR` (see the storefront
//! `config` module), or in the directory given by `--state-dir`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use jewelry_shop_core::ProductId;
use jewelry_shop_storefront::catalog::FixtureCatalog;
use jewelry_shop_storefront::config::{LogFormat, ShopConfig};
use jewelry_shop_storefront::state::ShopSession;

mod commands;

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(author, version, about = "Jewelry Shop session tools")]
struct Cli {
    /// Directory holding session state (overrides `SHOP_STATE_DIR`)
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the shop header
    Header,
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Manage the shop settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Place an order for everything in the cart
    Checkout {
        /// Payment method
        #[arg(short, long, value_enum, default_value_t = Method::Cod)]
        method: Method,

        /// UPI ID, required with `--method upi`
        #[arg(long)]
        upi_id: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products
    List {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show one product
    Show {
        /// Product ID
        id: ProductId,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add a catalog product
    Add {
        /// Product ID
        id: ProductId,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Set a product's quantity (clamped to 1..=99)
    Update {
        /// Product ID
        id: ProductId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show the wishlist
    Show,
    /// Add a catalog product
    Add {
        /// Product ID
        id: ProductId,
    },
    /// Remove a product
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Add the product if absent, remove it if present
    Toggle {
        /// Product ID
        id: ProductId,
    },
    /// Add one unit of a wishlisted product to the cart
    ToCart {
        /// Product ID
        id: ProductId,
    },
    /// Empty the wishlist
    Clear,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show the settings record
    Show,
    /// Merge new values into the settings
    Update {
        /// Shop name shown in the header
        #[arg(long)]
        shop_name: Option<String>,

        /// Tagline shown under the shop name
        #[arg(long)]
        tagline: Option<String>,

        /// Extra field as `key=value`; the value is parsed as JSON when possible
        #[arg(long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
    /// Restore the default shop name and tagline
    Reset,
}

#[derive(Clone, Copy, ValueEnum)]
enum Method {
    /// Cash on delivery
    Cod,
    /// UPI transfer
    Upi,
}

fn main() {
    let cli = Cli::parse();

    let config = match ShopConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_format);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, config);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("jewelry_shop_storefront=info,jewelry_shop_cli=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn run(cli: Cli, config: ShopConfig) -> Result<(), Box<dyn std::error::Error>> {
    let config = match cli.state_dir {
        Some(dir) => config.with_state_dir(dir),
        None => config,
    };
    let session = ShopSession::from_config(&config);
    let catalog = FixtureCatalog::new();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Header => commands::header::show(&session, &mut out)?,
        Commands::Products { action } => match action {
            ProductsAction::List { category } => {
                commands::products::list(&catalog, &session, category.as_deref(), &mut out)?;
            }
            ProductsAction::Show { id } => {
                commands::products::show(&catalog, &session, id, &mut out)?;
            }
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&session, &mut out)?,
            CartAction::Add { id, quantity } => {
                commands::cart::add(&catalog, &session, id, quantity, &mut out)?;
            }
            CartAction::Remove { id } => commands::cart::remove(&session, id, &mut out)?,
            CartAction::Update { id, quantity } => {
                commands::cart::update(&session, id, quantity, &mut out)?;
            }
            CartAction::Clear => commands::cart::clear(&session, &mut out)?,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::wishlist::show(&session, &mut out)?,
            WishlistAction::Add { id } => {
                commands::wishlist::add(&catalog, &session, id, &mut out)?;
            }
            WishlistAction::Remove { id } => commands::wishlist::remove(&session, id, &mut out)?,
            WishlistAction::Toggle { id } => {
                commands::wishlist::toggle(&catalog, &session, id, &mut out)?;
            }
            WishlistAction::ToCart { id } => commands::wishlist::to_cart(&session, id, &mut out)?,
            WishlistAction::Clear => commands::wishlist::clear(&session, &mut out)?,
        },
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show(&session, &mut out)?,
            SettingsAction::Update {
                shop_name,
                tagline,
                fields,
            } => {
                let update = commands::settings::build_update(shop_name, tagline, &fields)?;
                commands::settings::update(&session, update, &mut out)?;
            }
            SettingsAction::Reset => commands::settings::reset(&session, &mut out)?,
        },
        Commands::Checkout { method, upi_id } => {
            let payment = commands::checkout::payment_method(method, upi_id);
            commands::checkout::place(&session, payment, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
