//! Ramstuga CLI - drive the shop cart from a terminal.
//!
//! The cart is kept in a JSON file standing in for the browser's storage, so
//! successive invocations behave like reloads of the shop page.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog in English
//! ramstuga --lang en catalog
//!
//! # Add a colour frame in a non-default size
//! ramstuga add kulor-ram --size "50×70 cm" --color sage --orientation landscape
//!
//! # Ship to the rest of Europe and get the payment link and order mail
//! ramstuga ship eu
//! ramstuga checkout --mail
//!
//! # Follow a campaign link
//! ramstuga open "https://ramstuga.se/shop.html?add=maatwerk-lijst"
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ramstuga_storefront::cart::Orientation;
use ramstuga_storefront::pricing::ShippingRegion;
use url::Url;

mod commands;

use commands::settings::ConsentAction;
use commands::{CliError, Session, SessionOptions};

#[derive(Parser)]
#[command(name = "ramstuga")]
#[command(author, version, about = "Ramstuga shop cart")]
struct Cli {
    /// Page language (sv, en, nl); defaults to the stored preference
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Storage file (overrides `RAMSTUGA_STORE_PATH`)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Catalog YAML to use instead of the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products and projects
    Catalog,
    /// Add one unit of a product
    Add {
        /// Product id
        id: String,

        /// Size, for products sold in several sizes
        #[arg(long)]
        size: Option<String>,

        /// Colour, for custom-colour frames
        #[arg(long)]
        color: Option<String>,

        /// Orientation (portrait, landscape)
        #[arg(long)]
        orientation: Option<Orientation>,
    },
    /// Set the quantity of a cart line
    Qty {
        /// Line key as shown by `show`
        key: String,
        /// New quantity
        value: String,
    },
    /// Remove a cart line
    Remove {
        /// Line key as shown by `show`
        key: String,
    },
    /// Empty the cart
    Clear,
    /// Show the cart and totals
    Show,
    /// Render the shop page elements
    Render {
        /// Product card to highlight
        #[arg(long)]
        focus: Option<String>,
    },
    /// Show or set the shipping region (se, eu)
    Ship { region: Option<ShippingRegion> },
    /// Show or remember the preferred language
    Lang { code: Option<String> },
    /// Print today's payment reference
    Ref {
        /// Use the copy action instead of printing
        #[arg(long)]
        copy: bool,
    },
    /// Print the payment link
    Checkout {
        /// Also print the order confirmation mail link
        #[arg(long)]
        mail: bool,
    },
    /// Show or record analytics consent
    Consent {
        #[arg(value_enum, default_value = "show")]
        action: ConsentAction,
    },
    /// Apply `add` and `focus` from a shop URL
    Open { url: Url },
}

#[allow(clippy::print_stderr)]
fn main() {
    // Defaults to warnings only so command output stays readable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ramstuga_storefront=warn,ramstuga=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let session = Session::open(&SessionOptions {
        lang: cli.lang,
        store: cli.store,
        catalog: cli.catalog,
        assume_yes: cli.yes,
    })?;

    match cli.command {
        Commands::Catalog => commands::cart::catalog(&session),
        Commands::Add {
            id,
            size,
            color,
            orientation,
        } => commands::cart::add(&session, &id, size, color, orientation)?,
        Commands::Qty { key, value } => commands::cart::qty(&session, &key, &value),
        Commands::Remove { key } => commands::cart::remove(&session, &key),
        Commands::Clear => commands::cart::clear(&session),
        Commands::Show => commands::cart::show(&session),
        Commands::Render { focus } => commands::cart::render(&session, focus.as_deref()),
        Commands::Ship { region } => commands::checkout::ship(&session, region),
        Commands::Lang { code } => commands::settings::lang(&session, code.as_deref())?,
        Commands::Ref { copy } => commands::checkout::reference(&session, copy),
        Commands::Checkout { mail } => commands::checkout::checkout(&session, mail),
        Commands::Consent { action } => commands::settings::consent(&session, action),
        Commands::Open { url } => commands::cart::open(&session, &url),
    }
    Ok(())
}
