use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    catalog::{CatalogRepository, InMemoryCatalogRepository, JsonCatalogRepository},
    cli::args::{Commands, QuantitySpec},
    models::{
        cart::{CartLine, CartSession, CartSummary},
        product::{Product, ProductId},
    },
    services::{CartService, CartView},
    store::CartStore,
    utils::{
        formatting::{
            format_cart_table, format_currency, format_date, format_empty_cart,
            format_product_table, format_summary,
        },
        Config,
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static CART: Emoji<'_, '_> = Emoji("🛒 ", "");

#[derive(Serialize)]
struct QuoteOutput<'a> {
    session: &'a CartSession,
    lines: &'a [CartLine],
    summary: CartSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShopAction {
    Add,
    Increase,
    Decrease,
    SetQuantity,
    Remove,
    Clear,
    Browse,
    Quit,
}

impl ShopAction {
    fn label(&self) -> &'static str {
        match self {
            ShopAction::Add => "Add a product",
            ShopAction::Increase => "Increase quantity (+)",
            ShopAction::Decrease => "Decrease quantity (-)",
            ShopAction::SetQuantity => "Set quantity",
            ShopAction::Remove => "Remove an item",
            ShopAction::Clear => "Clear cart",
            ShopAction::Browse => "Show catalog",
            ShopAction::Quit => "Quit",
        }
    }

    /// Line-level actions only make sense once the cart has something in it.
    fn available(cart_is_empty: bool) -> Vec<ShopAction> {
        if cart_is_empty {
            vec![ShopAction::Add, ShopAction::Browse, ShopAction::Quit]
        } else {
            vec![
                ShopAction::Add,
                ShopAction::Increase,
                ShopAction::Decrease,
                ShopAction::SetQuantity,
                ShopAction::Remove,
                ShopAction::Clear,
                ShopAction::Browse,
                ShopAction::Quit,
            ]
        }
    }
}

pub struct CliApp {
    config: Config,
    catalog: Arc<dyn CatalogRepository>,
}

impl CliApp {
    pub fn new(config: Config, catalog_override: Option<PathBuf>) -> Result<Self> {
        let catalog_path = catalog_override.or_else(|| config.catalog_path.clone());

        let catalog: Arc<dyn CatalogRepository> = match catalog_path {
            Some(path) => Arc::new(
                JsonCatalogRepository::load(&path)
                    .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
            ),
            None => {
                debug!("No catalog file configured, using the built-in catalog");
                Arc::new(InMemoryCatalogRepository::default_catalog())
            }
        };

        Ok(Self { config, catalog })
    }

    fn new_service(&self) -> CartService {
        CartService::new(
            self.catalog.clone(),
            CartStore::with_policy(self.config.shipping_policy()),
        )
    }

    pub fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Catalog => self.handle_catalog(),
            Commands::Quote { add, set, json } => self.handle_quote(&add, &set, json),
            Commands::Shop => self.handle_shop(),
        }
    }

    fn handle_catalog(&self) -> Result<()> {
        println!("{}", style("Products").bold().cyan());
        println!("{}", format_product_table(self.catalog.all()));
        Ok(())
    }

    fn handle_quote(&self, add: &[ProductId], set: &[QuantitySpec], json: bool) -> Result<()> {
        let mut service = self.new_service();

        for &product_id in add {
            if let Err(e) = service.add_product(product_id) {
                eprintln!("{} {}", WARNING, style(&e).yellow());
            }
        }

        for spec in set {
            if service.store().line(spec.product_id).is_none() {
                warn!("Ignoring --set for product {} which is not in the cart", spec.product_id);
                continue;
            }
            service.set_quantity(spec.product_id, spec.quantity);
        }

        let view = service.view();
        if json {
            let output = QuoteOutput {
                session: view.session,
                lines: view.lines,
                summary: view.summary,
            };
            let rendered =
                serde_json::to_string_pretty(&output).context("Failed to serialize cart")?;
            println!("{}", rendered);
        } else {
            render_cart(&view);
        }

        Ok(())
    }

    fn handle_shop(&self) -> Result<()> {
        let mut service = self.new_service();
        let theme = ColorfulTheme::default();

        {
            let session = service.store().session();
            println!("{} {}", CART, style("Shopping Cart").bold().cyan());
            println!(
                "Session {} started {}",
                style(session.id).dim(),
                style(format_date(&session.started_at)).dim()
            );
            info!("Interactive session {} started", session.id);
        }

        loop {
            render_cart(&service.view());

            let actions = ShopAction::available(service.store().is_empty());
            let labels: Vec<&str> = actions.iter().map(ShopAction::label).collect();
            let choice = Select::with_theme(&theme)
                .with_prompt("What would you like to do?")
                .items(&labels)
                .default(0)
                .interact()?;

            match actions[choice] {
                ShopAction::Add => self.shop_add(&mut service, &theme)?,
                ShopAction::Increase => {
                    if let Some(id) = pick_line(&service, &theme, "Increase which item?")? {
                        service.increment(id);
                    }
                }
                ShopAction::Decrease => {
                    if let Some(id) = pick_line(&service, &theme, "Decrease which item?")? {
                        if service.decrement(id).is_none() {
                            println!("{} Item removed from cart", CHECKMARK);
                        }
                    }
                }
                ShopAction::SetQuantity => {
                    if let Some(id) = pick_line(&service, &theme, "Change which item?")? {
                        let quantity: i64 = Input::with_theme(&theme)
                            .with_prompt("New quantity (0 removes the item)")
                            .interact_text()?;
                        if service.set_quantity(id, quantity).is_none() {
                            println!("{} Item removed from cart", CHECKMARK);
                        }
                    }
                }
                ShopAction::Remove => {
                    if let Some(id) = pick_line(&service, &theme, "Remove which item?")? {
                        if let Some(line) = service.remove_product(id) {
                            println!(
                                "{} Removed {}",
                                CHECKMARK,
                                style(&line.product.name).green()
                            );
                        }
                    }
                }
                ShopAction::Clear => {
                    let confirmed = Confirm::with_theme(&theme)
                        .with_prompt("Clear the whole cart?")
                        .default(false)
                        .interact()?;
                    if confirmed {
                        service.clear();
                        println!("{} Cart cleared", CHECKMARK);
                    }
                }
                ShopAction::Browse => self.handle_catalog()?,
                ShopAction::Quit => break,
            }
        }

        let summary = service.summary();
        info!(
            "Session {} ended with {} items, total {}",
            service.store().session().id,
            summary.total_items,
            summary.grand_total
        );
        Ok(())
    }

    fn shop_add(&self, service: &mut CartService, theme: &ColorfulTheme) -> Result<()> {
        let labels: Vec<String> = self
            .catalog
            .all()
            .iter()
            .map(product_label)
            .collect();

        let picked = Select::with_theme(theme)
            .with_prompt("Add which product?")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        let Some(index) = picked else {
            return Ok(());
        };
        let product_id = self.catalog.all()[index].id;

        match service.add_product(product_id) {
            Ok(line) => println!(
                "{} Added {} (x{})",
                CHECKMARK,
                style(&line.product.name).green(),
                line.quantity
            ),
            Err(e) => println!("{} {}", CROSS, style(&e).red()),
        }

        Ok(())
    }
}

fn product_label(product: &Product) -> String {
    format!(
        "{} {} ({})",
        product.image,
        product.name,
        format_currency(product.price)
    )
}

fn pick_line(service: &CartService, theme: &ColorfulTheme, prompt: &str) -> Result<Option<ProductId>> {
    let lines = service.store().lines();
    let labels: Vec<String> = lines
        .iter()
        .map(|line| format!("{} {} x{}", line.product.image, line.product.name, line.quantity))
        .collect();

    let picked = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?;

    Ok(picked.map(|index| lines[index].id()))
}

fn render_cart(view: &CartView<'_>) {
    println!();
    if view.is_empty() {
        print!("{}", format_empty_cart());
        return;
    }

    println!("{}", format_cart_table(view.lines));
    print!("{}", format_summary(&view.summary));
}
