//! # Counter Commands
//!
//! Line commands the operator types, and the session state they act on.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Counter Lifecycle                                    │
//! │                                                                         │
//! │  customer <name> <contact> <email>                                      │
//! │        │  (registers the customer and opens an order)                   │
//! │        ▼                                                                │
//! │  ┌──────────┐  add/remove  ┌──────────┐   bill    ┌──────────┐   pay    │
//! │  │   New    │────────────►│ Building │─────────►│ Pending  │────────► Paid │
//! │  └──────────┘             └──────────┘          └──────────┘          │
//! │        ▲                        │                                       │
//! │        └──────── clear ─────────┘                                       │
//! │                                                                         │
//! │  new ──► fresh order for the same customer                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Menu numbers shown by `menu` are 1-based.

use std::sync::Arc;

use tracing::{debug, info, warn};

use cafe_core::menu::MenuCatalog;
use cafe_core::validation::parse_adjustment;
use cafe_core::{Checkout, CoreError, Customer, MenuItem, OrderObserver};

use crate::config::CounterConfig;
use crate::error::AppError;

/// A parsed operator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Customer {
        name: String,
        contact: String,
        email: String,
    },
    Menu,
    Details(usize),
    Add { number: usize, quantity: i64 },
    Remove(usize),
    Cart,
    Clear,
    Bill { discount: String, tip: String },
    Pay,
    New,
    History,
    Help,
    Quit,
}

/// What the input loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Reply(String),
    Quit,
}

pub const HELP: &str = "\
Commands:
  customer <name> <contact> <email>   register customer and open an order
  menu                                list the menu
  details <n>                         show details of menu item n
  add <n> [qty]                       add qty (default 1) of menu item n
  remove <n>                          remove one unit of menu item n
  cart                                show the cart
  clear                               empty the cart
  bill [discount] [tip]               generate the bill
  pay                                 confirm payment
  new                                 start a new order
  history                             list placed orders
  help                                show this help
  quit                                exit";

// =============================================================================
// Parsing
// =============================================================================

/// Parses one input line. Blank lines yield `Ok(None)`.
///
/// ## Examples
/// ```rust
/// use cafe_counter::commands::{parse, Command};
///
/// assert_eq!(parse("add 2 3").unwrap(), Some(Command::Add { number: 2, quantity: 3 }));
/// assert_eq!(parse("   ").unwrap(), None);
/// assert!(parse("fly").is_err());
/// ```
pub fn parse(line: &str) -> Result<Option<Command>, AppError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&verb, args)) = words.split_first() else {
        return Ok(None);
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "customer" => {
            // Name may contain spaces; contact and email are the last two words.
            if args.len() < 3 {
                return Err(AppError::validation(
                    "Usage: customer <name> <contact> <email>",
                ));
            }
            let (name, rest) = args.split_at(args.len() - 2);
            Command::Customer {
                name: name.join(" "),
                contact: rest[0].to_string(),
                email: rest[1].to_string(),
            }
        }
        "menu" => Command::Menu,
        "details" => Command::Details(menu_number(args.first())?),
        "add" => {
            let number = menu_number(args.first())?;
            let quantity = match args.get(1) {
                Some(text) => text.parse::<i64>().map_err(|_| quantity_error())?,
                None => 1,
            };
            Command::Add { number, quantity }
        }
        "remove" => Command::Remove(menu_number(args.first())?),
        "cart" => Command::Cart,
        "clear" => Command::Clear,
        "bill" => Command::Bill {
            discount: args.first().copied().unwrap_or_default().to_string(),
            tip: args.get(1).copied().unwrap_or_default().to_string(),
        },
        "pay" => Command::Pay,
        "new" => Command::New,
        "history" => Command::History,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(AppError::not_found("Command", other)),
    };
    Ok(Some(command))
}

fn menu_number(arg: Option<&&str>) -> Result<usize, AppError> {
    arg.and_then(|text| text.parse::<usize>().ok())
        .filter(|n| *n >= 1)
        .ok_or_else(|| AppError::validation("Please give a menu item number (see `menu`)."))
}

fn quantity_error() -> AppError {
    AppError::validation("Quantity must be a valid number between 1 and 50.")
}

// =============================================================================
// Session
// =============================================================================

/// Everything one counter session holds between commands.
pub struct Counter {
    config: CounterConfig,
    catalog: MenuCatalog,
    checkout: Option<Checkout>,
    observers: Vec<Arc<dyn OrderObserver>>,
}

impl Counter {
    pub fn new(config: CounterConfig, catalog: MenuCatalog) -> Self {
        Counter {
            config,
            catalog,
            checkout: None,
            observers: Vec::new(),
        }
    }

    /// Adds a subscriber attached to every order this counter opens.
    pub fn with_observer(mut self, observer: Arc<dyn OrderObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    pub fn checkout(&self) -> Option<&Checkout> {
        self.checkout.as_ref()
    }

    /// Runs one command against the session.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, AppError> {
        debug!(?command, "Executing command");
        let reply = match command {
            Command::Customer {
                name,
                contact,
                email,
            } => self.register_customer(&name, &contact, &email)?,
            Command::Menu => self.menu(),
            Command::Details(number) => self.item(number)?.details(),
            Command::Add { number, quantity } => {
                let item = self.item(number)?.clone();
                self.session()?
                    .add_to_cart(item.clone(), quantity)
                    .map_err(|err| match err {
                        CoreError::Validation(_) => quantity_error(),
                        other => AppError::from(other),
                    })?;
                format!("Added {} x {}.\n{}", quantity, item.name(), self.cart()?)
            }
            Command::Remove(number) => {
                let item = self.item(number)?.clone();
                if !self.session()?.remove_one(&item)? {
                    warn!(item = item.name(), "Remove requested for item not in cart");
                    return Err(AppError::validation("Item could not be removed."));
                }
                self.cart()?
            }
            Command::Cart => self.cart()?,
            Command::Clear => {
                self.session()?.clear_cart()?;
                self.cart()?
            }
            Command::Bill { discount, tip } => {
                let discount = parse_adjustment(&discount)?;
                let tip = parse_adjustment(&tip)?;
                let tax_rate = self.config.tax_rate;
                self.session()?.generate_bill(tax_rate, discount, tip)?.render()
            }
            Command::Pay => {
                let checkout = self.session()?;
                let receipt = checkout.bill().map(|bill| bill.render());
                let order_id = checkout.confirm_payment()?;
                info!(%order_id, "Order paid at counter");
                format!(
                    "Payment confirmed. Thank you.\n{}Status: Paid",
                    receipt.unwrap_or_default()
                )
            }
            Command::New => {
                self.session()?.start_order();
                "New order started. Add items to cart.".to_string()
            }
            Command::History => self.history()?,
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };
        Ok(Outcome::Reply(reply))
    }

    fn session(&mut self) -> Result<&mut Checkout, AppError> {
        self.checkout.as_mut().ok_or_else(AppError::no_customer)
    }

    fn item(&self, number: usize) -> Result<&Arc<MenuItem>, AppError> {
        number
            .checked_sub(1)
            .and_then(|index| self.catalog.get(index))
            .ok_or_else(|| AppError::not_found("Menu item", &number.to_string()))
    }

    fn register_customer(
        &mut self,
        name: &str,
        contact: &str,
        email: &str,
    ) -> Result<String, AppError> {
        let customer = Customer::register(name, contact, email)?;
        info!(customer_id = %customer.id(), "Customer registered");

        let mut checkout = Checkout::new(customer);
        for observer in &self.observers {
            checkout.subscribe(observer.clone());
        }
        checkout.start_order();
        self.checkout = Some(checkout);
        Ok("Customer created/updated. You can now add items to cart.".to_string())
    }

    fn menu(&self) -> String {
        let mut text = format!("--- {} Menu ---", self.config.store_name);
        for (index, item) in self.catalog.items().iter().enumerate() {
            text.push_str(&format!("\n{:>2}. {}", index + 1, item.display_line()));
        }
        text
    }

    fn cart(&self) -> Result<String, AppError> {
        let checkout = self.checkout.as_ref().ok_or_else(AppError::no_customer)?;
        let Some(order) = checkout.order() else {
            return Ok("No open order. Type `new` to start one.".to_string());
        };

        let mut text = format!("Cart ({}):", order.status());
        let mut subtotal = cafe_core::Money::zero();
        for line in order.line_summary() {
            text.push_str(&format!(
                "\n  {} x{}  {}",
                line.item.name(),
                line.quantity,
                line.line_total
            ));
            subtotal += line.line_total;
        }
        text.push_str(&format!("\nSubtotal: {}", subtotal));
        Ok(text)
    }

    fn history(&self) -> Result<String, AppError> {
        let checkout = self.checkout.as_ref().ok_or_else(AppError::no_customer)?;
        let customer = checkout.customer();
        let ids: Vec<&str> = customer.view_order_history().collect();
        if ids.is_empty() {
            return Ok(format!("{} has no placed orders.", customer.name()));
        }
        let mut text = format!("Orders placed by {}:", customer.name());
        for (n, id) in ids.iter().enumerate() {
            text.push_str(&format!("\n  {}. {}", n + 1, id));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafe_core::{AuditLog, OrderStatus};

    use crate::error::ErrorCode;

    fn counter() -> Counter {
        Counter::new(CounterConfig::default(), MenuCatalog::sample())
    }

    fn run(counter: &mut Counter, line: &str) -> Result<String, AppError> {
        let command = parse(line)?.expect("command");
        match counter.execute(command)? {
            Outcome::Reply(text) => Ok(text),
            Outcome::Quit => Ok("<quit>".to_string()),
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse("customer Ada Lovelace 03001234567 ada@example.com").unwrap(),
            Some(Command::Customer {
                name: "Ada Lovelace".to_string(),
                contact: "03001234567".to_string(),
                email: "ada@example.com".to_string(),
            })
        );
        assert_eq!(
            parse("ADD 4").unwrap(),
            Some(Command::Add {
                number: 4,
                quantity: 1
            })
        );
        assert_eq!(
            parse("bill 2.50").unwrap(),
            Some(Command::Bill {
                discount: "2.50".to_string(),
                tip: String::new()
            })
        );
        assert_eq!(parse("quit").unwrap(), Some(Command::Quit));

        assert!(parse("customer Ada 0300").is_err());
        assert!(parse("add").is_err());
        assert!(parse("add 0").is_err());
        assert!(parse("add 1 many").is_err());
        assert_eq!(parse("dance").unwrap_err().code, ErrorCode::NotFound);
    }

    #[test]
    fn test_commands_need_customer() {
        let mut counter = counter();
        let err = run(&mut counter, "add 1").unwrap_err();
        assert_eq!(err.code, ErrorCode::NoCustomer);
        assert!(run(&mut counter, "menu").unwrap().contains("Pizza"));
    }

    #[test]
    fn test_invalid_customer_is_rejected() {
        let mut counter = counter();
        let err = run(&mut counter, "customer Ada 12345 ada@example.com").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(counter.checkout().is_none());
    }

    #[test]
    fn test_full_order_at_counter() {
        let audit = Arc::new(AuditLog::new());
        let mut counter = counter().with_observer(audit.clone());

        run(&mut counter, "customer Ada 0300-123-4567 ada@example.com").unwrap();
        // 1 = Pizza, 4 = Coke in the sample menu
        run(&mut counter, "add 1").unwrap();
        let cart = run(&mut counter, "add 4 2").unwrap();
        assert!(cart.contains("Coke x2  $4.00"));
        assert!(cart.contains("Subtotal: $16.50"));

        let bill = run(&mut counter, "bill").unwrap();
        assert!(bill.contains("Tax: $3.30"));
        assert!(bill.contains("Final Amount: $19.80"));

        let paid = run(&mut counter, "pay").unwrap();
        assert!(paid.starts_with("Payment confirmed. Thank you."));
        assert!(paid.ends_with("Status: Paid"));

        let history = run(&mut counter, "history").unwrap();
        assert!(history.contains("1. "));
        assert_eq!(audit.event_names().last(), Some(&"ORDER_PLACED"));

        assert_eq!(
            run(&mut counter, "add 1").unwrap_err().code,
            ErrorCode::BusinessLogic
        );
        run(&mut counter, "new").unwrap();
        run(&mut counter, "add 1").unwrap();
        let order = counter.checkout().unwrap().order().unwrap();
        assert_eq!(order.status(), OrderStatus::BuildingOrder);
    }

    #[test]
    fn test_bill_adjustment_errors() {
        let mut counter = counter();
        run(&mut counter, "customer Ada 03001234567 ada@example.com").unwrap();
        run(&mut counter, "add 1").unwrap();

        let err = run(&mut counter, "bill -1").unwrap_err();
        assert_eq!(err.message, "Discount/Tip must be a non-negative number.");

        let err = run(&mut counter, "bill 0 92233720368547758.07").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(counter.checkout().unwrap().bill().is_none());

        let err = run(&mut counter, "bill 20").unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
        assert!(err.message.starts_with("Discount is too large."));

        assert_eq!(
            run(&mut counter, "pay").unwrap_err().message,
            "Please generate the bill first."
        );
    }

    #[test]
    fn test_remove_and_clear() {
        let mut counter = counter();
        run(&mut counter, "customer Ada 03001234567 ada@example.com").unwrap();
        run(&mut counter, "add 5 3").unwrap();

        assert!(run(&mut counter, "remove 5").unwrap().contains("Latte x2"));
        assert_eq!(
            run(&mut counter, "remove 1").unwrap_err().message,
            "Item could not be removed."
        );

        let cart = run(&mut counter, "clear").unwrap();
        assert!(cart.contains("Subtotal: $0.00"));
        assert!(cart.starts_with("Cart (New)"));
    }

    #[test]
    fn test_quantity_bounds() {
        let mut counter = counter();
        run(&mut counter, "customer Ada 03001234567 ada@example.com").unwrap();
        for line in ["add 1 0", "add 1 51", "add 1 -2"] {
            let err = run(&mut counter, line).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError);
            assert_eq!(err.message, "Quantity must be a valid number between 1 and 50.");
        }
        assert!(counter.checkout().unwrap().order().unwrap().is_empty());
        assert!(run(&mut counter, "add 99").is_err());
        assert!(run(&mut counter, "add 1 50").is_ok());
    }

    #[test]
    fn test_details_and_quit() {
        let mut counter = counter();
        let details = run(&mut counter, "details 6").unwrap();
        assert!(details.starts_with("Burger Meal - Combo includes:"));
        assert_eq!(run(&mut counter, "quit").unwrap(), "<quit>");
    }
}
