//! # Cart Shell
//!
//! Line-oriented driver for the cart commands, used by the
//! `gomarket-storefront` binary to exercise a store without a mobile UI.
//!
//! ```text
//! > add p1 19.90 https://img/p1.png Basic Shirt
//! p1  Basic Shirt  x1  19.90
//! 1 items, 1 units, subtotal 19.90
//! > inc p1
//! > dec p1
//! > list
//! > quit
//! ```

use std::str::FromStr;

use gomarket_core::{CoreError, ProductDescriptor, ValidationError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::commands::cart::{self, CartResponse};
use crate::error::{AppError, AppResult};
use crate::provider::use_cart;
use crate::state::CartState;

const HELP: &str = "\
commands:
  add <id> <price> <image_url> <title...>   add one unit of a product
  inc <id>                                  add one unit to a line
  dec <id>                                  remove one unit from a line
  list                                      show the cart
  help                                      show this text
  quit                                      leave the shell
";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    List,
    Add(ProductDescriptor),
    Increment(String),
    Decrement(String),
    Help,
    Quit,
}

fn missing(field: &str) -> AppError {
    CoreError::from(ValidationError::Required {
        field: field.to_string(),
    })
    .into()
}

fn required<'a>(token: Option<&'a str>, field: &str) -> AppResult<&'a str> {
    token.ok_or_else(|| missing(field))
}

/// Parses a unit price. NaN and infinities are refused: JSON has no
/// spelling for them, so they could not be stored.
fn parse_price(token: &str) -> AppResult<f64> {
    let price: f64 = token
        .parse()
        .map_err(|_| AppError::validation(format!("price '{}' is not a number", token)))?;

    if !price.is_finite() {
        return Err(AppError::validation(format!(
            "price '{}' must be a finite number",
            token
        )));
    }

    Ok(price)
}

impl FromStr for ShellCommand {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let verb = required(tokens.next(), "command")?;

        match verb.to_lowercase().as_str() {
            "list" | "ls" => Ok(ShellCommand::List),
            "add" => {
                let id = required(tokens.next(), "id")?;
                let price = parse_price(required(tokens.next(), "price")?)?;
                let image_url = required(tokens.next(), "image_url")?;
                let title = tokens.collect::<Vec<_>>().join(" ");
                if title.is_empty() {
                    return Err(missing("title"));
                }

                Ok(ShellCommand::Add(ProductDescriptor::new(id, title, image_url, price)))
            }
            "inc" | "increment" => Ok(ShellCommand::Increment(
                required(tokens.next(), "id")?.to_string(),
            )),
            "dec" | "decrement" => Ok(ShellCommand::Decrement(
                required(tokens.next(), "id")?.to_string(),
            )),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            other => Err(AppError::validation(format!("Unknown command '{}'", other))),
        }
    }
}

/// Runs a cart command. `Help` and `Quit` don't touch the cart.
pub fn execute(store: &CartState, command: &ShellCommand) -> Option<CartResponse> {
    match command {
        ShellCommand::List => Some(cart::get_cart(store)),
        ShellCommand::Add(product) => Some(cart::add_to_cart(store, product)),
        ShellCommand::Increment(id) => Some(cart::increment(store, id)),
        ShellCommand::Decrement(id) => Some(cart::decrement(store, id)),
        ShellCommand::Help | ShellCommand::Quit => None,
    }
}

/// Renders a cart for the terminal.
pub fn render(response: &CartResponse) -> String {
    if response.items.is_empty() {
        return "cart is empty\n".to_string();
    }

    let mut out = String::new();
    for item in &response.items {
        out.push_str(&format!(
            "{}  {}  x{}  {:.2}\n",
            item.id,
            item.title,
            item.quantity,
            item.line_total()
        ));
    }
    out.push_str(&format!(
        "{} items, {} units, subtotal {:.2}\n",
        response.totals.item_count, response.totals.total_quantity, response.totals.subtotal
    ));
    out
}

/// Reads commands from `reader` until EOF or `quit`, writing the cart after
/// each one to `writer`.
///
/// # Panics
/// Panics if not run inside a `CartProvider` scope.
pub async fn run_shell<R, W>(reader: R, mut writer: W) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let store = use_cart();
    let mut lines = reader.lines();

    writer
        .write_all(render(&cart::get_cart(&store)).as_bytes())
        .await?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let output = match line.parse::<ShellCommand>() {
            Ok(ShellCommand::Quit) => break,
            Ok(ShellCommand::Help) => HELP.to_string(),
            Ok(command) => {
                debug!(?command, "shell command");
                execute(&store, &command)
                    .map(|response| render(&response))
                    .unwrap_or_default()
            }
            Err(e) => {
                warn!(error = %e, line = %line, "Rejected shell input");
                format!("error: {}\n", e.message)
            }
        };

        writer.write_all(output.as_bytes()).await?;
        writer.flush().await?;
    }

    writer.flush().await?;
    Ok(())
}
