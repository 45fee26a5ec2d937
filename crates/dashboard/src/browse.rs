//! Interactive browsing.
//!
//! Each input line is one UI event. Search input goes through the
//! browser's debouncer: the loop waits on whichever comes first, the next
//! line or the pending search deadline.

use std::io::Write;
use std::str::FromStr;
use std::time::Instant;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use storefront_catalog::ProductBrowser;
use storefront_core::{DomainError, ProductId};

use crate::render;

pub const HELP: &str = "\
commands:
  search <text>                 search title and description (applied after typing pauses)
  category <name>|all           exact category
  price <min|any> <max|any>     price range
  rating <1-5>|any              minimum rating
  clear search|category|price|rating
  next | prev | page <n>        paging
  reset                         clear all filters
  show <id>                     product detail
  help | quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearTarget {
    Search,
    Category,
    Price,
    Rating,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
    Search(String),
    Category(Option<String>),
    Price(Option<f64>, Option<f64>),
    Rating(Option<u8>),
    Clear(ClearTarget),
    Next,
    Previous,
    Page(usize),
    Reset,
    Show(ProductId),
    Help,
    Quit,
}

fn parse_bound(raw: &str) -> Result<Option<f64>, DomainError> {
    if raw.eq_ignore_ascii_case("any") {
        return Ok(None);
    }
    let value = raw
        .trim_start_matches('$')
        .parse::<f64>()
        .map_err(|_| DomainError::validation(format!("invalid price `{raw}`")))?;
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::validation(format!("invalid price `{raw}`")));
    }
    Ok(Some(value))
}

impl FromStr for BrowseCommand {
    type Err = DomainError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            // Search text is taken verbatim; an empty search clears it.
            "search" | "s" => BrowseCommand::Search(rest.to_string()),
            "category" | "c" => match rest {
                "" => return Err(DomainError::validation("category needs a name or `all`")),
                "all" => BrowseCommand::Category(None),
                name => BrowseCommand::Category(Some(name.to_string())),
            },
            "price" => {
                let mut bounds = rest.split_whitespace();
                match (bounds.next(), bounds.next(), bounds.next()) {
                    (Some(min), Some(max), None) => BrowseCommand::Price(parse_bound(min)?, parse_bound(max)?),
                    _ => return Err(DomainError::validation("price needs <min> <max>")),
                }
            }
            "rating" | "r" => match rest {
                "any" => BrowseCommand::Rating(None),
                raw => match raw.parse::<u8>() {
                    Ok(stars @ 1..=5) => BrowseCommand::Rating(Some(stars)),
                    _ => return Err(DomainError::validation("rating must be 1-5 or `any`")),
                },
            },
            "clear" => match rest {
                "search" => BrowseCommand::Clear(ClearTarget::Search),
                "category" => BrowseCommand::Clear(ClearTarget::Category),
                "price" => BrowseCommand::Clear(ClearTarget::Price),
                "rating" => BrowseCommand::Clear(ClearTarget::Rating),
                "all" | "" => BrowseCommand::Reset,
                other => return Err(DomainError::validation(format!("cannot clear `{other}`"))),
            },
            "next" | "n" => BrowseCommand::Next,
            "prev" | "p" => BrowseCommand::Previous,
            "page" => {
                let page = rest
                    .parse::<usize>()
                    .map_err(|_| DomainError::validation("page needs a number"))?;
                BrowseCommand::Page(page)
            }
            "reset" => BrowseCommand::Reset,
            "show" => BrowseCommand::Show(rest.parse()?),
            "help" | "?" => BrowseCommand::Help,
            "quit" | "q" | "exit" => BrowseCommand::Quit,
            other => return Err(DomainError::validation(format!("unknown command `{other}`"))),
        };
        Ok(command)
    }
}

/// What the loop should do after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The grid may have changed; redraw it.
    Redraw,
    /// Input accepted but nothing to show yet (debounced search).
    Pending,
    Print(String),
    Quit,
}

pub fn apply(browser: &mut ProductBrowser, command: BrowseCommand, now: Instant) -> Outcome {
    match command {
        BrowseCommand::Search(text) => {
            browser.type_search(text, now);
            Outcome::Pending
        }
        BrowseCommand::Category(category) => {
            browser.select_category(category);
            Outcome::Redraw
        }
        BrowseCommand::Price(min, max) => {
            browser.set_price_range(min, max);
            Outcome::Redraw
        }
        BrowseCommand::Rating(rating) => {
            browser.set_rating(rating);
            Outcome::Redraw
        }
        BrowseCommand::Clear(target) => {
            match target {
                ClearTarget::Search => browser.clear_search(),
                ClearTarget::Category => browser.select_category(None),
                ClearTarget::Price => browser.clear_price_range(),
                ClearTarget::Rating => browser.set_rating(None),
            };
            Outcome::Redraw
        }
        BrowseCommand::Next => {
            browser.next_page();
            Outcome::Redraw
        }
        BrowseCommand::Previous => {
            browser.previous_page();
            Outcome::Redraw
        }
        BrowseCommand::Page(page) => {
            browser.go_to_page(page);
            Outcome::Redraw
        }
        BrowseCommand::Reset => {
            browser.reset_filters();
            Outcome::Redraw
        }
        BrowseCommand::Show(id) => match browser.products().iter().find(|p| p.id == id) {
            Some(product) => Outcome::Print(render::detail(product)),
            None => Outcome::Print(render::load_error("Product", &format!("product {id} not found"))),
        },
        BrowseCommand::Help => Outcome::Print(HELP.to_string()),
        BrowseCommand::Quit => Outcome::Quit,
    }
}

/// Filter badges plus the current grid page.
pub fn screen(browser: &ProductBrowser) -> String {
    let mut out = String::new();
    if let Some(badges) = render::filter_badges(&browser.criteria()) {
        out.push_str(&badges);
        out.push('\n');
    }
    out.push_str(&render::grid(&browser.view()));
    out
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

/// Run the browse loop until `quit` or end of input. Pending search text is
/// applied when input ends. Returns the browser for inspection.
pub async fn run<R, W>(mut browser: ProductBrowser, input: R, out: &mut W) -> Result<ProductBrowser>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    writeln!(out, "{}", screen(&browser))?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    if browser.flush_search() {
                        writeln!(out, "{}", screen(&browser))?;
                    }
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                let command = match line.parse::<BrowseCommand>() {
                    Ok(command) => command,
                    Err(err) => {
                        writeln!(out, "{err} (type `help` for commands)")?;
                        continue;
                    }
                };
                tracing::debug!(?command, "browse event");

                match apply(&mut browser, command, Instant::now()) {
                    Outcome::Redraw => writeln!(out, "{}", screen(&browser))?,
                    Outcome::Pending => {}
                    Outcome::Print(text) => writeln!(out, "{text}")?,
                    Outcome::Quit => break,
                }
            }
            _ = sleep_until(browser.next_deadline()) => {
                if browser.tick(Instant::now()) {
                    writeln!(out, "{}", screen(&browser))?;
                }
            }
        }
        out.flush()?;
    }

    Ok(browser)
}
