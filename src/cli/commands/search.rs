//! Search command - run the storefront search box from the terminal

use crate::cli::args::{OutputFormat, SearchArgs};
use crate::cli::commands::{print_product_header, print_product_row};
use crate::config::Config;
use crate::error::{OstrivError, OstrivResult};
use crate::navigation::{Destination, HistoryNavigator};
use crate::search::{SearchSession, SearchView};
use crate::storefront::Storefront;
use crate::ui::{self, UiContext};
use serde_json::json;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Execute the search command
pub async fn execute(args: SearchArgs, config: &Config) -> OstrivResult<()> {
    let storefront = Storefront::from_config(config)?;
    let navigator = Arc::new(HistoryNavigator::new());
    let session = storefront.search_session(navigator);

    if args.stdin {
        feed_stdin(&session).await?;
    } else if let Some(query) = &args.query {
        session.input(query);
    }

    let view = session.settled().await;
    let destination = if args.submit { session.submit() } else { None };

    match args.format {
        OutputFormat::Json => print_json(&view, destination.as_ref())?,
        OutputFormat::Plain => {
            view.suggestions.iter().for_each(|p| println!("{}", p.slug));
            if let Some(destination) = &destination {
                println!("{}", destination);
            }
        }
        OutputFormat::Table => print_table(&view, destination.as_ref(), args.submit),
    }

    Ok(())
}

/// Each line is the search box's content after a keystroke
async fn feed_stdin(session: &SearchSession) -> OstrivResult<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| OstrivError::io("reading search input from stdin", e))?
    {
        session.input(&line);
    }
    Ok(())
}

fn print_json(view: &SearchView, destination: Option<&Destination>) -> OstrivResult<()> {
    let output = json!({
        "query": view.query,
        "suggestions": view.suggestions,
        "destination": destination.map(Destination::path),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_table(view: &SearchView, destination: Option<&Destination>, submitted: bool) {
    let ctx = UiContext::detect();

    if view.query.is_empty() {
        ui::step_info(&ctx, "Nothing to search for");
        return;
    }

    ui::intro(&ctx, &format!("Search: {}", view.query));
    if view.suggestions.is_empty() {
        ui::step_info(&ctx, "No suggestions");
    } else {
        print_product_header();
        view.suggestions.iter().for_each(print_product_row);
        println!();
    }

    match destination {
        Some(destination) => ui::step_ok_detail(&ctx, "Submitted", &destination.path()),
        None if submitted => ui::step_warn(&ctx, "Nothing submitted"),
        None => {}
    }
}
