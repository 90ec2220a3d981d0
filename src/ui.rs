// UI layer: the interactive menu loop bound to one referendum ID, plus
// the handlers it dispatches to. Handlers write to a generic sink so the
// flow can be exercised in tests; the real loop passes stdout.

use crate::api::{ReferendumSource, Summarizer};
use crate::cli::Cli;
use anyhow::Result;
use clap::CommandFactory;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};

/// The four actions offered on every loop iteration. `Exit` is the only
/// way out of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    DisplayMetadata,
    GenerateSummary,
    Help,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 4] = [
        MenuChoice::DisplayMetadata,
        MenuChoice::GenerateSummary,
        MenuChoice::Help,
        MenuChoice::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::DisplayMetadata => "Display Referendum Metadata",
            MenuChoice::GenerateSummary => "Generate AI Summary",
            MenuChoice::Help => "Help",
            MenuChoice::Exit => "Exit",
        }
    }
}

/// Run the interactive shell on stdout, prompting with a keyboard-driven
/// `Select` menu until the user picks Exit.
pub fn run(source: &dyn ReferendumSource, summarizer: &dyn Summarizer, ref_id: i64) -> Result<()> {
    let mut stdout = io::stdout();
    run_with(&mut stdout, source, summarizer, ref_id, prompt_choice)
}

fn prompt_choice() -> Result<MenuChoice> {
    let labels: Vec<&str> = MenuChoice::ALL.iter().map(|c| c.label()).collect();
    // `Select` shows a keyboard-navigable list in the terminal.
    let selection = Select::new().items(&labels).default(0).interact()?;
    Ok(MenuChoice::ALL[selection])
}

/// The shell loop with the choice prompt injected, so tests can script a
/// sequence of selections. Handler fetch failures are already printed by
/// the handlers; a summarizer failure is printed here and the loop keeps
/// going either way.
pub fn run_with<W, F>(
    out: &mut W,
    source: &dyn ReferendumSource,
    summarizer: &dyn Summarizer,
    ref_id: i64,
    mut choose: F,
) -> Result<()>
where
    W: Write,
    F: FnMut() -> Result<MenuChoice>,
{
    writeln!(out, "Ready to work with Referendum ID: {}", ref_id)?;
    loop {
        match choose()? {
            MenuChoice::DisplayMetadata => handle_display_metadata(out, source, ref_id)?,
            MenuChoice::GenerateSummary => {
                if let Err(e) = handle_generate_summary(out, source, summarizer, ref_id) {
                    writeln!(out, "Unexpected error: {}", e)?;
                }
            }
            MenuChoice::Help => handle_help(out)?,
            MenuChoice::Exit => {
                writeln!(out, "Exiting...")?;
                break;
            }
        }
    }
    Ok(())
}

/// Fetch the referendum and print its metadata. A fetch failure is
/// reported as a single line; the caller's loop continues regardless.
pub fn handle_display_metadata<W: Write>(
    out: &mut W,
    source: &dyn ReferendumSource,
    ref_id: i64,
) -> Result<()> {
    writeln!(out, "Fetching metadata for Referendum ID: {}", ref_id)?;
    match source.get_referendum(ref_id) {
        Ok(referendum) => {
            writeln!(out, "Referendum ID: {}", ref_id)?;
            writeln!(
                out,
                "Title: {}",
                referendum.title.as_deref().unwrap_or("Unknown")
            )?;
            writeln!(
                out,
                "Status: {}",
                referendum.status.as_deref().unwrap_or("Unknown")
            )?;
            writeln!(out, "Tags: {}", referendum.tags.join(", "))?;
            writeln!(out, "Comments Count: {}", referendum.comments_count)?;
        }
        Err(e) => writeln!(out, "Unexpected error: {}", e)?,
    }
    Ok(())
}

/// Fetch the referendum and summarise its content. Returns Ok(false)
/// when nothing was summarised (fetch failed or no content) and Ok(true)
/// after a summary was printed. A summarizer failure propagates to the
/// caller.
pub fn handle_generate_summary<W: Write>(
    out: &mut W,
    source: &dyn ReferendumSource,
    summarizer: &dyn Summarizer,
    ref_id: i64,
) -> Result<bool> {
    let referendum = match source.get_referendum(ref_id) {
        Ok(r) => r,
        Err(e) => {
            writeln!(out, "Unexpected error: {}", e)?;
            return Ok(false);
        }
    };
    let Some(content) = referendum.content_text() else {
        writeln!(out, "No content available for this referendum.")?;
        return Ok(false);
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message("Generating summary...");
    let result = summarizer.summarise(content);
    spinner.finish_and_clear();

    let summary = result?;
    writeln!(out, "{}", summary)?;
    writeln!(out, "------ Summary generated successfully ---")?;
    Ok(true)
}

/// Print the CLI's own usage text, rendered by clap.
pub fn handle_help<W: Write>(out: &mut W) -> Result<()> {
    write!(out, "{}", Cli::command().render_help())?;
    Ok(())
}
