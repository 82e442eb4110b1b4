use std::path::PathBuf;

use anstyle::{AnsiColor, Color, Style};
use anyhow::Result;
use beancount_comdirect::AccountKind;

use crate::config::Config;
use crate::input;

/// The account sections `text` contains, in section order.
pub fn sections(text: &str) -> Vec<AccountKind> {
    AccountKind::ALL
        .into_iter()
        .filter(|kind| beancount_comdirect::identify(text.lines(), kind.schema()))
        .collect()
}

pub fn show_sections(files: &[PathBuf], config: Option<&Config>) -> Result<()> {
    let file_style = Style::new().bold();
    let configured_style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));
    let unconfigured_style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
    let missing_style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));

    for path in files {
        let text = input::read_export(path)?;
        let kinds = sections(&text);

        println!("{file_style}{}{file_style:#}", path.display());
        if kinds.is_empty() {
            println!("  {missing_style}no comdirect account sections{missing_style:#}");
        }
        for kind in kinds {
            match config.and_then(|config| config.account(kind)) {
                Some(account) => {
                    println!("  {configured_style}{kind:<10}{configured_style:#} {account}")
                }
                None => println!(
                    "  {unconfigured_style}{kind:<10}{unconfigured_style:#} (not configured)"
                ),
            }
        }
    }

    Ok(())
}
