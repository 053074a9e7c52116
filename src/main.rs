mod app;
mod calendar;
mod config;
mod decoration;
mod decorators;
mod help;
mod logging;
mod theme;
use crate::app::App;
use crate::calendar::{DecoratorSet, WeekWindow};
use crate::config::{parse_ymd, Config};
use crate::decorators::{MoonPhases, SelectionTheme, Weekends};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::{style::Style, DefaultTerminal};
use std::path::PathBuf;
use time::{Date, OffsetDateTime};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    date: Option<Date>,
    config: Option<PathBuf>,
    min_date: Option<Date>,
    max_date: Option<Date>,
    no_select: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    opts.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("min-date") => opts.min_date = Some(date_value(&mut parser)?),
                Arg::Long("max-date") => opts.max_date = Some(date_value(&mut parser)?),
                Arg::Long("no-select") => opts.no_select = true,
                Arg::Value(value) if opts.date.is_none() => {
                    opts.date = Some(parse_date_arg(value.string()?)?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                let _log_guard = logging::init()?;
                let mut config =
                    Config::load(opts.config.as_deref()).context("failed to load configuration")?;
                config
                    .override_bounds(opts.min_date, opts.max_date)
                    .context("invalid date range")?;
                if opts.no_select {
                    config.all_days_selectable = false;
                }
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let bounds = config.bounds;
                let all_days_selectable = config.all_days_selectable;
                let mut weeks = WeekWindow::new(today, decorators_for(config))
                    .bounds(bounds)
                    .all_days_selectable(all_days_selectable);
                if let Some(date) = opts.date {
                    weeks = weeks.start_date(date);
                }
                tracing::info!(target: "runtime", %today, start = ?opts.date, "startup");
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(weeks).run(&mut terminal)
                })
            }
            Command::Help => {
                println!("Usage: daycal [options] [YYYY-MM-DD]");
                println!();
                println!("Scrollable terminal calendar with stackable day decorators");
                println!();
                println!("Options:");
                println!("  -c, --config FILE   Read settings from FILE [default: daycal.toml]");
                println!("      --min-date DATE Earliest day that can be selected");
                println!("      --max-date DATE Latest day that can be selected");
                println!("      --no-select     Make days unselectable unless a decorator allows it");
                println!("  -h, --help          Display this help message and exit");
                println!("  -V, --version       Show the program version and exit");
                println!();
                println!("Set ${} (e.g. \"debug\") to log to daycal.log.", logging::LOG_ENV_VAR);
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Build the decorator stack described by `config`.  Decorators run in this
/// order, so configured highlights override the built-in ones.
fn decorators_for(config: Config) -> DecoratorSet {
    let mut set = DecoratorSet::new();
    if let Some(color) = config.selection_color {
        set.push(SelectionTheme(Style::new().bg(color)));
    }
    set.push(Weekends {
        disabled: config.disable_weekends,
    });
    if config.moon_phases {
        set.push(MoonPhases);
    }
    if !config.highlights.is_empty() {
        set.push(config.highlights);
    }
    tracing::debug!(target: "runtime", decorators = set.len(), "decorators ready");
    set
}

fn date_value(parser: &mut Parser) -> Result<Date, lexopt::Error> {
    parse_date_arg(parser.value()?.string()?)
}

fn parse_date_arg(value: String) -> Result<Date, lexopt::Error> {
    match parse_ymd(&value) {
        Ok(d) => Ok(d),
        Err(e) => Err(lexopt::Error::ParsingFailed {
            value,
            error: Box::new(e),
        }),
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    logging::install_panic_hook();
    let r = func(terminal);
    ratatui::restore();
    r
}
