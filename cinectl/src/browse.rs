//! Line-oriented catalog browser over a [`MovieCatalogStore`].

use std::io::Write;
use std::str::FromStr;

use anyhow::Result;
use cine_core::{CatalogChange, MovieCatalogStore};
use cine_model::MovieId;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::render;

const HELP: &str = "\
commands:
  search <text>   filter the catalog by title
  clear           drop the search filter
  add <id>        add a catalog movie to the watchlist
  remove <id>     remove a movie from the watchlist
  select <id>     select a movie (select none to clear)
  list            show the filtered catalog
  watchlist       show the watchlist
  quit            leave the browser
";

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
    Search(String),
    Clear,
    Add(MovieId),
    Remove(MovieId),
    Select(Option<MovieId>),
    List,
    Watchlist,
    Help,
    Quit,
}

impl FromStr for BrowseCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let id = || {
            rest.parse::<MovieId>()
                .map_err(|_| format!("expected a movie id, got {rest:?}"))
        };
        match verb.to_ascii_lowercase().as_str() {
            "search" | "s" => Ok(BrowseCommand::Search(rest.to_string())),
            "clear" => Ok(BrowseCommand::Clear),
            "add" | "a" => id().map(BrowseCommand::Add),
            "remove" | "rm" => id().map(BrowseCommand::Remove),
            "select" => match rest {
                "" | "none" => Ok(BrowseCommand::Select(None)),
                _ => id().map(|id| BrowseCommand::Select(Some(id))),
            },
            "list" | "ls" | "" => Ok(BrowseCommand::List),
            "watchlist" | "wl" => Ok(BrowseCommand::Watchlist),
            "help" | "?" => Ok(BrowseCommand::Help),
            "quit" | "exit" | "q" => Ok(BrowseCommand::Quit),
            other => Err(format!("unknown command {other:?}; try help")),
        }
    }
}

/// Read commands from `input` until `quit` or end of input, writing
/// results to `out`.
pub async fn run<R, W>(
    store: &MovieCatalogStore,
    input: R,
    mut out: W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let _subscription = store.subscribe(|state, change| {
        if !matches!(change, CatalogChange::SearchQueryChanged) {
            debug!(
                ?change,
                watchlist = state.watchlist.len(),
                "catalog changed"
            );
        }
    });

    write!(out, "{}", list(store))?;
    writeln!(out, "type help for commands")?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<BrowseCommand>() {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };
        match command {
            BrowseCommand::Quit => break,
            BrowseCommand::Help => write!(out, "{HELP}")?,
            BrowseCommand::Search(query) => {
                store.set_search_query(query);
                write!(out, "{}", list(store))?;
            }
            BrowseCommand::Clear => {
                store.set_search_query("");
                write!(out, "{}", list(store))?;
            }
            BrowseCommand::List => write!(out, "{}", list(store))?,
            BrowseCommand::Watchlist => {
                let watchlist = store.watchlist();
                write!(out, "{}", render::movie_list(&watchlist, |_| true))?;
            }
            BrowseCommand::Add(id) => {
                match store.movies().into_iter().find(|m| m.id == id) {
                    Some(movie) if store.is_in_watchlist(id) => {
                        writeln!(out, "{} is already on your watchlist", movie.title)?
                    }
                    Some(movie) => {
                        let title = movie.title.clone();
                        store.add_to_watchlist(movie);
                        writeln!(out, "added {title}")?;
                    }
                    None => writeln!(out, "no movie {id} in the catalog")?,
                }
            }
            BrowseCommand::Remove(id) => {
                if store.is_in_watchlist(id) {
                    store.remove_from_watchlist(id);
                    writeln!(out, "removed {id}")?;
                } else {
                    writeln!(out, "{id} is not on your watchlist")?;
                }
            }
            BrowseCommand::Select(id) => {
                store.set_selected_movie_id(id);
                match (store.selected_movie(), id) {
                    (Some(movie), _) => {
                        let marked = store.is_in_watchlist(movie.id);
                        let line = render::movie_line(&movie, marked);
                        writeln!(out, "selected {}", line.trim())?
                    }
                    (None, Some(id)) => writeln!(out, "selected {id}")?,
                    (None, None) => writeln!(out, "selection cleared")?,
                }
            }
        }
        out.flush()?;
    }
    Ok(())
}

fn list(store: &MovieCatalogStore) -> String {
    let state = store.snapshot();
    render::movie_list(&state.filtered_movies, |m| state.is_in_watchlist(m.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(
            "search  dune part".parse(),
            Ok(BrowseCommand::Search("dune part".into()))
        );
        assert_eq!("add 42".parse(), Ok(BrowseCommand::Add(MovieId(42))));
        assert_eq!("select none".parse(), Ok(BrowseCommand::Select(None)));
        assert_eq!("Q".parse(), Ok(BrowseCommand::Quit));
        assert!("add dune".parse::<BrowseCommand>().is_err());
        assert!("dance".parse::<BrowseCommand>().is_err());
    }
}
