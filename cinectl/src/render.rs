use std::fmt::Write as _;

use cine_core::MovieDetailsView;
use cine_model::{Account, Movie};

const REVIEW_EXCERPT_CHARS: usize = 280;

pub fn movie_line(movie: &Movie, in_watchlist: bool) -> String {
    let year = movie
        .release_year()
        .map(|y| format!(" ({y})"))
        .unwrap_or_default();
    let mark = if in_watchlist { "  [watchlist]" } else { "" };
    format!("{:>9}  {}{}{}", movie.id, movie.title, year, mark)
}

pub fn movie_list<F>(movies: &[Movie], in_watchlist: F) -> String
where
    F: Fn(&Movie) -> bool,
{
    if movies.is_empty() {
        return "No movies found.\n".to_string();
    }
    let mut out = String::new();
    for movie in movies {
        let _ = writeln!(out, "{}", movie_line(movie, in_watchlist(movie)));
    }
    out
}

pub fn details(view: &MovieDetailsView, image_base_url: &str) -> String {
    let d = &view.details;
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", d.title, d.id);
    if let Some(tagline) = &d.tagline {
        let _ = writeln!(out, "\"{tagline}\"");
    }

    let mut facts = Vec::new();
    if let Some(date) = &d.release_date {
        facts.push(date.clone());
    }
    if let Some(runtime) = d.runtime_label() {
        facts.push(runtime);
    }
    if let Some(avg) = d.vote_average {
        facts.push(format!("{avg:.1}/10 ({} votes)", d.vote_count.unwrap_or(0)));
    }
    if !facts.is_empty() {
        let _ = writeln!(out, "{}", facts.join(" · "));
    }
    let genres = d.genre_names();
    if !genres.is_empty() {
        let _ = writeln!(out, "Genres: {}", genres.join(", "));
    }
    if let Some(poster) = &d.poster_path {
        let _ = writeln!(
            out,
            "Poster: {}/w500{}",
            image_base_url.trim_end_matches('/'),
            poster
        );
    }
    if !d.overview.is_empty() {
        let _ = writeln!(out, "\n{}", d.overview);
    }

    let _ = writeln!(out, "\nReviews ({})", view.reviews.len());
    for review in &view.reviews {
        let _ = writeln!(
            out,
            "- {}: {}",
            review.author,
            review.excerpt(REVIEW_EXCERPT_CHARS)
        );
    }
    out
}

pub fn profile(account: &Account) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name:     {}", account.display_name());
    let _ = writeln!(out, "Username: {}", account.username);
    let _ = writeln!(out, "Account:  {}", account.masked_id());
    out
}
