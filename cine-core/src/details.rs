//! Movie details screen: details with reviews, and the user's rating.

use std::sync::Arc;

use cine_model::{MovieDetails, MovieId, Rating, Review};
use tracing::{debug, info};

use crate::api::MovieApi;
use crate::error::{CoreError, ValidationError};

#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetailsView {
    pub details: MovieDetails,
    pub reviews: Vec<Review>,
}

#[derive(Clone)]
pub struct MovieDetailsService {
    api: Arc<dyn MovieApi>,
}

impl std::fmt::Debug for MovieDetailsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovieDetailsService").finish_non_exhaustive()
    }
}

impl MovieDetailsService {
    pub fn new(api: Arc<dyn MovieApi>) -> Self {
        Self { api }
    }

    /// Details first, then reviews; either failure is returned as is.
    pub async fn load(&self, id: MovieId) -> Result<MovieDetailsView, CoreError> {
        let details = self.api.fetch_movie_details(id).await?;
        let reviews = self.api.fetch_movie_reviews(id).await?;
        debug!(%id, reviews = reviews.len(), "loaded movie details");
        Ok(MovieDetailsView { details, reviews })
    }

    /// Validate `value` against the 1..=10 scale, then submit it.
    pub async fn rate(&self, id: MovieId, value: f32) -> Result<Rating, CoreError> {
        let rating = Rating::new(value)
            .map_err(|_| ValidationError::RatingOutOfRange(value))?;
        self.api.rate_movie(id, rating).await?;
        info!(%id, rating = rating.value(), "rated movie");
        Ok(rating)
    }

    pub async fn clear_rating(&self, id: MovieId) -> Result<(), CoreError> {
        self.api.delete_rating(id).await?;
        info!(%id, "cleared rating");
        Ok(())
    }
}
