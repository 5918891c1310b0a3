use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{info, instrument};

use crate::entries::Diary;
use crate::models::{DiaryEntry, InvalidRating, MediaType, NewEntry, Rating};

const LOG_FAILED: &str = "Failed to log movie";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LogError {
    #[error("Please select a rating (1-7)")]
    RatingRequired,

    #[error("{0}")]
    Rejected(String),
}

#[derive(Default)]
struct Form {
    rating: Option<Rating>,
    remarks: String,
}

/// Form for logging a catalog title into the diary.
pub struct LogMovieScreen {
    diary: Arc<dyn Diary>,
    movie_id: u64,
    title: String,
    poster_path: Option<String>,
    form: Mutex<Form>,
}

impl LogMovieScreen {
    pub fn new(
        diary: Arc<dyn Diary>,
        movie_id: u64,
        title: impl Into<String>,
        poster_path: Option<String>,
    ) -> Self {
        Self {
            diary,
            movie_id,
            title: title.into(),
            poster_path,
            form: Mutex::new(Form::default()),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rating(&self) -> Option<Rating> {
        self.form.lock().rating
    }

    pub fn set_rating(&self, value: u8) -> Result<Rating, InvalidRating> {
        let rating = Rating::try_from(value)?;
        self.form.lock().rating = Some(rating);
        Ok(rating)
    }

    pub fn set_remarks(&self, remarks: impl Into<String>) {
        self.form.lock().remarks = remarks.into();
    }

    /// Submits the entry. Nothing is sent until a rating has been picked.
    #[instrument(skip(self), fields(movie_id = self.movie_id))]
    pub async fn submit(&self) -> Result<DiaryEntry, LogError> {
        let entry = {
            let form = self.form.lock();
            let rating = form.rating.ok_or(LogError::RatingRequired)?;
            let remarks = form.remarks.trim();
            NewEntry {
                media_type: MediaType::Movie,
                title: self.title.clone(),
                tmdb_id: Some(self.movie_id),
                poster_path: self.poster_path.clone(),
                rating_overall: rating,
                remarks: (!remarks.is_empty()).then(|| remarks.to_string()),
            }
        };

        let created = self
            .diary
            .create_entry(&entry)
            .await
            .map_err(|e| LogError::Rejected(e.display_message(LOG_FAILED)))?;
        info!("\"{}\" has been logged", self.title);
        Ok(created)
    }
}
