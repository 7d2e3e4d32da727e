use thiserror::Error;

pub type Result<T> = std::result::Result<T, GogoError>;

#[derive(Debug, Error)]
pub enum GogoError {
    #[error("failed building reqwest client: {0}")]
    BuildClient(#[source] reqwest::Error),

    #[error("HTTP request failed while {context}: {source}")]
    Request {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read response body while {context}: {source}")]
    ResponseBody {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{context} returned {status}\nresponse text:\n{body}")]
    HttpStatus {
        context: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not find any anime named {query}")]
    SearchListMissing { query: String },

    #[error("could not find any episodes for {path}")]
    EpisodeListMissing { path: String },

    #[error("could not find a player frame for {path}")]
    PlayerFrameMissing { path: String },

    #[error("player frame for {path} has no source attribute")]
    PlayerFrameSource { path: String },

    #[error("no anime found matching {query}")]
    NoSearchResults { query: String },

    #[error("no episodes listed for {title}")]
    NoEpisodes { title: String },

    #[error("selection {requested} is out of range; expected a number from 1 to {available}")]
    SelectionOutOfRange { requested: usize, available: usize },

    #[error("{0}")]
    Message(String),
}
