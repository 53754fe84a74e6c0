use crate::thing::ThingId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building or querying a world.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested thing ID is not registered.
    #[error("unknown entity: \"{0}\"")]
    UnknownEntity(String),

    /// A relation token that is neither a graph kind nor `near`.
    #[error("unknown relation: \"{0}\"")]
    UnknownRelation(String),

    /// A thing with the same ID was already registered.
    #[error("entity already exists: \"{0}\"")]
    DuplicateId(ThingId),

    /// A room ID does not follow the `rm_RRCC` pattern.
    #[error("room id must be in format \"rm_####\", but \"{0}\" was given")]
    MalformedRoomId(String),

    /// A portal references a room that does not exist.
    #[error("portal \"{portal}\" references missing room \"{room}\"")]
    MissingRoom {
        /// The portal being registered.
        portal: ThingId,
        /// The room ID that could not be found.
        room: String,
    },

    /// An attempt to relate a thing to itself.
    #[error("\"{0}\" cannot be related to itself")]
    SelfRelation(ThingId),

    /// Content could not be read from disk.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that failed to load.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Content is not valid JSON for the expected record shape.
    #[error("invalid content in {path}: {source}")]
    Json {
        /// The file (or `<inline>`) that failed to parse.
        path: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}
