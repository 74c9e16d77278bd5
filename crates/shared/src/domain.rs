use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(VideogameId);

/// A videogame record as exchanged with the server.
///
/// `id` is absent until the server has persisted the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Videogame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<VideogameId>,
    pub title: String,
    pub genre: String,
    pub year: i32,
    pub completed: bool,
}

impl Videogame {
    /// Copy of this record with `completed` inverted.
    pub fn with_completion_toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

/// Body of a create request: a videogame the server has not assigned an id to yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideogameDraft {
    pub title: String,
    pub genre: String,
    pub year: i32,
    #[serde(default)]
    pub completed: bool,
}

impl VideogameDraft {
    pub fn new(title: impl Into<String>, genre: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
            year,
            completed: false,
        }
    }

    pub fn into_videogame(self, id: VideogameId) -> Videogame {
        Videogame {
            id: Some(id),
            title: self.title,
            genre: self.genre,
            year: self.year,
            completed: self.completed,
        }
    }
}
