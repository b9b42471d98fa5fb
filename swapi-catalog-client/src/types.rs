use serde::{Deserialize, Serialize};

// ============ Envelope ============

/// A paginated response envelope.
///
/// The upstream API returns every item of a resource in one JSON array, so
/// this client always fills `results` with the complete set and leaves
/// `next`/`previous` empty. The shape is kept so callers can treat the
/// catalogue like any conventional paginated API.
///
/// # Type Parameters
///
/// * `T`: the item type ([`Person`] or [`Planet`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Number of items in `results`.
    pub count: usize,
    /// Link to the next page; always `None` for this client.
    pub next: Option<String>,
    /// Link to the previous page; always `None` for this client.
    pub previous: Option<String>,
    /// Items of the collection.
    pub results: Vec<T>,
}

impl<T> ApiResponse<T> {
    /// Wrap a complete collection, computing [`count`](Self::count).
    pub fn complete(results: Vec<T>) -> Self {
        Self {
            count: results.len(),
            next: None,
            previous: None,
            results,
        }
    }

    /// An envelope with no results.
    pub fn empty() -> Self {
        Self::complete(Vec::new())
    }
}

// ============ Resource Kinds ============

/// The resource collections served by the catalogue API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Characters, served at `/people`.
    People,
    /// Planets, served at `/planets`.
    Planets,
}

impl ResourceKind {
    /// Endpoint path relative to the API root.
    pub fn path(self) -> &'static str {
        match self {
            Self::People => "/people",
            Self::Planets => "/planets",
        }
    }

    /// Plural label used in UI text ("Showing 1 to 10 of 82 characters").
    pub fn label(self) -> &'static str {
        match self {
            Self::People => "characters",
            Self::Planets => "planets",
        }
    }

    /// Singular noun used in error messages.
    pub fn singular(self) -> &'static str {
        match self {
            Self::People => "person",
            Self::Planets => "planet",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::People => write!(f, "people"),
            Self::Planets => write!(f, "planets"),
        }
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "people" | "person" | "characters" => Ok(Self::People),
            "planets" | "planet" => Ok(Self::Planets),
            other => Err(format!("unknown resource kind: {other}")),
        }
    }
}

// ============ Items ============

/// Common accessors the catalogue logic needs from every item.
///
/// Only `name` (search and sort), `created` (sort) and `url` (identity)
/// matter; the rest of an item's fields are opaque payload.
pub trait CatalogItem {
    /// Which collection the item belongs to.
    const KIND: ResourceKind;

    fn name(&self) -> &str;

    /// Creation timestamp as served upstream (ISO 8601).
    fn created(&self) -> &str;

    /// Self link; the identifier is its trailing numeric segment.
    fn url(&self) -> &str;

    /// Identifier parsed from [`url`](Self::url).
    fn id(&self) -> Option<String> {
        extract_id_from_url(self.url())
    }
}

/// A character.
///
/// All fields are string-encoded upstream, including the numeric ones
/// (`"172"`, `"unknown"`). Missing fields deserialize to empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub name: String,
    pub height: String,
    pub mass: String,
    pub hair_color: String,
    pub skin_color: String,
    pub eye_color: String,
    pub birth_year: String,
    pub gender: String,
    /// URL of the home planet.
    pub homeworld: String,
    pub films: Vec<String>,
    pub species: Vec<String>,
    pub vehicles: Vec<String>,
    pub starships: Vec<String>,
    pub created: String,
    pub edited: String,
    pub url: String,
}

impl CatalogItem for Person {
    const KIND: ResourceKind = ResourceKind::People;

    fn name(&self) -> &str {
        &self.name
    }

    fn created(&self) -> &str {
        &self.created
    }

    fn url(&self) -> &str {
        &self.url
    }
}

/// A planet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Planet {
    pub name: String,
    pub rotation_period: String,
    pub orbital_period: String,
    pub diameter: String,
    pub climate: String,
    pub gravity: String,
    pub terrain: String,
    pub surface_water: String,
    pub population: String,
    /// URLs of resident characters.
    pub residents: Vec<String>,
    pub films: Vec<String>,
    pub created: String,
    pub edited: String,
    pub url: String,
}

impl CatalogItem for Planet {
    const KIND: ResourceKind = ResourceKind::Planets;

    fn name(&self) -> &str {
        &self.name
    }

    fn created(&self) -> &str {
        &self.created
    }

    fn url(&self) -> &str {
        &self.url
    }
}

/// Extract the numeric identifier from a resource URL.
///
/// `https://swapi.info/api/people/12/` → `Some("12")`. The trailing slash is
/// optional; a last segment that is not all digits yields `None`.
pub fn extract_id_from_url(url: &str) -> Option<String> {
    let segment = url.trim_end_matches('/').rsplit('/').next()?;
    if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
        Some(segment.to_string())
    } else {
        None
    }
}
