//! Plain-text rendering of catalogue views.
//!
//! ```text
//! Name            Birth year  Gender  Height  Created
//! C-3PO           112BBY      n/a     167     Dec 10, 2014
//! Luke Skywalker  19BBY       male    172     Dec 9, 2014
//!
//! Showing 1 to 2 of 2 characters
//! Pages: [1]
//! ```

use swapi_catalog_client::datetime::format_date;
use swapi_catalog_client::{Person, Planet};
use swapi_catalog_core::{CatalogResource, CollectionSnapshot, PageSlot, PaginationState};

const COLUMN_GAP: &str = "  ";

/// How an item appears in a list row and on its detail page.
pub trait Render: CatalogResource {
    const HEADERS: &'static [&'static str];

    /// One cell per header.
    fn cells(&self) -> Vec<String>;

    /// Label/value pairs of the detail view.
    fn fields(&self) -> Vec<(&'static str, String)>;
}

impl Render for Person {
    const HEADERS: &'static [&'static str] = &["Name", "Birth year", "Gender", "Height", "Created"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.birth_year.clone(),
            self.gender.clone(),
            self.height.clone(),
            format_date(&self.created),
        ]
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.clone()),
            ("Height", self.height.clone()),
            ("Mass", self.mass.clone()),
            ("Hair color", self.hair_color.clone()),
            ("Skin color", self.skin_color.clone()),
            ("Eye color", self.eye_color.clone()),
            ("Birth year", self.birth_year.clone()),
            ("Gender", self.gender.clone()),
            ("Homeworld", self.homeworld.clone()),
            ("Films", self.films.len().to_string()),
            ("Created", format_date(&self.created)),
        ]
    }
}

impl Render for Planet {
    const HEADERS: &'static [&'static str] = &["Name", "Climate", "Terrain", "Population", "Created"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.climate.clone(),
            self.terrain.clone(),
            self.population.clone(),
            format_date(&self.created),
        ]
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.clone()),
            ("Rotation period", self.rotation_period.clone()),
            ("Orbital period", self.orbital_period.clone()),
            ("Diameter", self.diameter.clone()),
            ("Climate", self.climate.clone()),
            ("Gravity", self.gravity.clone()),
            ("Terrain", self.terrain.clone()),
            ("Surface water", self.surface_water.clone()),
            ("Population", self.population.clone()),
            ("Residents", self.residents.len().to_string()),
            ("Films", self.films.len().to_string()),
            ("Created", format_date(&self.created)),
        ]
    }
}

/// Left-aligned columns sized to their widest cell.
pub fn table<T: Render>(items: &[T]) -> String {
    let rows: Vec<Vec<String>> = items.iter().map(Render::cells).collect();

    let mut widths: Vec<usize> = T::HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let headers: Vec<String> = T::HEADERS.iter().map(ToString::to_string).collect();
    let mut out = String::new();
    for row in std::iter::once(&headers).chain(&rows) {
        out.push_str(&format_row(row, &widths));
        out.push('\n');
    }
    out
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    padded.join(COLUMN_GAP).trim_end().to_string()
}

/// `Pages: 1 [2] 3 4 5 6 ... 15`
pub fn page_line(pagination: &PaginationState) -> String {
    let slots: Vec<String> = pagination
        .page_window()
        .into_iter()
        .map(|slot| match slot {
            PageSlot::Page(n) if n == pagination.current_page => format!("[{n}]"),
            other => other.to_string(),
        })
        .collect();
    format!("Pages: {}", slots.join(" "))
}

/// The list view: table, item range and page buttons.
pub fn collection<T: Render>(snapshot: &CollectionSnapshot<T>) -> String {
    let label = T::KIND.label();
    if snapshot.visible.is_empty() {
        return if snapshot.search.query.is_empty() {
            format!("No {label} found.\n")
        } else {
            format!("No {label} match \"{}\".\n", snapshot.search.query)
        };
    }

    format!(
        "{}\n{}\n{}\n",
        table(&snapshot.visible),
        snapshot.pagination.display_range(label),
        page_line(&snapshot.pagination)
    )
}

/// The detail view: one aligned `label: value` line per field.
pub fn detail<T: Render>(item: &T) -> String {
    let fields = item.fields();
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (label, value) in fields {
        let value = if value.is_empty() { "-".to_string() } else { value };
        out.push_str(&format!("{label:<width$}  {value}\n"));
    }
    out
}
