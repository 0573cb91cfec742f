//! Dimension derivation from the transformed fact tables.

use std::collections::HashSet;

use epi_model::{CountryDim, FactRow};

/// Build the country dimension: distinct `(country, iso_code, population)`
/// tuples across the given fact tables, first-seen order.
///
/// No uniqueness is forced on the country name alone; if the two sources
/// disagree on iso_code or population the dimension keeps both tuples.
pub fn country_dimension(fact_sets: &[&[FactRow]]) -> Vec<CountryDim> {
    let mut seen: HashSet<(String, Option<String>, Option<u64>)> = HashSet::new();
    let mut dims = Vec::new();
    for rows in fact_sets {
        for row in *rows {
            let Some(country) = row.country.clone() else {
                continue;
            };
            let key = (
                country.clone(),
                row.iso_code.clone(),
                row.population.map(f64::to_bits),
            );
            if seen.insert(key) {
                dims.push(CountryDim {
                    country,
                    iso_code: row.iso_code.clone(),
                    population: row.population,
                });
            }
        }
    }
    dims
}
