//! Filter construction
//!
//! A generated program indicator's filter is the conjunction of the source
//! program indicator's filter with one data set category option combo filter
//! and one data element category option combo filter. Each COC filter is in
//! turn the conjunction of the filters configured for its category options.

use super::{MappingError, MetadataKind, Result};
use crate::models::{
    CategoryOptionFilterMap, CocFilter, CombinedFilter, Disaggregated, HasUid, ProgramIndicator,
};
use tracing::debug;

/// Suffix fragment that never makes it into a generated name
pub const DEFAULT_SUFFIX: &str = "(default)";

/// Find the item with `uid`, failing with [`MappingError::NotFound`]
pub fn find_by_uid<'a, T: HasUid>(uid: &str, items: &'a [T], kind: MetadataKind) -> Result<&'a T> {
    items
        .iter()
        .find(|item| item.uid() == uid)
        .ok_or_else(|| MappingError::not_found(kind, uid))
}

/// Normalized filter of the source program indicator
///
/// The filter is trimmed; an empty filter or one already wrapped in
/// parentheses is returned as-is, anything else is parenthesized.
pub fn base_filter(pi: &ProgramIndicator) -> String {
    let filter = pi.filter.as_deref().unwrap_or_default().trim();
    let bracketed = filter.starts_with('(') && filter.ends_with(')');
    if bracketed || filter.is_empty() {
        filter.to_string()
    } else {
        format!("({})", filter)
    }
}

/// Build the filter and name suffix of every category option combo of `owner`
///
/// Options named `default` contribute nothing. A COC containing an option
/// whose configured filter is blank is left out. An option with no entry in
/// `filter_map` means the combos no longer line up with the configured
/// categories and fails the whole row.
pub fn coc_filters<T: Disaggregated>(
    owner: &T,
    filter_map: &CategoryOptionFilterMap,
) -> Result<Vec<CocFilter>> {
    let combo = owner.category_combo().ok_or_else(|| {
        MappingError::MappingGeneration(format!(
            "The {} {} ({}) has no category combo assigned, assign one before \
             attempting to generate the mapping again",
            T::KIND,
            owner.name(),
            owner.uid()
        ))
    })?;

    if combo.category_option_combos.is_empty() {
        return Err(MappingError::MappingGeneration(format!(
            "The {} {} ({}) does not appear to have any category option combos associated \
             with the assigned category combo {} ({}), please generate category option combos \
             in the admin app before attempting to generate the mapping again",
            T::KIND,
            owner.name(),
            owner.uid(),
            combo.name,
            combo.id
        )));
    }

    let mut result = Vec::with_capacity(combo.category_option_combos.len());
    'cocs: for coc in &combo.category_option_combos {
        let mut filters = Vec::new();
        let mut suffix = String::new();

        for option in coc.canonical_options(&combo.categories) {
            if option.is_default() {
                continue;
            }
            let Some(mapped) = filter_map.get(&option.id) else {
                return Err(MappingError::MappingGeneration(format!(
                    "Found a category option combo {} ({}) on the {} {} which cannot be \
                     constructed from the assigned categories: category option {} ({}) has no \
                     category mapping. This typically means the category option combos on the \
                     data element or data set need updating to align with the categories",
                    coc.name,
                    coc.id,
                    T::KIND,
                    owner.name(),
                    option.name,
                    option.id
                )));
            };
            if mapped.is_blank() {
                debug!(
                    "Skipping coc {} because co filter {} is blank",
                    coc.name, option.name
                );
                continue 'cocs;
            }
            filters.push(format!("({})", mapped.filter));
            suffix.push_str(&format!(" ({})", option.name));
        }

        result.push(CocFilter {
            coc_uid: coc.id.clone(),
            filter: filters.join(" && "),
            suffix,
        });
    }

    debug!(
        "Built {} coc filters for {} {}",
        result.len(),
        T::KIND,
        owner.uid()
    );
    Ok(result)
}

/// Cross every data set COC filter with every data element COC filter
///
/// The result has `ds_filters.len() * de_filters.len()` entries, data set
/// axis outermost. Empty filter parts are dropped before joining with `&&`;
/// suffix fragments equal to `(default)` are dropped before concatenating.
pub fn combine_filters(
    base_filter: &str,
    ds_filters: &[CocFilter],
    de_filters: &[CocFilter],
) -> Vec<CombinedFilter> {
    let mut result = Vec::with_capacity(ds_filters.len() * de_filters.len());
    for ds in ds_filters {
        for de in de_filters {
            let filter = [base_filter, ds.filter.as_str(), de.filter.as_str()]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" && ");
            let suffix: String = [ds.suffix.as_str(), de.suffix.as_str()]
                .into_iter()
                .filter(|suffix| *suffix != DEFAULT_SUFFIX)
                .collect();

            result.push(CombinedFilter {
                coc_uid: de.coc_uid.clone(),
                aoc_uid: ds.coc_uid.clone(),
                filter,
                suffix,
            });
        }
    }
    result
}
