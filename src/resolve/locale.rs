// src/resolve/locale.rs
//! Translation overlay resolution.

use crate::model::{CmsItem, TranslationOverlay, TranslationRecord};
use crate::types::{Locale, LocaleRequest};

/// Overlays the translation for `requested` (or `fallback`) onto a copy of
/// `item`.
///
/// - Multi-record overlays try `requested`, then `fallback` when given.
/// - A single-record overlay is applied only when it is tagged `requested`;
///   it never falls back.
/// - Null translated values never replace base values, `id` is never
///   replaced, and locale metadata is never copied.
///
/// Without a matching record the copy is identical to `item`.
pub fn resolve_locale(item: &CmsItem, requested: &Locale, fallback: Option<&Locale>) -> CmsItem {
    let Some(overlay) = item.translations() else {
        return item.clone();
    };

    let record = match overlay {
        TranslationOverlay::Many(_) => {
            let records = overlay.records();
            find_record(&records, requested)
                .or_else(|| fallback.and_then(|fallback| find_record(&records, fallback)))
        }
        TranslationOverlay::Single(record) => record
            .locale_tag()
            .filter(|tag| requested.matches(tag))
            .map(|_| record),
    };

    match record {
        Some(record) => apply_overlay(item, record),
        None => {
            log::trace!(
                "No translation for {} (fallback {:?}) on item {:?}",
                requested,
                fallback.map(Locale::as_str),
                item.id()
            );
            item.clone()
        }
    }
}

/// [`resolve_locale`] driven by a [`LocaleRequest`].
pub fn resolve_request(item: &CmsItem, request: &LocaleRequest) -> CmsItem {
    resolve_locale(item, &request.requested, request.fallback.as_ref())
}

fn find_record<'a>(records: &[TranslationRecord<'a>], locale: &Locale) -> Option<TranslationRecord<'a>> {
    records
        .iter()
        .find(|record| record.locale_tag().is_some_and(|tag| locale.matches(tag)))
        .copied()
}

fn apply_overlay<'a>(item: &'a CmsItem, record: TranslationRecord<'a>) -> CmsItem {
    let mut fields = item.fields().clone();
    for (key, value) in record.content_fields(item.id()) {
        fields.insert(key.clone(), value.clone());
    }
    CmsItem::new(fields)
}
