//! Translation cache metrics.

use metrics::{counter, describe_counter};

/// Metric names for the translation cache.
pub mod names {
    /// Requests served from a cached translation.
    pub const CACHE_HITS_TOTAL: &str = "catalog_translation_cache_hits_total";
    /// Requests that had to translate.
    pub const CACHE_MISSES_TOTAL: &str = "catalog_translation_cache_misses_total";
    /// Fields that fell back to their source text.
    pub const DEGRADED_FIELDS_TOTAL: &str = "catalog_translation_degraded_fields_total";
    /// Cache write-backs that failed or were dropped as stale.
    pub const PERSIST_FAILURES_TOTAL: &str = "catalog_translation_persist_failures_total";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        names::CACHE_HITS_TOTAL,
        "Total translation requests served from the item's cache"
    );
    describe_counter!(
        names::CACHE_MISSES_TOTAL,
        "Total translation requests that called the translator"
    );
    describe_counter!(
        names::DEGRADED_FIELDS_TOTAL,
        "Total fields returned untranslated after a translator failure"
    );
    describe_counter!(
        names::PERSIST_FAILURES_TOTAL,
        "Total translation cache writes that were not stored"
    );
}

/// Translation cache metrics recorder.
#[derive(Debug, Clone, Copy)]
pub struct TranslationMetrics;

impl TranslationMetrics {
    /// Record a cache hit.
    pub fn cache_hit(language: &str) {
        counter!(names::CACHE_HITS_TOTAL, "language" => language.to_string()).increment(1);
    }

    /// Record a cache miss.
    pub fn cache_miss(language: &str) {
        counter!(names::CACHE_MISSES_TOTAL, "language" => language.to_string()).increment(1);
    }

    /// Record a field that fell back to source text.
    pub fn degraded(language: &str, field: &'static str) {
        counter!(
            names::DEGRADED_FIELDS_TOTAL,
            "language" => language.to_string(),
            "field" => field
        )
        .increment(1);
    }

    /// Record a cache write that was not stored.
    pub fn persist_failed(reason: &'static str) {
        counter!(names::PERSIST_FAILURES_TOTAL, "reason" => reason).increment(1);
    }
}
