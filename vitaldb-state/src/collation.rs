use std::cmp::Ordering;

/// Locale-aware string comparison.
///
/// Uses root-locale collation at primary strength with numeric ordering, so
/// `case 2` sorts before `case 10` and case and accents are ignored. If the
/// collation data can't be loaded, falls back to comparing lowercased strings.
pub struct TextCollator {
    collator: Option<icu_collator::CollatorBorrowed<'static>>,
}
impl TextCollator {
    /// Creates a collator.
    pub fn new() -> Self {
        let mut collator_preferences = icu_collator::CollatorPreferences::default();
        collator_preferences.numeric_ordering =
            Some(icu_collator::preferences::CollationNumericOrdering::True);

        let mut collator_options = icu_collator::options::CollatorOptions::default();
        collator_options.strength = Some(icu_collator::options::Strength::Primary);
        collator_options.case_level = Some(icu_collator::options::CaseLevel::Off);

        let collator = match icu_collator::Collator::try_new(collator_preferences, collator_options)
        {
            Ok(collator) => Some(collator),
            Err(e) => {
                tracing::warn!("collation data unavailable, falling back to lowercase ordering: {e}");
                None
            }
        };

        Self { collator }
    }

    /// Compares two strings.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        }
    }
}
impl Default for TextCollator {
    fn default() -> Self {
        Self::new()
    }
}
impl std::fmt::Debug for TextCollator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextCollator")
            .field("icu", &self.collator.is_some())
            .finish()
    }
}
