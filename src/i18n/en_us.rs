// ============================================================================
// Locsmith - English Translation Table
// ============================================================================
//
// 文件: src/i18n/en_us.rs
// 职责: English translation content definition
// 边界:
//   - ✅ English translation strings definition
//   - ❌ Should not contain translation logic
//   - ❌ Should not contain other language translations
//
// ============================================================================

/// English translation table
pub const TRANSLATIONS: &[(&str, &str)] = &[
    // Scanner
    ("scan.found_files", "Found {} markup files"),
    ("scan.missing_dir", "Target directory not found, skipped: {}"),
    // Shared summary
    ("summary.dry_run", "(dry run, nothing written)"),
    ("summary.failures", "{} files could not be processed"),
    // Extract
    ("extract.start", "Extracting inline text..."),
    ("extract.progress", "Extracting"),
    ("extract.catalog_failed", "Cannot update catalog {}, no markup file was changed"),
    ("extract.summary", "Extraction summary"),
    ("extract.files_touched", "Files rewritten: {} of {} scanned"),
    ("extract.substitutions", "Placeholders inserted: {}"),
    ("extract.keys_added", "Keys added: {} (catalog now holds {})"),
    ("extract.catalog", "Catalog: {}"),
    ("extract.collisions", "{} key collisions (existing text kept)"),
    ("extract.collision_detail", "{} keeps \"{}\", dropped \"{}\""),
    (
        "extract.collision_hint",
        "Raise extract.key_hash_length to widen the key space",
    ),
    // Restore
    ("restore.start", "Restoring inline text..."),
    ("restore.progress", "Restoring"),
    ("restore.empty_catalog", "Catalog {} is empty or missing"),
    ("restore.summary", "Restore summary"),
    ("restore.files_touched", "Files rewritten: {} of {} scanned"),
    ("restore.restored", "Placeholders restored: {}"),
    ("restore.unresolved", "{} placeholders have no catalog entry (left as is)"),
    ("restore.unresolved_detail", "{} in {}"),
    // Sync
    ("sync.start", "Synchronizing locale catalogs..."),
    ("sync.missing_source", "Source catalog {} not found, nothing to translate"),
    ("sync.connecting", "Connecting to translation backend {}"),
    ("sync.translating", "Translating"),
    ("sync.summary", "Sync summary"),
    ("sync.updated", "{}: {} units translated"),
    ("sync.rejected", "  rejected {}: {}"),
    ("sync.conflict", "  not merged, existing value blocks {}"),
    ("sync.pending", "{}: {} units missing"),
    ("sync.up_to_date", "{}: up to date"),
    ("sync.unbound", "{}: no language code bound, skipped"),
    ("sync.failed", "{}: skipped ({})"),
    (
        "sync.totals",
        "Languages updated: {}, units translated: {}, languages skipped: {}",
    ),
    // Prune
    ("prune.start", "Pruning generated keys..."),
    ("prune.failed", "Cannot prune catalog {}"),
    ("prune.summary", "Prune summary"),
    ("prune.removed", "Keys removed: {} (remaining {})"),
    // Init
    ("init.start", "Initializing configuration file..."),
    ("init.config_exists", "Configuration file already exists: {}"),
    ("init.use_force_hint", "Use --force to overwrite"),
    ("init.config_created", "Configuration file created: {}"),
    (
        "init.next_steps",
        "Edit [workspace] and [sync.languages], then run `locsmith extract`",
    ),
    ("init.create_failed", "Failed to create configuration file: {}"),
];
