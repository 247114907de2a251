use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use shelfmark_engine::{HistoryManager, VirtualWindow, WindowLayout, compute_window};
use shelfmark_runtime::{
    CompletionOutcome, DebounceCoordinator, DispatchKind, DispatchStatus, EngineConfig, LoadState,
    PageCache, PageFetcher, PaginationController, TransportError,
};
use shelfmark_types::{
    Article, DatePreset, DateRange, FilterCriteria, FilterPreset, FiltersExport, OwnerContext,
    PresetStore, SortSpec, StatusFilter, TagOperator,
};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Something that happened while the view was being driven
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// The search debounce fired and the draft was applied
    SearchApplied(String),
    /// The search debounce fired but the draft could not be applied
    SearchRejected { query: String, reason: String },
    /// A page landed in the list
    Loaded { kind: DispatchKind, added: usize },
    /// The active fetch failed; items are unchanged
    Failed(TransportError),
    /// A superseded response arrived and was dropped
    Discarded,
}

pub struct ListViewBuilder {
    fetcher: Arc<dyn PageFetcher>,
    context: OwnerContext,
    config: EngineConfig,
    presets: Vec<FilterPreset>,
}

impl ListViewBuilder {
    pub fn context(mut self, context: OwnerContext) -> Self {
        self.context = context;
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Presets previously persisted for this owner
    pub fn presets(mut self, presets: Vec<FilterPreset>) -> Self {
        self.presets = presets;
        self
    }

    pub fn build(self) -> Result<ListView> {
        let config = self.config;
        config.validate()?;

        let mut controller =
            PaginationController::new(self.fetcher, self.context.clone(), config.page_size)?;
        if let Some(cache) = PageCache::with_capacity(config.cache_capacity, config.cache_ttl()) {
            controller = controller.with_cache(cache);
        }

        Ok(ListView {
            draft: FilterCriteria::new(),
            history: HistoryManager::new(config.history_capacity),
            controller,
            search: DebounceCoordinator::new(config.debounce_window()),
            presets: PresetStore::from_presets(self.context, self.presets)?,
            layout: WindowLayout::new(
                config.container_height,
                config.item_height,
                config.overscan,
            ),
            disposed: false,
        })
    }
}

/// One logical list view: draft criteria, undo history, paged results,
/// debounced search and the owner's presets.
///
/// Draft setters only touch the draft; nothing is fetched until `apply`,
/// a history move, a preset, an import, or a debounced search edit.
/// Call `next_event().await` to drive fetch completions and the search
/// debounce.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use shelfmark_sdk::{InMemoryFetcher, ListView, StatusFilter};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> shelfmark_sdk::Result<()> {
/// let fetcher = Arc::new(InMemoryFetcher::new(Vec::new()));
/// let mut view = ListView::builder(fetcher).build()?;
///
/// view.set_status(StatusFilter::Unread);
/// view.apply()?;
/// view.settle().await;
///
/// for article in view.visible_items(0.0) {
///     println!("{}", article.id);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ListView {
    draft: FilterCriteria,
    history: HistoryManager,
    controller: PaginationController,
    search: DebounceCoordinator<String>,
    presets: PresetStore,
    layout: WindowLayout,
    disposed: bool,
}

impl ListView {
    pub fn builder(fetcher: Arc<dyn PageFetcher>) -> ListViewBuilder {
        ListViewBuilder {
            fetcher,
            context: OwnerContext::local(),
            config: EngineConfig::default(),
            presets: Vec::new(),
        }
    }

    // --- draft ---

    /// Criteria as currently edited, applied or not
    pub fn draft(&self) -> &FilterCriteria {
        &self.draft
    }

    /// Replace the whole draft at once
    pub fn set_draft(&mut self, criteria: FilterCriteria) -> Result<()> {
        criteria.validate()?;
        self.draft = criteria;
        Ok(())
    }

    pub fn set_tags<I, S>(&mut self, tag_ids: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.draft = self.draft.clone().with_tags(tag_ids)?;
        Ok(())
    }

    pub fn toggle_tag(&mut self, tag_id: impl Into<String>) -> Result<()> {
        self.draft = self.draft.clone().toggle_tag(tag_id)?;
        Ok(())
    }

    pub fn set_tag_operator(&mut self, operator: TagOperator) {
        self.draft = self.draft.clone().with_tag_operator(operator);
    }

    pub fn set_date_range(&mut self, range: DateRange) -> Result<()> {
        self.draft = self.draft.clone().with_date_range(range)?;
        Ok(())
    }

    pub fn set_date_preset(&mut self, preset: DatePreset, now: DateTime<Utc>) {
        self.draft = self.draft.clone().with_date_preset(preset, now);
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.draft = self.draft.clone().with_status(status);
    }

    pub fn set_favorites_only(&mut self, favorites_only: bool) {
        self.draft = self.draft.clone().with_favorites_only(favorites_only);
    }

    pub fn set_duration_range(&mut self, min: u32, max: u32) -> Result<()> {
        self.draft = self.draft.clone().with_duration_range(min, max)?;
        Ok(())
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.draft = self.draft.clone().with_sort(sort);
    }

    /// Update the search text and (re)start the debounce window.
    ///
    /// The draft is applied once the window passes without another edit.
    pub fn set_search(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.draft = self.draft.clone().with_search(query.clone());
        self.search.trigger(query);
    }

    pub fn is_search_pending(&self) -> bool {
        self.search.is_pending()
    }

    // --- applying ---

    /// Commit the draft to history and fetch its first page.
    pub fn apply(&mut self) -> Result<DispatchStatus> {
        if self.disposed {
            return Ok(DispatchStatus::Skipped);
        }
        self.search.cancel();
        self.draft.validate()?;
        self.history.commit(self.draft.clone());
        self.refresh()
    }

    /// Apply default criteria.
    pub fn reset(&mut self) -> Result<DispatchStatus> {
        self.draft = FilterCriteria::new();
        self.apply()
    }

    /// Step back in history; `Skipped` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<DispatchStatus> {
        if self.disposed {
            return Ok(DispatchStatus::Skipped);
        }
        let Some(previous) = self.history.undo().cloned() else {
            return Ok(DispatchStatus::Skipped);
        };
        self.search.cancel();
        self.draft = previous;
        self.refresh()
    }

    /// Step forward in history; `Skipped` when there is nothing to redo.
    pub fn redo(&mut self) -> Result<DispatchStatus> {
        if self.disposed {
            return Ok(DispatchStatus::Skipped);
        }
        let Some(next) = self.history.redo().cloned() else {
            return Ok(DispatchStatus::Skipped);
        };
        self.search.cancel();
        self.draft = next;
        self.refresh()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Whether the draft differs from the criteria of the last successful load
    pub fn filters_changed(&self) -> bool {
        self.history.filters_changed(&self.draft)
    }

    pub fn active_filter_count(&self) -> usize {
        self.draft.active_filter_count()
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    // --- paging ---

    pub fn load_more(&mut self) -> DispatchStatus {
        if self.disposed {
            return DispatchStatus::Skipped;
        }
        self.controller.load_more()
    }

    pub fn retry(&mut self) -> DispatchStatus {
        if self.disposed {
            return DispatchStatus::Skipped;
        }
        self.controller.retry()
    }

    pub fn items(&self) -> &[Article] {
        self.controller.items()
    }

    pub fn total_count(&self) -> usize {
        self.controller.total_count()
    }

    pub fn has_more(&self) -> bool {
        self.controller.has_more()
    }

    pub fn state(&self) -> LoadState {
        self.controller.state()
    }

    pub fn error(&self) -> Option<&TransportError> {
        self.controller.error()
    }

    pub fn controller(&self) -> &PaginationController {
        &self.controller
    }

    /// Wait for the next fetch completion or debounced search, whichever
    /// comes first.
    ///
    /// Returns `None` once there is nothing left to wait for.
    pub async fn next_event(&mut self) -> Option<ViewEvent> {
        if self.disposed {
            return None;
        }

        tokio::select! {
            Some(outcome) = self.controller.next_completion() => {
                Some(self.on_completion(outcome))
            }
            Some(query) = self.search.next_ready() => {
                Some(self.on_search_ready(query))
            }
            else => None,
        }
    }

    /// Drive events until nothing is pending.
    pub async fn settle(&mut self) {
        while self.next_event().await.is_some() {}
    }

    // --- windowing ---

    pub fn layout(&self) -> WindowLayout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: WindowLayout) {
        self.layout = layout;
    }

    pub fn window(&self, scroll_offset: f64) -> VirtualWindow {
        compute_window(self.controller.items().len(), self.layout, scroll_offset)
    }

    /// The slice of materialized items to render at `scroll_offset`
    pub fn visible_items(&self, scroll_offset: f64) -> &[Article] {
        let window = self.window(scroll_offset);
        &self.controller.items()[window.range()]
    }

    /// Whether the window at `scroll_offset` reaches the last loaded item
    /// while more remain on the backend.
    pub fn needs_more(&self, scroll_offset: f64) -> bool {
        let window = self.window(scroll_offset);
        self.controller.has_more() && window.end_index >= self.controller.items().len()
    }

    // --- import / export ---

    pub fn export_filters(&self) -> Value {
        FiltersExport::new(self.draft.clone(), self.presets.list().to_vec()).to_json()
    }

    /// Replace the draft (and user presets, when the document carries any)
    /// from an exported document, then apply it. Default presets are kept.
    ///
    /// Returns `false` and leaves the view untouched if the document fails
    /// any check.
    pub fn import_filters(&mut self, text: &str) -> bool {
        if self.disposed {
            return false;
        }

        let export = match FiltersExport::parse(text) {
            Ok(export) => export,
            Err(err) => {
                tracing::warn!(error = %err, "rejected filter import");
                return false;
            }
        };

        let mut presets = self.presets.clone();
        if !export.presets.is_empty()
            && let Err(err) = presets.import(export.presets)
        {
            tracing::warn!(error = %err, "rejected imported presets");
            return false;
        }

        self.presets = presets;
        self.draft = export.criteria;
        match self.apply() {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(error = %err, "imported filters could not be applied");
                false
            }
        }
    }

    // --- presets ---

    pub fn presets(&self) -> &PresetStore {
        &self.presets
    }

    /// Save the draft under `name`.
    pub fn save_preset(&mut self, name: &str) -> Result<Uuid> {
        let preset = self.presets.save(name, self.draft.clone(), Utc::now())?;
        tracing::info!(preset = %preset.name, "saved preset");
        Ok(preset.id)
    }

    pub fn apply_preset(&mut self, id: Uuid) -> Result<DispatchStatus> {
        let preset = self
            .presets
            .get(id)
            .ok_or_else(|| Error::NotFound(format!("Preset {}", id)))?;
        self.draft = preset.criteria.clone();
        self.apply()
    }

    pub fn delete_preset(&mut self, id: Uuid) -> Result<FilterPreset> {
        Ok(self.presets.delete(id)?)
    }

    // --- teardown ---

    /// Cancel the pending search and abandon every in-flight fetch.
    ///
    /// After this the view ignores further dispatches and `next_event`
    /// returns `None`.
    pub fn dispose(&mut self) {
        self.search.dispose();
        self.controller.abandon();
        self.disposed = true;
        tracing::debug!("list view disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn refresh(&mut self) -> Result<DispatchStatus> {
        let status = self.controller.refresh(self.draft.clone())?;
        if status == DispatchStatus::Cached {
            self.history.mark_applied(self.draft.clone());
        }
        Ok(status)
    }

    fn on_search_ready(&mut self, query: String) -> ViewEvent {
        tracing::debug!(query = %query, "applying debounced search");
        match self.apply() {
            Ok(_) => ViewEvent::SearchApplied(query),
            Err(err) => {
                tracing::warn!(error = %err, "debounced search rejected");
                ViewEvent::SearchRejected {
                    query,
                    reason: err.to_string(),
                }
            }
        }
    }

    fn on_completion(&mut self, outcome: CompletionOutcome) -> ViewEvent {
        match outcome {
            CompletionOutcome::Applied { kind, added } => {
                if kind == DispatchKind::Refresh
                    && let Some(criteria) = self.controller.criteria()
                {
                    self.history.mark_applied(criteria.clone());
                }
                ViewEvent::Loaded { kind, added }
            }
            CompletionOutcome::Failed(err) => ViewEvent::Failed(err),
            CompletionOutcome::Discarded => ViewEvent::Discarded,
        }
    }
}

impl std::fmt::Debug for ListView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListView")
            .field("draft", &self.draft)
            .field("controller", &self.controller)
            .field("history", &self.history.len())
            .field("search_pending", &self.search.is_pending())
            .field("disposed", &self.disposed)
            .finish()
    }
}
