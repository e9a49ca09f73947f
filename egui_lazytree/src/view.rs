//! The lazy tree view widget.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use egui::collapsing_header::{paint_default_icon, CollapsingState};
use egui::{Response, RichText, Spinner, Ui};

use crate::loader::{ChildLoader, LoadRequest, LoadResult, PendingLoads};
use crate::node::{find_node_mut, placeholder_key, TreeNode};

/// Per-row facts handed to a custom title renderer.
#[derive(Debug, Clone, Copy)]
pub struct RowState<'a> {
    /// Row holds the current selection.
    pub selected: bool,
    /// Row is expanded.
    pub expanded: bool,
    /// A child fetch for this row is in flight.
    pub loading: bool,
    /// Message of the most recent failed fetch, if any.
    pub error: Option<&'a str>,
}

/// Notifications produced by [`LazyTreeView::show`] for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeViewResponse {
    /// The full expanded-key set, in order, present when it changed this frame.
    pub toggled: Option<Vec<String>>,
    /// Key newly selected this frame.
    pub selected: Option<String>,
}

type TitleRenderer = dyn Fn(&mut Ui, &TreeNode, &RowState<'_>) -> Response;
type IconRenderer = dyn Fn(&mut Ui, f32, &Response);

/// Lazily-loading tree view over egui's collapsing primitives.
///
/// Owns expansion and selection state plus per-node fetch bookkeeping. Node
/// data stays with the caller and is passed to `show` each frame; fetched
/// children are patched into it by key. A node whose `children` is present
/// but empty renders as expandable, and its first activation hands
/// `{key, children}` to the loader on a worker thread. While the fetch is in
/// flight the expand icon is replaced by a spinner and the node stays
/// collapsed; on success the children land in the tree and the node expands.
pub struct LazyTreeView {
    id: egui::Id,
    loader: Arc<ChildLoader>,
    expanded: Vec<String>,
    selected: Option<String>,
    pending: PendingLoads,
    loaded: HashSet<String>,
    errors: HashMap<String, String>,
    notify_toggle: bool,
    notify_select: bool,
    title: Option<Box<TitleRenderer>>,
    icon: Option<Arc<IconRenderer>>,
}

impl LazyTreeView {
    pub fn new(
        id_salt: impl std::hash::Hash,
        loader: impl Fn(LoadRequest) -> LoadResult + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: egui::Id::new(id_salt),
            loader: Arc::new(loader),
            expanded: Vec::new(),
            selected: None,
            pending: PendingLoads::default(),
            loaded: HashSet::new(),
            errors: HashMap::new(),
            notify_toggle: false,
            notify_select: false,
            title: None,
            icon: None,
        }
    }

    /// Replace the default selectable-label title row.
    pub fn with_title_renderer(
        mut self,
        render: impl Fn(&mut Ui, &TreeNode, &RowState<'_>) -> Response + 'static,
    ) -> Self {
        self.title = Some(Box::new(render));
        self
    }

    /// Replace the default expand/collapse triangle painter.
    pub fn with_icon_renderer(mut self, paint: impl Fn(&mut Ui, f32, &Response) + 'static) -> Self {
        self.icon = Some(Arc::new(paint));
        self
    }

    /// Expanded keys, in insertion order.
    pub fn expanded(&self) -> &[String] {
        &self.expanded
    }

    /// Currently selected key.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// True while `key` has an unresolved fetch.
    pub fn is_loading(&self, key: &str) -> bool {
        self.pending.contains(key)
    }

    /// Message of the most recent failed fetch for `key`, if any.
    pub fn load_error(&self, key: &str) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    /// Sync expansion to an externally owned value, without notifying.
    pub fn set_expanded<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        if keys != self.expanded {
            self.expanded = keys;
        }
    }

    /// Sync selection to an externally owned value, without notifying.
    pub fn set_selected<S: Into<String>>(&mut self, key: Option<S>) {
        let key = key.map(Into::into);
        if key != self.selected {
            self.selected = key;
        }
    }

    /// Replace the expanded set wholesale and notify.
    pub fn toggle<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expanded = keys.into_iter().map(Into::into).collect();
        self.notify_toggle = true;
    }

    /// Append one key to the expanded set, keeping every existing entry, and
    /// notify. Used after a fetch so the freshly loaded node becomes visible.
    pub fn expand(&mut self, key: impl Into<String>) {
        let key = key.into();
        if !self.expanded.iter().any(|k| *k == key) {
            self.expanded.push(key);
        }
        self.notify_toggle = true;
    }

    /// Record the selected key and notify.
    pub fn select(&mut self, key: impl Into<String>) {
        self.selected = Some(key.into());
        self.notify_select = true;
    }

    /// Forget fetch bookkeeping so lazy nodes may fetch again, e.g. after the
    /// caller replaced the tree data. In-flight results are discarded.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.loaded.clear();
        self.errors.clear();
    }

    /// Render the forest and report this frame's notifications.
    pub fn show(&mut self, ui: &mut Ui, nodes: &mut [TreeNode]) -> TreeViewResponse {
        self.apply_finished_loads(nodes);
        for node in nodes.iter_mut() {
            self.node_row(ui, node);
        }
        if !self.pending.is_empty() {
            // Keep polling until every in-flight fetch has landed.
            ui.ctx().request_repaint();
        }
        self.take_response()
    }

    fn is_expanded(&self, key: &str) -> bool {
        self.expanded.iter().any(|k| k == key)
    }

    fn take_response(&mut self) -> TreeViewResponse {
        let toggled = self.notify_toggle.then(|| self.expanded.clone());
        let selected = if self.notify_select {
            self.selected.clone()
        } else {
            None
        };
        self.notify_toggle = false;
        self.notify_select = false;
        TreeViewResponse { toggled, selected }
    }

    /// Patch finished fetches into the caller's tree and expand their nodes.
    fn apply_finished_loads(&mut self, nodes: &mut [TreeNode]) {
        for (key, result) in self.pending.poll() {
            match result {
                Ok(children) => {
                    tracing::debug!("loaded {} children for {}", children.len(), key);
                    match find_node_mut(nodes, &key) {
                        Some(node) => node.children = Some(children),
                        None => {
                            tracing::debug!("{} left the tree mid-fetch, dropping result", key);
                            continue;
                        }
                    }
                    self.loaded.insert(key.clone());
                    self.errors.remove(&key);
                    self.expand(key);
                }
                Err(message) => {
                    tracing::warn!("child fetch for {} failed: {}", key, message);
                    self.errors.insert(key, message);
                }
            }
        }
    }

    /// Start the fetch for a lazy node. Gated so only a node whose children
    /// are present and exactly empty, with no fetch pending and none already
    /// completed, reaches the loader.
    fn activate(&mut self, ctx: &egui::Context, node: &TreeNode) {
        let children = match &node.children {
            Some(children) if children.is_empty() => children.clone(),
            _ => return,
        };
        if self.pending.contains(&node.key) || self.loaded.contains(&node.key) {
            return;
        }
        tracing::debug!("fetching children for {}", node.key);
        self.errors.remove(&node.key);
        self.pending.begin(
            ctx,
            &self.loader,
            LoadRequest {
                key: node.key.clone(),
                children,
            },
        );
    }

    fn node_row(&mut self, ui: &mut Ui, node: &mut TreeNode) {
        if node.children.is_none() {
            self.leaf_row(ui, node);
        } else {
            self.branch_row(ui, node);
        }
    }

    /// True leaf: no expand affordance, title aligned with branch titles.
    fn leaf_row(&mut self, ui: &mut Ui, node: &TreeNode) {
        ui.horizontal(|ui| {
            ui.add_space(ui.spacing().icon_width + ui.spacing().icon_spacing);
            ui.add_enabled_ui(!node.disabled, |ui| {
                let title = self.title_row(ui, node, false);
                if title.clicked() {
                    self.select(node.key.clone());
                }
            });
        });
    }

    fn branch_row(&mut self, ui: &mut Ui, node: &mut TreeNode) {
        let row_id = self.id.with(&node.key);
        let mut state = CollapsingState::load_with_default_open(ui.ctx(), row_id, false);
        state.set_open(self.is_expanded(&node.key));

        let loading = self.pending.contains(&node.key);
        let fetchable = node.is_lazy() && !self.loaded.contains(&node.key);

        let header = ui.horizontal(|ui| {
            ui.add_enabled_ui(!node.disabled, |ui| {
                if loading {
                    ui.add(Spinner::new().size(ui.spacing().icon_width));
                } else {
                    let toggle = match &self.icon {
                        Some(icon) => {
                            let icon = Arc::clone(icon);
                            state.show_toggle_button(ui, move |ui, openness, response| {
                                icon(ui, openness, response)
                            })
                        }
                        None => state.show_toggle_button(ui, paint_default_icon),
                    };
                    if toggle.clicked() {
                        if fetchable {
                            // Stay collapsed until the fetch lands.
                            state.set_open(false);
                            self.activate(ui.ctx(), node);
                        } else {
                            self.toggle_key(&node.key);
                        }
                    }
                }
                if let Some(message) = self.errors.get(&node.key) {
                    ui.label(RichText::new("!").strong().color(ui.visuals().warn_fg_color))
                        .on_hover_text(message);
                }
                let title = self.title_row(ui, node, self.is_expanded(&node.key));
                if title.clicked() {
                    self.select(node.key.clone());
                    if fetchable {
                        self.activate(ui.ctx(), node);
                    }
                }
            });
        });

        let open_now = self.is_expanded(&node.key);
        let ph_key = placeholder_key(&node.key);
        state.show_body_indented(&header.response, ui, |ui| {
            let children = match node.children.as_mut() {
                Some(children) => children,
                None => return,
            };
            if children.is_empty() {
                if fetchable && open_now {
                    placeholder_row(ui, &ph_key);
                }
            } else {
                for child in children.iter_mut() {
                    self.node_row(ui, child);
                }
            }
        });
    }

    /// Draw the node's label and report its click response.
    fn title_row(&self, ui: &mut Ui, node: &TreeNode, expanded: bool) -> Response {
        let row = RowState {
            selected: self.selected.as_deref() == Some(node.key.as_str()),
            expanded,
            loading: self.pending.contains(&node.key),
            error: self.errors.get(&node.key).map(String::as_str),
        };
        match &self.title {
            Some(render) => render(ui, node, &row),
            None => ui.selectable_label(row.selected, node.title.as_str()),
        }
    }

    /// Flip one key in response to a user toggle on the expand icon; the
    /// wrapped primitive reports per-node clicks, the notification carries
    /// the whole set.
    fn toggle_key(&mut self, key: &str) {
        let mut keys = self.expanded.clone();
        match keys.iter().position(|k| k == key) {
            Some(index) => {
                keys.remove(index);
            }
            None => keys.push(key.to_string()),
        }
        self.toggle(keys);
    }
}

/// Inert, unlabeled row standing in for children that are not fetched yet.
/// Exists so an opened-but-unloaded node visibly occupies one child slot.
fn placeholder_row(ui: &mut Ui, key: &str) {
    ui.push_id(key, |ui| {
        let size = egui::vec2(ui.available_width(), ui.spacing().interact_size.y);
        ui.allocate_exact_size(size, egui::Sense::hover());
    });
}
