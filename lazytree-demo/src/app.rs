//! Main application state and UI.

use crate::theme;
use eframe::egui::{self, RichText};
use egui_lazytree::{LazyTreeView, LoadRequest, LoadResult, TreeNode, TreeViewResponse};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Latency of the pretend backend.
const FETCH_DELAY: Duration = Duration::from_millis(1000);

/// Number of notifications kept in the side panel log.
const EVENT_LOG_LIMIT: usize = 12;

/// Demo application state.
pub struct DemoApp {
    // Widget state
    tree: LazyTreeView,
    nodes: Vec<TreeNode>,

    // Demo shell state
    fail_fetches: Arc<AtomicBool>,
    events: Vec<String>,
}

impl DemoApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let fail_fetches = Arc::new(AtomicBool::new(false));

        // The loader runs on worker threads and reads the failure toggle
        // through a shared flag.
        let fail = Arc::clone(&fail_fetches);
        let mut tree = LazyTreeView::new("demo_tree", move |request| {
            fetch_children(request, fail.load(Ordering::Relaxed))
        })
        .with_title_renderer(|ui, node, row| {
            ui.selectable_label(row.selected, node.title.as_str())
        });
        tree.set_expanded(["node1"]);

        Self {
            tree,
            nodes: sample_forest(),
            fail_fetches,
            events: Vec::new(),
        }
    }

    /// Put the demo back to its initial data, forgetting fetch history.
    fn reset_tree(&mut self) {
        self.nodes = sample_forest();
        self.tree.reset();
        self.tree.set_expanded(["node1"]);
        self.tree.set_selected(None::<&str>);
        self.events.clear();
        tracing::info!("tree reset to initial data");
    }

    /// Mirror one frame's notifications into the log and tracing output.
    fn record(&mut self, response: TreeViewResponse) {
        if let Some(expanded) = response.toggled {
            tracing::info!("toggle notification: {:?}", expanded);
            self.push_event(format!("toggle {:?}", expanded));
        }
        if let Some(key) = response.selected {
            tracing::info!("select notification: {}", key);
            self.push_event(format!("select {}", key));
        }
    }

    fn push_event(&mut self, event: String) {
        self.events.push(event);
        if self.events.len() > EVENT_LOG_LIMIT {
            self.events.remove(0);
        }
    }

    fn render_state(&mut self, ui: &mut egui::Ui) {
        ui.heading("Tree state");
        ui.add_space(10.0);

        // Expanded keys, in notification order
        ui.label(RichText::new("Expanded").color(theme::text::MUTED));
        if self.tree.expanded().is_empty() {
            ui.label(RichText::new("(none)").color(theme::text::MUTED).italics());
        }
        for key in self.tree.expanded() {
            ui.colored_label(theme::accent::BLUE, format!("● {}", key));
        }

        ui.add_space(10.0);
        ui.label(RichText::new("Selected").color(theme::text::MUTED));
        match self.tree.selected() {
            Some(key) => ui.colored_label(theme::accent::ORANGE, key),
            None => ui.label(RichText::new("(none)").color(theme::text::MUTED).italics()),
        };

        ui.add_space(10.0);
        let mut fail = self.fail_fetches.load(Ordering::Relaxed);
        if ui.checkbox(&mut fail, "Fail fetches").changed() {
            self.fail_fetches.store(fail, Ordering::Relaxed);
        }
        ui.add_space(5.0);
        if ui.button("↺ Reset tree").clicked() {
            self.reset_tree();
        }

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        // Newest notification first
        ui.heading("Events");
        ui.add_space(10.0);
        if self.events.is_empty() {
            ui.label(
                RichText::new("Interact with the tree to see notifications.")
                    .color(theme::text::MUTED),
            );
        }
        for event in self.events.iter().rev() {
            ui.label(RichText::new(event.as_str()).color(theme::text::PRIMARY).small());
        }
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Dark theme
        ctx.set_visuals(egui::Visuals::dark());

        // State panel
        egui::SidePanel::left("state_panel")
            .min_width(220.0)
            .frame(
                egui::Frame::none()
                    .fill(theme::bg::PANEL)
                    .inner_margin(egui::Margin::same(12.0)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.render_state(ui);
                });
            });

        // Tree area
        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(theme::bg::CANVAS)
                    .inner_margin(egui::Margin::same(12.0)),
            )
            .show(ctx, |ui| {
                ui.heading("Lazy tree");
                ui.add_space(10.0);
                egui::ScrollArea::vertical()
                    .id_salt("tree_scroll")
                    .show(ui, |ui| {
                        let response = self.tree.show(ui, &mut self.nodes);
                        self.record(response);
                    });
            });
    }
}

/// The forest the demo starts from. `lazy_node3_2` is the only node that
/// fetches; `node2` is a plain leaf.
fn sample_forest() -> Vec<TreeNode> {
    vec![
        TreeNode::branch("node1", "node1", vec![TreeNode::leaf("node1_1", "node1_1")]),
        TreeNode::leaf("node2", "node2"),
        TreeNode::branch(
            "node3",
            "node3",
            vec![
                TreeNode::leaf("node3_1", "node3_1"),
                TreeNode::lazy("lazy_node3_2", "lazy node3_2"),
            ],
        ),
    ]
}

/// Pretend backend. Nodes that already have children get none; everyone
/// else waits out the latency and receives three children, one of them
/// lazy again.
fn fetch_children(request: LoadRequest, fail: bool) -> LoadResult {
    if !request.children.is_empty() {
        return Ok(Vec::new());
    }
    thread::sleep(FETCH_DELAY);
    if fail {
        return Err(format!("simulated failure loading {}", request.key));
    }
    let key = &request.key;
    Ok(vec![
        TreeNode::lazy(format!("{}-0", key), "Another lazy node..."),
        TreeNode::leaf(format!("{}-1", key), "A non-lazy node without children"),
        TreeNode::branch(
            format!("{}-2", key),
            "A non-lazy node with child nodes",
            vec![
                TreeNode::leaf(format!("{}-2-1", key), "nodeA"),
                TreeNode::leaf(format!("{}-2-2", key), "nodeB"),
            ],
        ),
    ])
}
