//! Lazily-loading tree view for [egui](https://docs.rs/egui).
//!
//! Wraps egui's collapsing primitives with the state a fetch-on-demand tree
//! needs: which rows are expanded, which row is selected, which child
//! fetches are in flight and which already finished. A node whose children
//! are present but empty is treated as unloaded; its first activation runs
//! the loader on a worker thread, shows a spinner in place of the expand
//! icon, and expands the node once the children arrive.
//!
//! ```no_run
//! use egui_lazytree::{LazyTreeView, TreeNode};
//!
//! # egui::__run_test_ui(|ui| {
//! let mut tree = LazyTreeView::new("files", |request| {
//!     Ok(vec![TreeNode::leaf(format!("{}-0", request.key), "child")])
//! });
//! let mut nodes = vec![
//!     TreeNode::branch("root", "root", vec![TreeNode::leaf("readme", "README")]),
//!     TreeNode::lazy("remote", "remote"),
//! ];
//! let response = tree.show(ui, &mut nodes);
//! if let Some(expanded) = response.toggled {
//!     println!("expanded rows: {:?}", expanded);
//! }
//! # });
//! ```

mod loader;
mod node;
mod view;

pub use loader::{ChildLoader, LoadRequest, LoadResult};
pub use node::{find_node, find_node_mut, placeholder_key, TreeNode};
pub use view::{LazyTreeView, RowState, TreeViewResponse};
